//! Arena builder and the finalized `Topology`.

use nalgebra::Vector2;

use super::types::{
    Curve, CurveId, CurveLoop, CurveRole, Direction, OrientedCurve, PointId, RoleSets, Surface,
    SurfaceId,
};
use crate::error::TopologyError;
use crate::geom::{segments_fold_back, segments_intersect, ControlPoint, PointRole, SEGMENT_EPS};

/// Which decomposition a topology carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// One surface bounded by the whole duct loop.
    Loop,
    /// Quadrilateral blocks for transfinite meshing.
    Blocks,
}

/// Owns points, curves and surfaces; hands out index handles.
#[derive(Debug)]
pub struct TopologyBuilder {
    layout: Layout,
    points: Vec<ControlPoint>,
    curves: Vec<Curve>,
    surfaces: Vec<Surface>,
    roles: RoleSets,
}

impl TopologyBuilder {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            points: Vec::new(),
            curves: Vec::new(),
            surfaces: Vec::new(),
            roles: RoleSets::default(),
        }
    }

    pub fn add_point(&mut self, point: ControlPoint) -> PointId {
        let id = PointId(self.points.len());
        self.points.push(point);
        id
    }

    pub fn add_curve(
        &mut self,
        label: &'static str,
        start: PointId,
        end: PointId,
        role: CurveRole,
        direction: Option<Direction>,
    ) -> CurveId {
        let id = CurveId(self.curves.len());
        self.curves.push(Curve {
            label,
            start,
            end,
            role,
            direction,
        });
        self.roles.insert(role, id);
        id
    }

    pub fn add_surface(
        &mut self,
        label: &'static str,
        boundary: Vec<OrientedCurve>,
        corners: Option<[PointId; 4]>,
    ) -> SurfaceId {
        let id = SurfaceId(self.surfaces.len());
        self.surfaces.push(Surface {
            label,
            boundary: CurveLoop(boundary),
            corners,
        });
        id
    }

    /// Validate and freeze.
    pub fn finish(self) -> Result<Topology, TopologyError> {
        let topo = Topology {
            layout: self.layout,
            points: self.points,
            curves: self.curves,
            surfaces: self.surfaces,
            roles: self.roles,
        };
        topo.check_points()?;
        for surface in &topo.surfaces {
            topo.check_loop(surface)?;
            topo.check_block(surface)?;
        }
        topo.check_multiplicity()?;
        tracing::debug!(
            layout = ?topo.layout,
            points = topo.points.len(),
            curves = topo.curves.len(),
            surfaces = topo.surfaces.len(),
            "topology finalized"
        );
        Ok(topo)
    }
}

/// Finalized, immutable curve network.
#[derive(Clone, Debug, PartialEq)]
pub struct Topology {
    layout: Layout,
    points: Vec<ControlPoint>,
    curves: Vec<Curve>,
    surfaces: Vec<Surface>,
    roles: RoleSets,
}

impl Topology {
    #[inline]
    pub fn layout(&self) -> Layout {
        self.layout
    }
    #[inline]
    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }
    #[inline]
    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }
    #[inline]
    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }
    #[inline]
    pub fn roles(&self) -> &RoleSets {
        &self.roles
    }
    /// # Panics
    /// If `id` was not handed out by the builder of this topology.
    #[inline]
    pub fn point(&self, id: PointId) -> &ControlPoint {
        &self.points[id.0]
    }
    /// # Panics
    /// If `id` was not handed out by the builder of this topology.
    #[inline]
    pub fn curve(&self, id: CurveId) -> &Curve {
        &self.curves[id.0]
    }
    /// Non-panicking `point`, for handles of unknown origin.
    #[inline]
    pub fn get_point(&self, id: PointId) -> Option<&ControlPoint> {
        self.points.get(id.0)
    }
    #[inline]
    pub fn get_curve(&self, id: CurveId) -> Option<&Curve> {
        self.curves.get(id.0)
    }

    pub fn point_ids(&self) -> impl Iterator<Item = PointId> + '_ {
        (0..self.points.len()).map(PointId)
    }
    pub fn curve_ids(&self) -> impl Iterator<Item = CurveId> + '_ {
        (0..self.curves.len()).map(CurveId)
    }
    pub fn surface_ids(&self) -> impl Iterator<Item = SurfaceId> + '_ {
        (0..self.surfaces.len()).map(SurfaceId)
    }

    pub fn find_point(&self, role: PointRole) -> Option<PointId> {
        self.points.iter().position(|p| p.role == role).map(PointId)
    }

    pub fn find_curve(&self, label: &str) -> Option<CurveId> {
        self.curves.iter().position(|c| c.label == label).map(CurveId)
    }

    /// Start and end coordinates of a curve in its own direction.
    pub fn endpoints(&self, id: CurveId) -> (Vector2<f64>, Vector2<f64>) {
        let c = self.curve(id);
        (self.point(c.start).pos, self.point(c.end).pos)
    }

    pub fn length(&self, id: CurveId) -> f64 {
        let (a, b) = self.endpoints(id);
        (b - a).norm()
    }

    /// Start/end point of a curve as traversed inside a loop.
    fn oriented_ends(&self, oc: OrientedCurve) -> (PointId, PointId) {
        let c = self.curve(oc.curve);
        if oc.reversed {
            (c.end, c.start)
        } else {
            (c.start, c.end)
        }
    }

    /// Number of surfaces whose loop references `id`.
    pub fn surface_count(&self, id: CurveId) -> usize {
        self.surfaces
            .iter()
            .filter(|s| s.boundary.iter().any(|oc| oc.curve == id))
            .count()
    }

    /// Closed boundary polyline of a surface: first point repeated at the end.
    pub fn loop_points(&self, surface: SurfaceId) -> Vec<Vector2<f64>> {
        let s = &self.surfaces[surface.0];
        let mut out: Vec<Vector2<f64>> = s
            .boundary
            .iter()
            .map(|&oc| self.point(self.oriented_ends(oc).0).pos)
            .collect();
        if let Some(first) = out.first().copied() {
            out.push(first);
        }
        out
    }

    fn check_points(&self) -> Result<(), TopologyError> {
        for i in 0..self.points.len() {
            for j in (i + 1)..self.points.len() {
                if (self.points[i].pos - self.points[j].pos).norm() <= SEGMENT_EPS {
                    return Err(TopologyError::CoincidentPoints {
                        first: self.points[i].role.to_string(),
                        second: self.points[j].role.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    fn check_loop(&self, surface: &Surface) -> Result<(), TopologyError> {
        let sides = &surface.boundary.0;
        let n = sides.len();
        if n < 3 {
            return Err(TopologyError::OpenLoop {
                surface: surface.label.to_string(),
                at: n,
            });
        }
        for k in 0..n {
            let (_, end) = self.oriented_ends(sides[k]);
            let (next_start, _) = self.oriented_ends(sides[(k + 1) % n]);
            if end != next_start {
                return Err(TopologyError::OpenLoop {
                    surface: surface.label.to_string(),
                    at: k,
                });
            }
        }
        // Consecutive sides share exactly their corner.
        for k in 0..n {
            let next = (k + 1) % n;
            let (start, corner) = self.oriented_ends(sides[k]);
            let (_, end) = self.oriented_ends(sides[next]);
            let pos = |id: PointId| self.points[id.0].pos;
            if segments_fold_back(pos(corner), pos(start), pos(end), SEGMENT_EPS) {
                return Err(TopologyError::SelfIntersection {
                    surface: surface.label.to_string(),
                    first: self.curve(sides[k].curve).label.to_string(),
                    second: self.curve(sides[next].curve).label.to_string(),
                });
            }
        }
        // Non-adjacent pairs must be disjoint.
        for i in 0..n {
            for j in (i + 1)..n {
                let adjacent = j == i + 1 || (i == 0 && j == n - 1);
                if adjacent {
                    continue;
                }
                let (a0, a1) = self.endpoints(sides[i].curve);
                let (b0, b1) = self.endpoints(sides[j].curve);
                if segments_intersect(a0, a1, b0, b1, SEGMENT_EPS) {
                    return Err(TopologyError::SelfIntersection {
                        surface: surface.label.to_string(),
                        first: self.curve(sides[i].curve).label.to_string(),
                        second: self.curve(sides[j].curve).label.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    fn check_block(&self, surface: &Surface) -> Result<(), TopologyError> {
        let Some(corners) = surface.corners else {
            return Ok(());
        };
        if surface.boundary.len() != 4 {
            return Err(TopologyError::BlockSides {
                block: surface.label.to_string(),
                sides: surface.boundary.len(),
            });
        }
        for (k, oc) in surface.boundary.iter().enumerate() {
            if self.oriented_ends(*oc).0 != corners[k] {
                return Err(TopologyError::OpenLoop {
                    surface: surface.label.to_string(),
                    at: k,
                });
            }
        }
        Ok(())
    }

    fn check_multiplicity(&self) -> Result<(), TopologyError> {
        for id in self.curve_ids() {
            let count = self.surface_count(id);
            let expected = if self.curve(id).role.is_boundary() { 1 } else { 2 };
            if count != expected {
                return Err(TopologyError::SharedEdge {
                    curve: self.curve(id).label.to_string(),
                    surfaces: count,
                });
            }
        }
        Ok(())
    }
}
