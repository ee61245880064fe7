//! Handles, curves, loops, surfaces, and the role-tagged curve sets.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier types for clarity; indices into the owning `Topology` arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurveId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub usize);

/// Physical role of a curve. Every role except `InternalSplit` is a boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CurveRole {
    /// Flat lower wall upstream of the ramp.
    Bottom,
    /// Ramp, throat floor and roof, cowl surfaces.
    Wall,
    /// Upstream vertical boundary.
    Inlet,
    /// Upper far boundary.
    Top,
    /// Duct exit between throat floor and roof.
    Outlet,
    /// Downstream boundary above the cowl.
    ExteriorOutlet,
    /// Block interface; shared by exactly two blocks.
    InternalSplit,
}

impl CurveRole {
    pub const BOUNDARY: [CurveRole; 6] = [
        CurveRole::Bottom,
        CurveRole::Wall,
        CurveRole::Inlet,
        CurveRole::Top,
        CurveRole::Outlet,
        CurveRole::ExteriorOutlet,
    ];

    #[inline]
    pub fn is_boundary(self) -> bool {
        self != CurveRole::InternalSplit
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bottom => "bottom",
            Self::Wall => "wall",
            Self::Inlet => "inlet",
            Self::Top => "top",
            Self::Outlet => "outlet",
            Self::ExteriorOutlet => "exterior-outlet",
            Self::InternalSplit => "internal-split",
        }
    }
}

impl fmt::Display for CurveRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Streamwise interval of the block layout. Curves on different elevations
/// covering the same interval share one node count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Span {
    PreRamp,
    RampFirst,
    RampSecond,
    Cowl,
    Wake,
    /// Throat floor/roof: covers `Cowl` followed by `Wake`.
    Throat,
}

/// Vertical tier of a wall-normal curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tier {
    /// Below the throat-top split, upstream of the throat.
    Lower,
    /// Above the split (or above the cowl).
    Upper,
    /// Across the throat, between ramp and cowl.
    Throat,
}

/// Meshing direction of a curve in the block layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    Streamwise(Span),
    WallNormal(Tier),
}

/// Directed straight segment between two control points.
#[derive(Clone, Debug, PartialEq)]
pub struct Curve {
    pub label: &'static str,
    pub start: PointId,
    pub end: PointId,
    pub role: CurveRole,
    /// Set in the block layout only.
    pub direction: Option<Direction>,
}

/// A curve traversed forward or backward inside a loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrientedCurve {
    pub curve: CurveId,
    pub reversed: bool,
}

impl OrientedCurve {
    #[inline]
    pub fn forward(curve: CurveId) -> Self {
        Self {
            curve,
            reversed: false,
        }
    }
    #[inline]
    pub fn reversed(curve: CurveId) -> Self {
        Self {
            curve,
            reversed: true,
        }
    }
}

/// Closed chain of oriented curves.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct CurveLoop(pub Vec<OrientedCurve>);

impl CurveLoop {
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, OrientedCurve> {
        self.0.iter()
    }
}

/// Plane surface bounded by one loop. With `corners` set it is a block:
/// exactly four sides, `corners[i]` being where side `i` starts.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    pub label: &'static str,
    pub boundary: CurveLoop,
    pub corners: Option<[PointId; 4]>,
}

impl Surface {
    #[inline]
    pub fn is_block(&self) -> bool {
        self.corners.is_some()
    }

    /// Opposing side pairs of a block: (bottom, top) and (right, left).
    pub fn opposing_sides(&self) -> Option<[(OrientedCurve, OrientedCurve); 2]> {
        if !self.is_block() || self.boundary.len() != 4 {
            return None;
        }
        let s = &self.boundary.0;
        Some([(s[0], s[2]), (s[1], s[3])])
    }
}

/// Curve handles grouped by role, filled as curves are created.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoleSets {
    sets: BTreeMap<CurveRole, Vec<CurveId>>,
}

impl RoleSets {
    pub(crate) fn insert(&mut self, role: CurveRole, curve: CurveId) {
        self.sets.entry(role).or_default().push(curve);
    }

    /// Curves carrying `role`, in creation order.
    pub fn get(&self, role: CurveRole) -> &[CurveId] {
        self.sets.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Union of several roles, in role order then creation order.
    pub fn union(&self, roles: &[CurveRole]) -> Vec<CurveId> {
        let mut out: Vec<CurveId> = Vec::new();
        for (role, ids) in &self.sets {
            if roles.contains(role) {
                out.extend_from_slice(ids);
            }
        }
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = (CurveRole, &[CurveId])> {
        self.sets.iter().map(|(r, ids)| (*r, ids.as_slice()))
    }
}
