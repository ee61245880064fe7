//! Sizing directives handed to the backend.

use serde::Serialize;

use crate::geom::ControlPoint;
use crate::topology::{CurveId, PointId, SurfaceId, Topology};

/// Node distribution law along a transfinite curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "law", content = "coefficient", rename_all = "snake_case")]
pub enum Grading {
    Uniform,
    /// Geometric progression; successive cells grow by the ratio along the
    /// curve direction.
    Progression(f64),
    /// Symmetric refinement toward both ends.
    Bump(f64),
}

/// Explicit node count and grading for one curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveResolution {
    pub curve: CurveId,
    pub nodes: usize,
    pub grading: Grading,
}

/// Index into `FieldPlan::fields`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldId(pub usize);

/// Extruded quadrilateral layers along wall curves.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundaryLayer {
    pub curves: Vec<CurveId>,
    /// Points where layers stop: wall curves meeting non-layer boundaries.
    pub end_points: Vec<PointId>,
    /// Convex corners where layers fan out.
    pub fan_points: Vec<PointId>,
    pub first_height: f64,
    pub ratio: f64,
    pub thickness: f64,
    pub quads: bool,
}

/// Continuous background sizing field.
#[derive(Clone, Debug, PartialEq)]
pub enum Field {
    /// Nearest distance to the listed curves.
    Distance { curves: Vec<CurveId> },
    /// `size_min` up to `dist_min`, `size_max` beyond `dist_max`, linear between.
    Threshold {
        input: FieldId,
        size_min: f64,
        size_max: f64,
        dist_min: f64,
        dist_max: f64,
    },
    BoundaryLayer(BoundaryLayer),
}

impl Field {
    pub fn kind(&self) -> &'static str {
        match self {
            Field::Distance { .. } => "Distance",
            Field::Threshold { .. } => "Threshold",
            Field::BoundaryLayer(_) => "BoundaryLayer",
        }
    }
}

/// Directives for free meshing.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldPlan {
    /// Characteristic length per control point, indexed by `PointId`.
    pub point_sizes: Vec<Option<f64>>,
    pub fields: Vec<Field>,
    pub background: Option<FieldId>,
    pub boundary_layer: Option<FieldId>,
}

impl FieldPlan {
    /// # Panics
    /// If `id` does not index `fields`.
    pub fn field(&self, id: FieldId) -> &Field {
        &self.fields[id.0]
    }

    pub fn get_field(&self, id: FieldId) -> Option<&Field> {
        self.fields.get(id.0)
    }

    /// Control point `id` carrying its planned characteristic length.
    pub fn sized_point(&self, topo: &Topology, id: PointId) -> ControlPoint {
        topo.point(id)
            .with_size(self.point_sizes.get(id.0).copied().flatten())
    }
}

/// Directives for transfinite meshing.
#[derive(Clone, Debug, PartialEq)]
pub struct TransfinitePlan {
    /// Global streamwise spacing the counts derive from.
    pub dx: f64,
    /// One entry per curve, in `CurveId` order.
    pub curves: Vec<CurveResolution>,
    pub blocks: Vec<SurfaceId>,
}

impl TransfinitePlan {
    pub fn resolution(&self, curve: CurveId) -> Option<&CurveResolution> {
        self.curves.iter().find(|r| r.curve == curve)
    }
}

/// Mode-specific directives.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
    Fields(FieldPlan),
    Transfinite(TransfinitePlan),
}

/// Kernel options forwarded with the job.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize)]
pub struct MeshOptions {
    pub algorithm: Option<u32>,
    pub recombine_all: bool,
    pub smoothing: Option<u32>,
}
