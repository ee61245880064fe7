//! Resolution & Sizing Planner.
//!
//! Purpose
//! - Attach enough sizing information to a finalized topology for the kernel
//!   to mesh it: background fields for free meshing, explicit node counts and
//!   grading for transfinite meshing.
//! - Estimate the near-wall first-cell height from the Reynolds number and
//!   report it with an explicit time-step hint.
//!
//! Layout
//! - `wall.rs`: flat-plate skin-friction correlation.
//! - `directives.rs`: plan types handed to the backend.
//! - `structured.rs`: transfinite node counts from a global `dx`.
//! - `unstructured.rs`: distance/threshold and boundary-layer fields.
//!
//! Every planner is deterministic: identical inputs give identical plans.

mod directives;
mod structured;
mod unstructured;
mod wall;

pub use directives::{
    BoundaryLayer, CurveResolution, Field, FieldId, FieldPlan, Grading, MeshOptions, Resolution,
    TransfinitePlan,
};
pub use structured::{check_conforming, plan_transfinite, span_nodes, MIN_NODES};
pub use unstructured::{layer_end_points, plan_fields};
pub use wall::{estimate_wall, WallEstimate};

use crate::error::InletError;
use crate::geom::InletGeometry;
use crate::params::{FlowParams, MeshMode};
use crate::topology::Topology;

/// Complete sizing output of one invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct SizingPlan {
    pub resolution: Resolution,
    pub options: MeshOptions,
    pub wall: WallEstimate,
}

/// Plan sizing for `topo` according to the mesh mode. Structured mode needs
/// every surface to be a block.
pub fn plan(
    geo: &InletGeometry,
    topo: &Topology,
    mode: &MeshMode,
    flow: &FlowParams,
) -> Result<SizingPlan, InletError> {
    let wall = estimate_wall(flow)?;
    tracing::info!(
        reynolds_number = wall.reynolds_number,
        target_y_plus = wall.target_y_plus,
        skin_friction = wall.skin_friction,
        first_cell_height = wall.first_cell_height,
        time_step = wall.time_step,
        "near-wall estimate"
    );
    let (resolution, options) = match mode {
        MeshMode::Structured(p) => {
            let plan = plan_transfinite(geo, topo, p)?;
            let options = MeshOptions {
                algorithm: None,
                recombine_all: p.recombine,
                smoothing: Some(p.smoothing),
            };
            (Resolution::Transfinite(plan), options)
        }
        MeshMode::Unstructured(p) => {
            let plan = plan_fields(geo, topo, p, &wall)?;
            tracing::debug!(
                fields = plan.fields.len(),
                boundary_layer = plan.boundary_layer.is_some(),
                "field plan ready"
            );
            let options = MeshOptions {
                algorithm: Some(p.algorithm),
                recombine_all: false,
                smoothing: None,
            };
            (Resolution::Fields(plan), options)
        }
    };
    Ok(SizingPlan {
        resolution,
        options,
        wall,
    })
}

#[cfg(test)]
mod tests;
