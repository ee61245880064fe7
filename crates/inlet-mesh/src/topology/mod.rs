//! Block/Curve Topology Builder.
//!
//! Purpose
//! - Connect resolved control points into directed curves, tag each curve
//!   with its physical role, and bound the fluid region by surfaces: one loop
//!   for free meshing, nine four-sided blocks for transfinite meshing.
//!
//! Design
//! - Arena with handles: `TopologyBuilder` owns points, curves and surfaces
//!   and returns `PointId`/`CurveId`/`SurfaceId`; each invocation owns its own
//!   arena.
//! - Role membership is recorded in `RoleSets` as curves are created and is
//!   frozen with the topology.
//! - `finish` rejects coincident points, open or self-intersecting loops,
//!   malformed blocks, and curves whose surface multiplicity disagrees with
//!   their role (internal splits in exactly two surfaces, boundaries in one).
//!   No repair is attempted.

mod builder;
mod structured;
mod types;
mod unstructured;

pub use builder::{Layout, Topology, TopologyBuilder};
pub use structured::build_blocks;
pub use types::{
    Curve, CurveId, CurveLoop, CurveRole, Direction, OrientedCurve, PointId, RoleSets, Span,
    Surface, SurfaceId, Tier,
};
pub use unstructured::build_loop;

#[cfg(test)]
mod tests;
