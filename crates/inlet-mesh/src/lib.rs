//! Parametric 2D meshes for two-ramp supersonic intakes.
//!
//! Stages, each a pure function of the previous one plus its own config:
//! `params` → `geom` (kink solve, stations) → `topology` (loop or blocks,
//! role-tagged curves) → `sizing` (fields or transfinite counts, wall
//! estimate) → `backend` (physical groups, kernel call). `pipeline` chains
//! them for one configuration.
//!
//! Coordinates are nondimensional by the chord, x downstream, y away from the
//! lower wall, origin at the inlet-bottom corner.

pub mod backend;
pub mod error;
pub mod geom;
pub mod params;
pub mod pipeline;
pub mod presets;
pub mod sizing;
pub mod topology;

#[cfg(test)]
mod testutil;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{BackendError, ConfigError, InletError, Result, TopologyError};
pub use params::{InletConfig, InletParams, InletSpec, MeshMode};
pub use pipeline::{plan, run, MeshPlan, PipelineReport};

/// Common exports for callers driving the pipeline.
pub mod prelude {
    pub use crate::backend::{
        BoundaryNames, GmshProcess, MeshArtifact, MeshBackend, MeshJob, ScriptOnly,
    };
    pub use crate::params::{
        FlowParams, InletConfig, InletParams, MeshMode, StructuredParams, UnstructuredParams,
        UnstructuredSizing,
    };
    pub use crate::pipeline::{plan, run, CurveReport, MeshPlan, PipelineReport};
    pub use crate::sizing::{estimate_wall, WallEstimate};
}
