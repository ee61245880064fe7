//! Mesh Backend Adapter.
//!
//! Purpose
//! - Map curve roles to the boundary-condition names the solver expects and
//!   freeze them as physical groups.
//! - Submit topology, sizing and groups to the meshing kernel as one blocking
//!   call and persist the artifact under the requested name.
//!
//! Design
//! - `MeshBackend` is the seam to the kernel. `GmshProcess` drives the gmsh
//!   executable through a rendered `.geo` script; `ScriptOnly` stops after
//!   writing that script. Tests substitute their own implementations.
//! - Kernel failures are returned verbatim and never retried. No artifact is
//!   left at the output path on failure.

mod geo;
mod gmsh;
mod groups;
mod msh;

pub use geo::{render_geo, write_geo};
pub use gmsh::{GmshProcess, MeshArtifact, ScriptOnly};
pub use groups::{build_groups, BoundaryNames, GroupMembers, PhysicalGroup};
pub use msh::{parse_summary, read_summary, MshSummary, PhysicalName};

use std::path::Path;

use crate::error::BackendError;
use crate::sizing::SizingPlan;
use crate::topology::Topology;

/// Everything a backend needs for one mesh.
#[derive(Clone, Copy, Debug)]
pub struct MeshJob<'a> {
    pub name: &'a str,
    pub topology: &'a Topology,
    pub sizing: &'a SizingPlan,
    pub groups: &'a [PhysicalGroup],
}

pub trait MeshBackend {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &'static str;

    /// Produce the artifact at `output`. Blocking; not retried.
    fn generate(&self, job: &MeshJob<'_>, output: &Path) -> Result<MeshArtifact, BackendError>;
}
