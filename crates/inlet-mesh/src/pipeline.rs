//! Single-shot pipeline: parameters → geometry → topology → sizing → backend.
//!
//! `plan` runs every pure stage and stops before the kernel; `run` adds the
//! backend call. Each invocation owns its arenas, so independent configs can
//! be meshed from independent processes without coordination.

use std::path::Path;

use serde::Serialize;

use crate::backend::{build_groups, MeshArtifact, MeshBackend, MeshJob, PhysicalGroup};
use crate::error::Result;
use crate::geom::{resolve, InletGeometry, PointRole};
use crate::params::{InletConfig, InletSpec, MeshMode};
use crate::sizing::{self, Grading, MeshOptions, Resolution, SizingPlan, WallEstimate};
use crate::topology::{build_blocks, build_loop, CurveRole, Topology};

/// Output of the pure stages for one configuration.
#[derive(Clone, Debug)]
pub struct MeshPlan {
    pub name: String,
    pub geometry: InletGeometry,
    pub topology: Topology,
    pub sizing: SizingPlan,
    pub groups: Vec<PhysicalGroup>,
}

pub fn plan(config: &InletConfig) -> Result<MeshPlan> {
    let spec = InletSpec::new(&config.geometry)?;
    let geometry = resolve(&spec)?;
    let topology = match config.mesh {
        MeshMode::Structured(_) => build_blocks(&geometry)?,
        MeshMode::Unstructured(_) => build_loop(&geometry)?,
    };
    let sizing = sizing::plan(&geometry, &topology, &config.mesh, &config.flow)?;
    let groups = build_groups(&topology, &config.boundary_names)?;
    Ok(MeshPlan {
        name: config.name.clone(),
        geometry,
        topology,
        sizing,
        groups,
    })
}

/// Plan and mesh one configuration into `output`.
pub fn run(
    config: &InletConfig,
    backend: &dyn MeshBackend,
    output: &Path,
) -> Result<PipelineReport> {
    let plan = plan(config)?;
    tracing::info!(
        name = %plan.name,
        backend = backend.name(),
        output = %output.display(),
        "submitting mesh job"
    );
    let artifact = backend.generate(&plan.job(), output)?;
    Ok(plan.report(Some(artifact)))
}

impl MeshPlan {
    pub fn job(&self) -> MeshJob<'_> {
        MeshJob {
            name: &self.name,
            topology: &self.topology,
            sizing: &self.sizing,
            groups: &self.groups,
        }
    }

    pub fn curve_reports(&self) -> Vec<CurveReport> {
        let topo = &self.topology;
        topo.curve_ids()
            .map(|id| {
                let c = topo.curve(id);
                let resolution = match &self.sizing.resolution {
                    Resolution::Transfinite(p) => p.resolution(id).copied(),
                    Resolution::Fields(_) => None,
                };
                CurveReport {
                    label: c.label,
                    role: c.role,
                    start: topo.point(c.start).role,
                    end: topo.point(c.end).role,
                    length: topo.length(id),
                    nodes: resolution.map(|r| r.nodes),
                    grading: resolution.map(|r| r.grading),
                }
            })
            .collect()
    }

    pub fn report(&self, artifact: Option<MeshArtifact>) -> PipelineReport {
        PipelineReport {
            name: self.name.clone(),
            layout: match self.sizing.resolution {
                Resolution::Transfinite(_) => "blocks",
                Resolution::Fields(_) => "loop",
            },
            kink: KinkReport {
                length: self.geometry.kink.length,
                height: self.geometry.kink.height,
            },
            wall: self.sizing.wall,
            options: self.sizing.options,
            curves: self.curve_reports(),
            groups: self
                .groups
                .iter()
                .map(|g| GroupReport {
                    name: g.name.clone(),
                    dim: g.dim(),
                    members: g.len(),
                })
                .collect(),
            artifact,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct KinkReport {
    pub length: f64,
    pub height: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CurveReport {
    pub label: &'static str,
    pub role: CurveRole,
    pub start: PointRole,
    pub end: PointRole,
    pub length: f64,
    pub nodes: Option<usize>,
    pub grading: Option<Grading>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GroupReport {
    pub name: String,
    pub dim: u8,
    pub members: usize,
}

/// Diagnostics of one invocation; the wall estimate is always present.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PipelineReport {
    pub name: String,
    pub layout: &'static str,
    pub kink: KinkReport,
    pub wall: WallEstimate,
    pub options: MeshOptions,
    pub curves: Vec<CurveReport>,
    pub groups: Vec<GroupReport>,
    pub artifact: Option<MeshArtifact>,
}

impl PipelineReport {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
