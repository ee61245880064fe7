use anyhow::{Context, Result};
use inlet_mesh::{InletConfig, PipelineReport};
use serde::Serialize;
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What one `inlet mesh` invocation produced, and from which inputs.
#[derive(Debug, Serialize)]
pub struct MeshRecord<'a> {
    pub case: &'a str,
    pub backend: &'static str,
    pub config: &'a InletConfig,
    pub first_cell_height: f64,
    pub time_step: f64,
    /// Node and element counts read back from the mesh, when there is one.
    pub nodes: Option<usize>,
    pub elements: Option<usize>,
    /// The artifact first, then the script and any side outputs.
    pub outputs: Vec<PathBuf>,
}

impl<'a> MeshRecord<'a> {
    pub fn new(config: &'a InletConfig, backend: &'static str, report: &PipelineReport) -> Self {
        let mut outputs = Vec::new();
        let (mut nodes, mut elements) = (None, None);
        if let Some(artifact) = &report.artifact {
            outputs.push(artifact.path.clone());
            if let Some(script) = &artifact.script {
                if *script != artifact.path {
                    outputs.push(script.clone());
                }
            }
            if let Some(summary) = &artifact.summary {
                nodes = Some(summary.nodes);
                elements = Some(summary.elements);
            }
        }
        Self {
            case: &config.name,
            backend,
            config,
            first_cell_height: report.wall.first_cell_height,
            time_step: report.wall.time_step,
            nodes,
            elements,
            outputs,
        }
    }
}

#[derive(Serialize)]
struct Callsite {
    file: &'static str,
    line: u32,
}

#[derive(Serialize)]
struct Sidecar<'r, 'a> {
    code_rev: String,
    inlet_mesh: &'static str,
    callsite: Callsite,
    #[serde(flatten)]
    record: &'r MeshRecord<'a>,
}

/// Write `<stem>.provenance.json` next to `artifact`.
#[track_caller]
pub fn write_sidecar(artifact: &Path, record: &MeshRecord<'_>) -> Result<PathBuf> {
    let path = sidecar_path(artifact);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }
    let caller = Location::caller();
    let doc = Sidecar {
        code_rev: current_git_rev(),
        inlet_mesh: inlet_mesh::VERSION,
        callsite: Callsite {
            file: caller.file(),
            line: caller.line(),
        },
        record,
    };
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn sidecar_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("mesh"));
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

/// `GIT_COMMIT` (build time, then run time), else `git rev-parse HEAD`.
pub fn current_git_rev() -> String {
    if let Some(rev) = option_env!("GIT_COMMIT").filter(|s| !s.is_empty()) {
        return rev.to_string();
    }
    if let Ok(rev) = std::env::var("GIT_COMMIT") {
        if !rev.is_empty() {
            return rev;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
