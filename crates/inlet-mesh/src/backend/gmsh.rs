//! Backends that hand the rendered script to gmsh, or only persist it.
//!
//! Artifacts are first written to `<output>.partial` and renamed into place
//! once complete, so a failed job never leaves a file at `output`.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Serialize;

use super::geo::render_geo;
use super::msh::{read_summary, MshSummary};
use super::{MeshBackend, MeshJob};
use crate::error::BackendError;

/// What a backend left on disk.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MeshArtifact {
    pub path: PathBuf,
    /// Kernel input script, when persisted separately from the artifact.
    pub script: Option<PathBuf>,
    /// Header summary of a mesh file; `None` for script-only artifacts.
    pub summary: Option<MshSummary>,
}

fn partial_path(output: &Path) -> PathBuf {
    let mut name = output
        .file_name()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("mesh"));
    name.push(".partial");
    output.with_file_name(name)
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> BackendError + '_ {
    move |source| BackendError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn remove_if_present(path: &Path) -> Result<(), BackendError> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(io_err(path)(e)),
        _ => Ok(()),
    }
}

fn ensure_parent(path: &Path) -> Result<(), BackendError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(io_err(parent))
        }
        _ => Ok(()),
    }
}

/// Write `contents` to `path` through a `.partial` sibling.
fn write_atomically(path: &Path, contents: &str) -> Result<(), BackendError> {
    ensure_parent(path)?;
    let partial = partial_path(path);
    fs::write(&partial, contents).map_err(io_err(&partial))?;
    fs::rename(&partial, path).map_err(io_err(path))
}

/// Persists the `.geo` script as the artifact; no kernel call.
///
/// The output name must carry the `.geo` extension.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScriptOnly;

impl MeshBackend for ScriptOnly {
    fn name(&self) -> &'static str {
        "script"
    }

    fn generate(&self, job: &MeshJob<'_>, output: &Path) -> Result<MeshArtifact, BackendError> {
        if output.extension().and_then(|e| e.to_str()) != Some("geo") {
            return Err(BackendError::Artifact {
                path: output.to_path_buf(),
                reason: "script output must use the .geo extension".into(),
            });
        }
        write_atomically(output, &render_geo(job))?;
        tracing::info!(path = %output.display(), "wrote kernel script");
        Ok(MeshArtifact {
            path: output.to_path_buf(),
            script: Some(output.to_path_buf()),
            summary: None,
        })
    }
}

/// Runs the gmsh executable in batch mode on the rendered script and reads
/// back a 4.1 ASCII mesh.
#[derive(Clone, Debug)]
pub struct GmshProcess {
    pub program: PathBuf,
    /// Inserted before the script path, e.g. when `program` is a wrapper.
    pub leading_args: Vec<OsString>,
}

impl Default for GmshProcess {
    fn default() -> Self {
        Self::new("gmsh")
    }
}

impl GmshProcess {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    pub fn with_leading_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.leading_args = args.into_iter().map(Into::into).collect();
        self
    }

    fn script_path(output: &Path) -> Result<PathBuf, BackendError> {
        let script = output.with_extension("geo");
        if script == output {
            return Err(BackendError::Artifact {
                path: output.to_path_buf(),
                reason: "mesh output must not use the .geo extension".into(),
            });
        }
        Ok(script)
    }
}

/// gmsh reports some failures on its log while still exiting with 0.
fn log_reports_error(log: &str) -> bool {
    log.lines().any(|l| l.trim_start().starts_with("Error"))
}

impl MeshBackend for GmshProcess {
    fn name(&self) -> &'static str {
        "gmsh"
    }

    fn generate(&self, job: &MeshJob<'_>, output: &Path) -> Result<MeshArtifact, BackendError> {
        let script = Self::script_path(output)?;
        write_atomically(&script, &render_geo(job))?;
        let partial = partial_path(output);
        remove_if_present(&partial)?;

        tracing::debug!(program = %self.program.display(), script = %script.display(), "launching mesh kernel");
        let result = Command::new(&self.program)
            .args(&self.leading_args)
            .arg(&script)
            .args(["-2", "-format", "msh41", "-o"])
            .arg(&partial)
            .output()
            .map_err(|source| BackendError::Launch {
                program: self.program.display().to_string(),
                source,
            })?;

        let mut log = String::from_utf8_lossy(&result.stdout).into_owned();
        log.push_str(&String::from_utf8_lossy(&result.stderr));
        if !result.status.success() || log_reports_error(&log) {
            remove_if_present(&partial)?;
            return Err(BackendError::Kernel {
                status: result.status.code(),
                log,
            });
        }
        if !partial.exists() {
            return Err(BackendError::Artifact {
                path: partial,
                reason: "kernel exited successfully without writing a mesh".into(),
            });
        }
        let summary = match read_summary(&partial) {
            Ok(s) => s,
            Err(e) => {
                remove_if_present(&partial)?;
                return Err(e);
            }
        };
        fs::rename(&partial, output).map_err(io_err(output))?;
        tracing::info!(
            path = %output.display(),
            nodes = summary.nodes,
            elements = summary.elements,
            "mesh written"
        );
        Ok(MeshArtifact {
            path: output.to_path_buf(),
            script: Some(script),
            summary: Some(summary),
        })
    }
}
