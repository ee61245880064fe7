//! Summary reader for gmsh 4.1 ASCII mesh files.
//!
//! Only section headers are read: the format version, the declared node and
//! element totals, and the physical names. Connectivity is never loaded.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::BackendError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PhysicalName {
    pub dim: u8,
    pub tag: i32,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MshSummary {
    pub version: String,
    pub nodes: usize,
    pub elements: usize,
    pub physical_names: Vec<PhysicalName>,
}

impl MshSummary {
    pub fn has_group(&self, dim: u8, name: &str) -> bool {
        self.physical_names
            .iter()
            .any(|p| p.dim == dim && p.name == name)
    }
}

fn field<T: std::str::FromStr>(line: &str, index: usize, what: &str) -> Result<T, String> {
    line.split_whitespace()
        .nth(index)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| format!("malformed {what} line `{line}`"))
}

pub fn parse_summary(text: &str) -> Result<MshSummary, String> {
    let mut lines = text.lines().map(str::trim);
    let mut version = None;
    let mut nodes = None;
    let mut elements = None;
    let mut physical_names = Vec::new();

    while let Some(line) = lines.next() {
        match line {
            "$MeshFormat" => {
                let header = lines.next().ok_or("truncated $MeshFormat")?;
                let v: String = field(header, 0, "$MeshFormat")?;
                let file_type: u8 = field(header, 1, "$MeshFormat")?;
                if !v.starts_with("4.") {
                    return Err(format!("unsupported format version {v}"));
                }
                if file_type != 0 {
                    return Err("binary mesh files are not supported".into());
                }
                version = Some(v);
            }
            "$PhysicalNames" => {
                let count: usize = field(lines.next().unwrap_or(""), 0, "$PhysicalNames")?;
                for _ in 0..count {
                    let entry = lines.next().ok_or("truncated $PhysicalNames")?;
                    let name = entry
                        .split('"')
                        .nth(1)
                        .ok_or_else(|| format!("unquoted physical name in `{entry}`"))?;
                    physical_names.push(PhysicalName {
                        dim: field(entry, 0, "$PhysicalNames")?,
                        tag: field(entry, 1, "$PhysicalNames")?,
                        name: name.to_string(),
                    });
                }
            }
            // numEntityBlocks numNodes minNodeTag maxNodeTag
            "$Nodes" => nodes = Some(field(lines.next().unwrap_or(""), 1, "$Nodes")?),
            // numEntityBlocks numElements minElementTag maxElementTag
            "$Elements" => elements = Some(field(lines.next().unwrap_or(""), 1, "$Elements")?),
            _ => {}
        }
    }
    Ok(MshSummary {
        version: version.ok_or("missing $MeshFormat")?,
        nodes: nodes.ok_or("missing $Nodes")?,
        elements: elements.ok_or("missing $Elements")?,
        physical_names,
    })
}

pub fn read_summary(path: &Path) -> Result<MshSummary, BackendError> {
    let text = fs::read_to_string(path).map_err(|e| BackendError::Artifact {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_summary(&text).map_err(|reason| BackendError::Artifact {
        path: path.to_path_buf(),
        reason,
    })
}
