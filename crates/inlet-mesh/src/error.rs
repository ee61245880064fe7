//! Error kinds surfaced by the pipeline stages.
//!
//! - `ConfigError`: degenerate or inconsistent design parameters. Always names
//!   the offending parameter.
//! - `TopologyError`: the curve network or block decomposition is not
//!   conforming. Raised before any backend call.
//! - `BackendError`: the meshing kernel could not be launched or rejected the
//!   job. Kernel output is carried verbatim.
//!
//! All three are fatal for one invocation; nothing is retried or repaired.

use std::fmt;
use std::path::PathBuf;

/// Invalid or physically inconsistent design input.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigError {
    pub parameter: &'static str,
    pub reason: String,
}

impl ConfigError {
    pub(crate) fn new(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self {
            parameter,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid `{}`: {}", self.parameter, self.reason)
    }
}

impl std::error::Error for ConfigError {}

/// Non-conforming topology detected before backend submission.
#[derive(Clone, Debug, PartialEq)]
pub enum TopologyError {
    /// Two distinct control points share a position.
    CoincidentPoints { first: String, second: String },
    /// A curve loop does not chain end-to-start or does not close.
    OpenLoop { surface: String, at: usize },
    /// Two non-adjacent curves of one loop cross or touch.
    SelfIntersection { surface: String, first: String, second: String },
    /// A block is not bounded by exactly four curves.
    BlockSides { block: String, sides: usize },
    /// A curve is referenced by zero or more than two surfaces, or its
    /// multiplicity disagrees with its internal/boundary role.
    SharedEdge { curve: String, surfaces: usize },
    /// Opposing sides of a transfinite block carry different node counts.
    NodeCountMismatch {
        block: String,
        first: String,
        second: String,
        counts: (usize, usize),
    },
    /// A boundary curve was not assigned to exactly one physical group.
    UngroupedCurve { curve: String, groups: usize },
    /// A transfinite block references a curve without an explicit node count.
    MissingResolution { curve: String },
}

impl fmt::Display for TopologyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CoincidentPoints { first, second } => {
                write!(f, "control points `{first}` and `{second}` coincide")
            }
            Self::OpenLoop { surface, at } => {
                write!(f, "curve loop of `{surface}` is open at position {at}")
            }
            Self::SelfIntersection {
                surface,
                first,
                second,
            } => write!(
                f,
                "curve loop of `{surface}` self-intersects: `{first}` crosses `{second}`"
            ),
            Self::BlockSides { block, sides } => {
                write!(f, "block `{block}` has {sides} sides (needs exactly 4)")
            }
            Self::SharedEdge { curve, surfaces } => write!(
                f,
                "curve `{curve}` is referenced by {surfaces} surfaces, inconsistent with its role"
            ),
            Self::NodeCountMismatch {
                block,
                first,
                second,
                counts,
            } => write!(
                f,
                "block `{block}`: opposing sides `{first}` ({}) and `{second}` ({}) differ in node count",
                counts.0, counts.1
            ),
            Self::UngroupedCurve { curve, groups } => write!(
                f,
                "boundary curve `{curve}` belongs to {groups} physical groups (needs exactly 1)"
            ),
            Self::MissingResolution { curve } => {
                write!(f, "curve `{curve}` has no transfinite node count")
            }
        }
    }
}

impl std::error::Error for TopologyError {}

/// Failure reported by, or while talking to, the meshing kernel.
#[derive(Debug)]
pub enum BackendError {
    /// Reading or writing a file around the kernel call failed.
    Io { path: PathBuf, source: std::io::Error },
    /// The kernel executable could not be started.
    Launch { program: String, source: std::io::Error },
    /// The kernel ran and reported failure; `log` is its output, unedited.
    Kernel { status: Option<i32>, log: String },
    /// The kernel claimed success but the artifact is missing or unreadable.
    Artifact { path: PathBuf, reason: String },
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "i/o error on {}: {source}", path.display()),
            Self::Launch { program, source } => {
                write!(f, "could not launch mesh kernel `{program}`: {source}")
            }
            Self::Kernel { status, log } => match status {
                Some(code) => write!(f, "mesh kernel failed with exit code {code}:\n{log}"),
                None => write!(f, "mesh kernel terminated by signal:\n{log}"),
            },
            Self::Artifact { path, reason } => {
                write!(f, "mesh artifact {} is invalid: {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for BackendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } | Self::Launch { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Any failure of a single pipeline invocation.
#[derive(Debug)]
pub enum InletError {
    Config(ConfigError),
    Topology(TopologyError),
    Backend(BackendError),
}

impl fmt::Display for InletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration error: {e}"),
            Self::Topology(e) => write!(f, "topology error: {e}"),
            Self::Backend(e) => write!(f, "backend error: {e}"),
        }
    }
}

impl std::error::Error for InletError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Topology(e) => Some(e),
            Self::Backend(e) => Some(e),
        }
    }
}

impl From<ConfigError> for InletError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<TopologyError> for InletError {
    fn from(e: TopologyError) -> Self {
        Self::Topology(e)
    }
}

impl From<BackendError> for InletError {
    fn from(e: BackendError) -> Self {
        Self::Backend(e)
    }
}

pub type Result<T, E = InletError> = std::result::Result<T, E>;
