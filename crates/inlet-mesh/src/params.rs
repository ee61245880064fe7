//! Design parameters: raw configuration records and the validated `InletSpec`.
//!
//! Lengths in `InletParams` (and in the unstructured sizing records) are in the
//! same unit as `chord_length`; they are nondimensionalized by `1/chord_length`
//! when the `InletSpec` is built. Angles are in degrees.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::backend::BoundaryNames;
use crate::error::ConfigError;
use crate::geom::PointRole;

/// Physical design parameters of the intake, dimensional.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InletParams {
    pub chord_length: f64,
    pub domain_length: f64,
    pub domain_height: f64,
    pub intake_length: f64,
    pub intake_height: f64,
    pub throat_height: f64,
    pub ramp_length: f64,
    pub ramp_height: f64,
    pub cowl_height: f64,
    pub ramp_angle_1: f64,
    pub ramp_angle_2: f64,
    pub cowl_angle: f64,
}

/// Freestream data for the near-wall cell estimate. Nondimensional, with the
/// chord as reference length.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlowParams {
    pub reynolds_number: f64,
    #[serde(default = "defaults::target_y_plus")]
    pub target_y_plus: f64,
    #[serde(default = "defaults::unit")]
    pub density: f64,
    #[serde(default = "defaults::unit")]
    pub velocity: f64,
}

impl FlowParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("reynolds_number", self.reynolds_number)?;
        positive("target_y_plus", self.target_y_plus)?;
        positive("density", self.density)?;
        positive("velocity", self.velocity)?;
        Ok(())
    }
}

/// Mesh-mode selector; each variant carries its own resolution parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum MeshMode {
    Structured(StructuredParams),
    Unstructured(UnstructuredParams),
}

/// Transfinite resolution controls.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StructuredParams {
    /// Streamwise cells across the whole domain length; sets `dx`.
    #[serde(default = "defaults::streamwise_cells")]
    pub target_streamwise_cells: usize,
    /// Nodes on wall-normal curves below the throat-top split.
    #[serde(default = "defaults::ny")]
    pub ny_bottom: usize,
    /// Nodes on wall-normal curves above the split.
    #[serde(default = "defaults::ny")]
    pub ny_top: usize,
    /// Geometric progression ratio for wall-normal curves.
    #[serde(default = "defaults::wall_progression")]
    pub wall_progression: f64,
    /// Bump coefficient for the throat verticals.
    #[serde(default = "defaults::throat_bump")]
    pub throat_bump: f64,
    #[serde(default = "defaults::smoothing")]
    pub smoothing: u32,
    #[serde(default = "defaults::yes")]
    pub recombine: bool,
}

impl Default for StructuredParams {
    fn default() -> Self {
        Self {
            target_streamwise_cells: defaults::streamwise_cells(),
            ny_bottom: defaults::ny(),
            ny_top: defaults::ny(),
            wall_progression: defaults::wall_progression(),
            throat_bump: defaults::throat_bump(),
            smoothing: defaults::smoothing(),
            recombine: true,
        }
    }
}

/// Background-field resolution controls.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnstructuredParams {
    pub sizing: UnstructuredSizing,
    /// Kernel 2D algorithm id (6 = Frontal-Delaunay).
    #[serde(default = "defaults::algorithm")]
    pub algorithm: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnstructuredSizing {
    /// Distance-to-wall field mapped linearly onto a target size.
    Threshold {
        /// Size at the walls; `None` takes the estimated first-cell height.
        #[serde(default)]
        lc_wall: Option<f64>,
        lc_far: f64,
        dist_min: f64,
        dist_max: f64,
        /// Count the pre-ramp lower wall as a wall.
        #[serde(default)]
        include_bottom: bool,
    },
    /// Quadrilateral layers extruded from the walls.
    BoundaryLayer {
        lc_base: f64,
        /// First layer height; `None` takes the estimated first-cell height.
        #[serde(default)]
        first_height: Option<f64>,
        ratio: f64,
        thickness: f64,
        #[serde(default = "defaults::yes")]
        quads: bool,
        /// Extrude from the pre-ramp lower wall as well.
        #[serde(default)]
        include_bottom: bool,
        /// Convex corners where layers fan out. Curated per case.
        #[serde(default)]
        fan_points: Vec<PointRole>,
    },
}

/// Complete configuration of one pipeline invocation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InletConfig {
    pub name: String,
    pub geometry: InletParams,
    pub mesh: MeshMode,
    pub flow: FlowParams,
    #[serde(default)]
    pub boundary_names: BoundaryNames,
}

impl InletConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|e| ConfigError::new("config", e.to_string()))
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::new("config", format!("reading {}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Validated, nondimensional design parameters.
///
/// Invariants:
/// - every length is finite and strictly positive,
/// - every angle lies strictly inside (0°, 90°).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InletSpec {
    /// Dimensional chord; the nondimensionalization scale is `1/chord`.
    pub chord: f64,
    pub domain_length: f64,
    pub domain_height: f64,
    pub intake_length: f64,
    pub intake_height: f64,
    pub throat_height: f64,
    pub ramp_length: f64,
    pub ramp_height: f64,
    pub cowl_height: f64,
    pub ramp_angle_1: f64,
    pub ramp_angle_2: f64,
    pub cowl_angle: f64,
}

impl InletSpec {
    pub fn new(p: &InletParams) -> Result<Self, ConfigError> {
        positive("chord_length", p.chord_length)?;
        let s = 1.0 / p.chord_length;
        let spec = Self {
            chord: p.chord_length,
            domain_length: positive("domain_length", p.domain_length)? * s,
            domain_height: positive("domain_height", p.domain_height)? * s,
            intake_length: positive("intake_length", p.intake_length)? * s,
            intake_height: positive("intake_height", p.intake_height)? * s,
            throat_height: positive("throat_height", p.throat_height)? * s,
            ramp_length: positive("ramp_length", p.ramp_length)? * s,
            ramp_height: positive("ramp_height", p.ramp_height)? * s,
            cowl_height: positive("cowl_height", p.cowl_height)? * s,
            ramp_angle_1: acute("ramp_angle_1", p.ramp_angle_1)?,
            ramp_angle_2: acute("ramp_angle_2", p.ramp_angle_2)?,
            cowl_angle: acute("cowl_angle", p.cowl_angle)?,
        };
        Ok(spec)
    }

    /// Re-check the invariants on an already scaled spec.
    ///
    /// Fields are public, so a spec built or edited with a struct literal
    /// can bypass `new`; the resolver calls this before using one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("chord_length", self.chord)?;
        positive("domain_length", self.domain_length)?;
        positive("domain_height", self.domain_height)?;
        positive("intake_length", self.intake_length)?;
        positive("intake_height", self.intake_height)?;
        positive("throat_height", self.throat_height)?;
        positive("ramp_length", self.ramp_length)?;
        positive("ramp_height", self.ramp_height)?;
        positive("cowl_height", self.cowl_height)?;
        acute("ramp_angle_1", self.ramp_angle_1)?;
        acute("ramp_angle_2", self.ramp_angle_2)?;
        acute("cowl_angle", self.cowl_angle)?;
        Ok(())
    }

    /// Nondimensionalization factor `1/L`.
    #[inline]
    pub fn scale(&self) -> f64 {
        1.0 / self.chord
    }

    /// Scale a dimensional length (chord units) into the nondimensional frame.
    #[inline]
    pub fn nondim(&self, length: f64) -> f64 {
        length * self.scale()
    }
}

fn positive(parameter: &'static str, value: f64) -> Result<f64, ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::new(parameter, format!("must be finite, got {value}")));
    }
    if value <= 0.0 {
        return Err(ConfigError::new(parameter, format!("must be > 0, got {value}")));
    }
    Ok(value)
}

fn acute(parameter: &'static str, degrees: f64) -> Result<f64, ConfigError> {
    if !(degrees > 0.0 && degrees < 90.0) {
        return Err(ConfigError::new(
            parameter,
            format!("angle must lie in (0°, 90°), got {degrees}°"),
        ));
    }
    Ok(degrees)
}

/// Check a dimensional sizing length and return it nondimensionalized.
pub(crate) fn sizing_length(
    spec: &InletSpec,
    parameter: &'static str,
    value: f64,
) -> Result<f64, ConfigError> {
    Ok(spec.nondim(positive(parameter, value)?))
}

mod defaults {
    pub fn target_y_plus() -> f64 {
        1.0
    }
    pub fn unit() -> f64 {
        1.0
    }
    pub fn streamwise_cells() -> usize {
        1024
    }
    pub fn ny() -> usize {
        380
    }
    pub fn wall_progression() -> f64 {
        1.005
    }
    pub fn throat_bump() -> f64 {
        0.05
    }
    pub fn smoothing() -> u32 {
        10
    }
    pub fn algorithm() -> u32 {
        6
    }
    pub fn yes() -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;

    #[test]
    fn spec_scales_by_chord() {
        let spec = InletSpec::new(&presets::di_vanna_params()).unwrap();
        assert!((spec.ramp_height - 21.0 / 150.0).abs() < 1e-15);
        assert!((spec.domain_length - 1.05).abs() < 1e-12);
        assert_eq!(spec.ramp_angle_2, 22.0);
    }

    #[test]
    fn rejects_nonpositive_lengths_and_bad_angles() {
        let mut p = presets::di_vanna_params();
        p.throat_height = 0.0;
        let err = InletSpec::new(&p).unwrap_err();
        assert_eq!(err.parameter, "throat_height");

        let mut p = presets::di_vanna_params();
        p.cowl_angle = 90.0;
        assert_eq!(InletSpec::new(&p).unwrap_err().parameter, "cowl_angle");

        let mut p = presets::di_vanna_params();
        p.ramp_angle_1 = f64::NAN;
        assert_eq!(InletSpec::new(&p).unwrap_err().parameter, "ramp_angle_1");
    }

    #[test]
    fn config_json_roundtrip_keeps_mode() {
        let cfg = presets::mach5_structured();
        let text = cfg.to_json_pretty().unwrap();
        assert!(text.contains("\"mode\": \"structured\""));
        let back = InletConfig::from_json_str(&text).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn structured_defaults_fill_missing_fields() {
        let text = r#"{
            "name": "minimal",
            "geometry": {
                "chord_length": 150.0, "domain_length": 157.5, "domain_height": 54.0,
                "intake_length": 150.0, "intake_height": 44.0, "throat_height": 15.0,
                "ramp_length": 81.7, "ramp_height": 21.0, "cowl_height": 8.0,
                "ramp_angle_1": 10.0, "ramp_angle_2": 22.0, "cowl_angle": 30.0
            },
            "mesh": { "mode": "structured" },
            "flow": { "reynolds_number": 2.3e6 }
        }"#;
        let cfg = InletConfig::from_json_str(text).unwrap();
        assert_eq!(cfg.mesh, MeshMode::Structured(StructuredParams::default()));
        assert_eq!(cfg.flow.target_y_plus, 1.0);
        assert_eq!(cfg.boundary_names, BoundaryNames::default());
    }

    #[test]
    fn flow_validation_names_parameter() {
        let flow = FlowParams {
            reynolds_number: -1.0,
            target_y_plus: 1.0,
            density: 1.0,
            velocity: 1.0,
        };
        assert_eq!(flow.validate().unwrap_err().parameter, "reynolds_number");
    }
}
