//! Reference intake cases.
//!
//! All three share the same two-ramp intake (chord 150, ramp angles 10°/22°,
//! cowl angle 30°) and differ in domain size, mesh mode and boundary naming.

use crate::backend::BoundaryNames;
use crate::geom::PointRole;
use crate::params::{
    FlowParams, InletConfig, InletParams, MeshMode, StructuredParams, UnstructuredParams,
    UnstructuredSizing,
};

const CHORD: f64 = 150.0;
const REYNOLDS_NUMBER: f64 = 2.3e6;

pub const PRESET_NAMES: [&str; 3] = [
    "mach5-structured",
    "mach5-unstructured",
    "mach1.5-threshold",
];

/// Intake geometry of the Mach 5 cases, in chord units.
pub fn di_vanna_params() -> InletParams {
    InletParams {
        chord_length: CHORD,
        domain_length: 157.5,
        domain_height: 54.0,
        intake_length: 150.0,
        intake_height: 44.0,
        throat_height: 15.0,
        ramp_length: 81.7,
        ramp_height: 21.0,
        cowl_height: 8.0,
        ramp_angle_1: 10.0,
        ramp_angle_2: 22.0,
        cowl_angle: 30.0,
    }
}

fn flow() -> FlowParams {
    FlowParams {
        reynolds_number: REYNOLDS_NUMBER,
        target_y_plus: 1.0,
        density: 1.0,
        velocity: 1.0,
    }
}

/// Nine-block transfinite mesh, 1024 streamwise cells.
pub fn mach5_structured() -> InletConfig {
    InletConfig {
        name: "mach5-structured".into(),
        geometry: di_vanna_params(),
        mesh: MeshMode::Structured(StructuredParams::default()),
        flow: flow(),
        boundary_names: BoundaryNames::default(),
    }
}

/// Single-loop mesh with quadrilateral layers on the pre-ramp wall and every
/// duct wall, fanning out around the cowl lip.
pub fn mach5_unstructured() -> InletConfig {
    InletConfig {
        name: "mach5-unstructured".into(),
        geometry: di_vanna_params(),
        mesh: MeshMode::Unstructured(UnstructuredParams {
            sizing: UnstructuredSizing::BoundaryLayer {
                lc_base: 0.5,
                first_height: Some(0.02),
                ratio: 1.1,
                thickness: 1.0,
                quads: true,
                include_bottom: true,
                fan_points: vec![PointRole::CowlLip],
            },
            algorithm: 6,
        }),
        flow: flow(),
        boundary_names: BoundaryNames::default(),
    }
}

/// Single-loop mesh refined by wall distance, with open-boundary naming.
pub fn mach1_5_threshold() -> InletConfig {
    let geometry = InletParams {
        domain_length: 156.0,
        domain_height: 60.0,
        ..di_vanna_params()
    };
    InletConfig {
        name: "mach1.5-threshold".into(),
        geometry,
        mesh: MeshMode::Unstructured(UnstructuredParams {
            sizing: UnstructuredSizing::Threshold {
                lc_wall: Some(0.05),
                lc_far: 0.5,
                dist_min: 6.0,
                dist_max: 80.0,
                include_bottom: true,
            },
            algorithm: 6,
        }),
        flow: flow(),
        boundary_names: BoundaryNames::open(),
    }
}

pub fn preset(name: &str) -> Option<InletConfig> {
    match name {
        "mach5-structured" => Some(mach5_structured()),
        "mach5-unstructured" => Some(mach5_unstructured()),
        "mach1.5-threshold" => Some(mach1_5_threshold()),
        _ => None,
    }
}
