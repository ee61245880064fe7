//! Near-wall first-cell height from the turbulent flat-plate correlation.
//!
//! `Cf = 0.0592 Re^-0.2`, `τ_w = ½ρU²Cf`, `u_τ = sqrt(τ_w/ρ)`,
//! `h_wall = y⁺ ν / u_τ` with `ν = U·L/Re` and `L = 1` (nondimensional chord).
//! The explicit time-step hint is `dt = 0.1 h_wall / U`.
//!
//! The estimate is a diagnostic and a default for wall sizes; it never feeds
//! back into the geometry.

use serde::Serialize;

use crate::error::ConfigError;
use crate::params::FlowParams;

const CF_COEFF: f64 = 0.0592;
const CF_EXPONENT: f64 = -0.2;
const DT_FACTOR: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WallEstimate {
    pub reynolds_number: f64,
    pub target_y_plus: f64,
    pub skin_friction: f64,
    pub wall_shear: f64,
    pub friction_velocity: f64,
    pub kinematic_viscosity: f64,
    pub first_cell_height: f64,
    pub time_step: f64,
}

pub fn estimate_wall(flow: &FlowParams) -> Result<WallEstimate, ConfigError> {
    flow.validate()?;
    let skin_friction = CF_COEFF * flow.reynolds_number.powf(CF_EXPONENT);
    let wall_shear = 0.5 * flow.density * flow.velocity * flow.velocity * skin_friction;
    let friction_velocity = (wall_shear / flow.density).sqrt();
    let kinematic_viscosity = flow.velocity / flow.reynolds_number;
    let first_cell_height = flow.target_y_plus * kinematic_viscosity / friction_velocity;
    let time_step = DT_FACTOR * first_cell_height / flow.velocity;
    if !(first_cell_height.is_finite() && first_cell_height > 0.0) {
        return Err(ConfigError::new(
            "reynolds_number",
            format!("first-cell height is not representable ({first_cell_height})"),
        ));
    }
    Ok(WallEstimate {
        reynolds_number: flow.reynolds_number,
        target_y_plus: flow.target_y_plus,
        skin_friction,
        wall_shear,
        friction_velocity,
        kinematic_viscosity,
        first_cell_height,
        time_step,
    })
}
