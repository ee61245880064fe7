//! Kink solve and station layout.

use nalgebra::Vector2;

use super::types::{ControlPoint, PointRole};
use crate::error::ConfigError;
use crate::params::InletSpec;

/// Below this, `tan(a1) - tan(a2)` counts as zero (parallel ramp segments).
const SLOPE_EPS: f64 = 1e-12;
/// Tolerated mismatch between `cowl_height` and the vertical gap it spans.
const COWL_FIT_EPS: f64 = 1e-9;

/// Intersection of the two ramp segments, relative to the ramp start.
///
/// Invariant: `0 < length < ramp_length` and `0 < height < ramp_height`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KinkPoint {
    pub length: f64,
    pub height: f64,
}

impl KinkPoint {
    /// Equate `y = tan(a1)·x` with `y = ramp_height + tan(a2)·(x − ramp_length)`.
    pub fn solve(spec: &InletSpec) -> Result<Self, ConfigError> {
        spec.validate()?;
        let t1 = spec.ramp_angle_1.to_radians().tan();
        let t2 = spec.ramp_angle_2.to_radians().tan();
        let denom = t1 - t2;
        if denom.abs() < SLOPE_EPS {
            return Err(ConfigError::new(
                "ramp_angle_2",
                format!(
                    "equals ramp_angle_1 ({}°): the ramp has no kink",
                    spec.ramp_angle_1
                ),
            ));
        }
        let length = (spec.ramp_height - t2 * spec.ramp_length) / denom;
        let height = t1 * length;
        let inside = length > 0.0
            && length < spec.ramp_length
            && height > 0.0
            && height < spec.ramp_height;
        if !inside {
            let (lo, hi) = (t1.min(t2) * spec.ramp_length, t1.max(t2) * spec.ramp_length);
            return Err(ConfigError::new(
                "ramp_height",
                format!(
                    "rise {:.6} must lie strictly between {lo:.6} and {hi:.6} for ramp angles {}° / {}°; \
                     kink resolved to ({length:.6}, {height:.6})",
                    spec.ramp_height, spec.ramp_angle_1, spec.ramp_angle_2
                ),
            ));
        }
        Ok(Self { length, height })
    }
}

/// Streamwise stations and elevations of the layout (nondimensional).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stations {
    pub x_start: f64,
    pub x_ramp_start: f64,
    pub x_kink: f64,
    pub x_throat_start: f64,
    pub x_cowl_tip: f64,
    pub x_end: f64,
    pub y_kink: f64,
    pub y_ramp: f64,
    /// Throat-top elevation; also the horizontal split of the block layout.
    pub y_throat: f64,
    pub y_intake: f64,
    pub y_top: f64,
}

impl Stations {
    pub fn position(&self, role: PointRole) -> Vector2<f64> {
        use PointRole::*;
        let (x, y) = match role {
            InletBottom => (self.x_start, 0.0),
            RampStart => (self.x_ramp_start, 0.0),
            RampKink => (self.x_kink, self.y_kink),
            RampEnd => (self.x_throat_start, self.y_ramp),
            OutletBottom => (self.x_end, self.y_ramp),
            OutletTop => (self.x_end, self.y_throat),
            CowlLip => (self.x_throat_start, self.y_throat),
            CowlTip => (self.x_cowl_tip, self.y_intake),
            CowlBack => (self.x_end, self.y_intake),
            FarfieldOutlet => (self.x_end, self.y_top),
            FarfieldInlet => (self.x_start, self.y_top),
            SplitInlet => (self.x_start, self.y_throat),
            SplitRampStart => (self.x_ramp_start, self.y_throat),
            SplitKink => (self.x_kink, self.y_throat),
            TopRampStart => (self.x_ramp_start, self.y_top),
            TopKink => (self.x_kink, self.y_top),
            TopLip => (self.x_throat_start, self.y_top),
            TopCowlTip => (self.x_cowl_tip, self.y_top),
        };
        Vector2::new(x, y)
    }
}

/// Resolved geometry: the `InletSpec`, its kink, and every station.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InletGeometry {
    pub spec: InletSpec,
    pub kink: KinkPoint,
    pub stations: Stations,
}

impl InletGeometry {
    #[inline]
    pub fn position(&self, role: PointRole) -> Vector2<f64> {
        self.stations.position(role)
    }

    #[inline]
    pub fn point(&self, role: PointRole) -> ControlPoint {
        ControlPoint::new(role, self.position(role))
    }

    /// The duct boundary in loop order: lower wall, ramp, throat floor,
    /// outlet, throat roof, cowl, exterior outlet, top, inlet.
    pub fn boundary_points(&self) -> Vec<ControlPoint> {
        PointRole::BOUNDARY_LOOP
            .iter()
            .map(|&r| self.point(r))
            .collect()
    }
}

/// Solve the kink, place every station, and check that the stations are
/// strictly ordered so the boundary cannot fold back on itself.
pub fn resolve(spec: &InletSpec) -> Result<InletGeometry, ConfigError> {
    let kink = KinkPoint::solve(spec)?;
    // `solve` validated `spec`: `cowl_angle` is in (0°, 90°), so the tangent is finite and > 0.
    let cowl_run = spec.cowl_height / spec.cowl_angle.to_radians().tan();

    let x_end = spec.domain_length;
    let x_ramp_start = x_end - spec.intake_length;
    let x_throat_start = x_ramp_start + spec.ramp_length;
    let stations = Stations {
        x_start: 0.0,
        x_ramp_start,
        x_kink: x_ramp_start + kink.length,
        x_throat_start,
        x_cowl_tip: x_throat_start + cowl_run,
        x_end,
        y_kink: kink.height,
        y_ramp: spec.ramp_height,
        y_throat: spec.ramp_height + spec.throat_height,
        y_intake: spec.intake_height,
        y_top: spec.domain_height,
    };

    if stations.x_ramp_start <= stations.x_start {
        return Err(ConfigError::new(
            "intake_length",
            format!(
                "must be shorter than domain_length ({} >= {})",
                spec.intake_length, spec.domain_length
            ),
        ));
    }
    if stations.x_throat_start >= stations.x_end {
        return Err(ConfigError::new(
            "ramp_length",
            format!(
                "must be shorter than intake_length ({} >= {})",
                spec.ramp_length, spec.intake_length
            ),
        ));
    }
    if stations.x_cowl_tip >= stations.x_end {
        return Err(ConfigError::new(
            "cowl_height",
            format!(
                "cowl shoulder at x = {:.6} reaches past the outlet at x = {:.6}",
                stations.x_cowl_tip, stations.x_end
            ),
        ));
    }
    if stations.y_intake <= stations.y_throat {
        return Err(ConfigError::new(
            "intake_height",
            format!(
                "must exceed ramp_height + throat_height ({:.6} <= {:.6})",
                stations.y_intake, stations.y_throat
            ),
        ));
    }
    if stations.y_top <= stations.y_intake {
        return Err(ConfigError::new(
            "domain_height",
            format!(
                "must exceed intake_height ({:.6} <= {:.6})",
                stations.y_top, stations.y_intake
            ),
        ));
    }
    let gap = stations.y_intake - stations.y_throat;
    if (gap - spec.cowl_height).abs() > COWL_FIT_EPS {
        tracing::warn!(
            cowl_height = spec.cowl_height,
            gap,
            "cowl_height differs from intake_height - ramp_height - throat_height; \
             the cowl slope will not match cowl_angle"
        );
    }

    tracing::debug!(
        kink_length = kink.length,
        kink_height = kink.height,
        x_cowl_tip = stations.x_cowl_tip,
        "geometry resolved"
    );
    Ok(InletGeometry {
        spec: *spec,
        kink,
        stations,
    })
}
