//! Control points and their named roles.

use std::fmt;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Named position of a control point.
///
/// The first eleven roles trace the duct boundary; the `Split*` and `Top*`
/// roles only exist in the block decomposition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PointRole {
    InletBottom,
    RampStart,
    RampKink,
    /// End of the second ramp segment; start of the throat floor.
    RampEnd,
    OutletBottom,
    OutletTop,
    /// Cowl leading edge, at the throat-top elevation.
    CowlLip,
    /// Cowl shoulder at the intake height.
    CowlTip,
    CowlBack,
    FarfieldOutlet,
    FarfieldInlet,
    SplitInlet,
    SplitRampStart,
    SplitKink,
    TopRampStart,
    TopKink,
    TopLip,
    TopCowlTip,
}

impl PointRole {
    pub const BOUNDARY_LOOP: [PointRole; 11] = [
        PointRole::InletBottom,
        PointRole::RampStart,
        PointRole::RampKink,
        PointRole::RampEnd,
        PointRole::OutletBottom,
        PointRole::OutletTop,
        PointRole::CowlLip,
        PointRole::CowlTip,
        PointRole::CowlBack,
        PointRole::FarfieldOutlet,
        PointRole::FarfieldInlet,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::InletBottom => "inlet-bottom",
            Self::RampStart => "ramp-start",
            Self::RampKink => "ramp-kink",
            Self::RampEnd => "ramp-end",
            Self::OutletBottom => "outlet-bottom",
            Self::OutletTop => "outlet-top",
            Self::CowlLip => "cowl-lip",
            Self::CowlTip => "cowl-tip",
            Self::CowlBack => "cowl-back",
            Self::FarfieldOutlet => "farfield-outlet",
            Self::FarfieldInlet => "farfield-inlet",
            Self::SplitInlet => "split-inlet",
            Self::SplitRampStart => "split-ramp-start",
            Self::SplitKink => "split-kink",
            Self::TopRampStart => "top-ramp-start",
            Self::TopKink => "top-kink",
            Self::TopLip => "top-lip",
            Self::TopCowlTip => "top-cowl-tip",
        }
    }
}

impl fmt::Display for PointRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A 2D coordinate with its role and an optional local target mesh size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlPoint {
    pub role: PointRole,
    pub pos: Vector2<f64>,
    pub size: Option<f64>,
}

impl ControlPoint {
    #[inline]
    pub fn new(role: PointRole, pos: Vector2<f64>) -> Self {
        Self {
            role,
            pos,
            size: None,
        }
    }

    #[inline]
    pub fn with_size(self, size: Option<f64>) -> Self {
        Self { size, ..self }
    }
}
