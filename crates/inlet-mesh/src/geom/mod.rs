//! Geometry Parameter Resolver.
//!
//! Purpose
//! - Turn a validated `InletSpec` into the control points of the duct
//!   boundary, solving for the ramp kink where the two ramp slopes meet.
//! - Everything lives in one nondimensional frame anchored at the inlet-bottom
//!   corner: x grows downstream, y grows away from the lower wall.
//!
//! Layout
//! - `types.rs`: `PointRole`, `ControlPoint`.
//! - `resolve.rs`: `KinkPoint`, `Stations`, `InletGeometry`, `resolve`.
//! - `util.rs`: segment predicates used by loop validation.

mod resolve;
mod types;
mod util;

pub use resolve::{resolve, InletGeometry, KinkPoint, Stations};
pub use types::{ControlPoint, PointRole};
pub use util::{segments_fold_back, segments_intersect, SEGMENT_EPS};
