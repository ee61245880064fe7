//! Single-loop layout for free (unstructured) meshing.

use super::builder::{Layout, Topology, TopologyBuilder};
use super::types::{CurveRole, OrientedCurve};
use crate::error::TopologyError;
use crate::geom::{InletGeometry, PointRole};

/// Loop segments as `(label, role)`; segment `k` runs from
/// `PointRole::BOUNDARY_LOOP[k]` to the next point, the last one closing the loop.
const SEGMENTS: [(&str, CurveRole); 11] = [
    ("bottom", CurveRole::Bottom),
    ("ramp-1", CurveRole::Wall),
    ("ramp-2", CurveRole::Wall),
    ("throat-floor", CurveRole::Wall),
    ("outlet", CurveRole::Outlet),
    ("throat-roof", CurveRole::Wall),
    ("cowl-outer", CurveRole::Wall),
    ("cowl-back", CurveRole::Wall),
    ("exterior-outlet", CurveRole::ExteriorOutlet),
    ("top", CurveRole::Top),
    ("inlet", CurveRole::Inlet),
];

/// Build one closed loop through every boundary point and one surface.
pub fn build_loop(geo: &InletGeometry) -> Result<Topology, TopologyError> {
    let mut b = TopologyBuilder::new(Layout::Loop);
    let ids: Vec<_> = PointRole::BOUNDARY_LOOP
        .iter()
        .map(|&role| b.add_point(geo.point(role)))
        .collect();
    let n = ids.len();
    let mut sides = Vec::with_capacity(n);
    for (k, (label, role)) in SEGMENTS.iter().enumerate() {
        let c = b.add_curve(*label, ids[k], ids[(k + 1) % n], *role, None);
        sides.push(OrientedCurve::forward(c));
    }
    b.add_surface("fluid", sides, None);
    b.finish()
}
