//! Nine-block layout for transfinite meshing.
//!
//! The duct is cut horizontally at the throat-top elevation and vertically at
//! every station. Upstream of the throat each streamwise span has a lower and
//! an upper block; the throat has one block under the cowl, and the cowl and
//! wake blocks sit above it.

use super::builder::{Layout, Topology, TopologyBuilder};
use super::types::{CurveRole, Direction, OrientedCurve, Span, Tier};
use crate::error::TopologyError;
use crate::geom::{InletGeometry, PointRole};

pub fn build_blocks(geo: &InletGeometry) -> Result<Topology, TopologyError> {
    use CurveRole::*;
    use Direction::{Streamwise as S, WallNormal as N};
    use PointRole as P;

    let mut b = TopologyBuilder::new(Layout::Blocks);
    let mut pt = |role: PointRole| b.add_point(geo.point(role));

    // lower wall
    let p1 = pt(P::InletBottom);
    let p2 = pt(P::RampStart);
    let p3 = pt(P::RampKink);
    let p4 = pt(P::RampEnd);
    let p5 = pt(P::OutletBottom);
    // split line
    let p6 = pt(P::SplitInlet);
    let p7 = pt(P::SplitRampStart);
    let p8 = pt(P::SplitKink);
    let p9 = pt(P::CowlLip);
    // cowl
    let p10 = pt(P::CowlTip);
    let p11 = pt(P::CowlBack);
    let p12 = pt(P::OutletTop);
    // top
    let p13 = pt(P::FarfieldInlet);
    let p14 = pt(P::TopRampStart);
    let p15 = pt(P::TopKink);
    let p16 = pt(P::TopLip);
    let p17 = pt(P::TopCowlTip);
    let p18 = pt(P::FarfieldOutlet);

    // streamwise curves
    let bottom = b.add_curve("bottom", p1, p2, Bottom, Some(S(Span::PreRamp)));
    let ramp_1 = b.add_curve("ramp-1", p2, p3, Wall, Some(S(Span::RampFirst)));
    let ramp_2 = b.add_curve("ramp-2", p3, p4, Wall, Some(S(Span::RampSecond)));
    let floor = b.add_curve("throat-floor", p4, p5, Wall, Some(S(Span::Throat)));

    let mid_1 = b.add_curve("mid-1", p6, p7, InternalSplit, Some(S(Span::PreRamp)));
    let mid_2 = b.add_curve("mid-2", p7, p8, InternalSplit, Some(S(Span::RampFirst)));
    let mid_3 = b.add_curve("mid-3", p8, p9, InternalSplit, Some(S(Span::RampSecond)));
    let roof = b.add_curve("throat-roof", p12, p9, Wall, Some(S(Span::Throat)));

    let cowl_outer = b.add_curve("cowl-outer", p9, p10, Wall, Some(S(Span::Cowl)));
    let cowl_back = b.add_curve("cowl-back", p10, p11, Wall, Some(S(Span::Wake)));

    let top_1 = b.add_curve("top-1", p13, p14, Top, Some(S(Span::PreRamp)));
    let top_2 = b.add_curve("top-2", p14, p15, Top, Some(S(Span::RampFirst)));
    let top_3 = b.add_curve("top-3", p15, p16, Top, Some(S(Span::RampSecond)));
    let top_4 = b.add_curve("top-4", p16, p17, Top, Some(S(Span::Cowl)));
    let top_5 = b.add_curve("top-5", p17, p18, Top, Some(S(Span::Wake)));

    // wall-normal curves
    let inlet_lo = b.add_curve("inlet-lower", p1, p6, Inlet, Some(N(Tier::Lower)));
    let inlet_up = b.add_curve("inlet-upper", p6, p13, Inlet, Some(N(Tier::Upper)));
    let v1_lo = b.add_curve("ramp-start-lower", p2, p7, InternalSplit, Some(N(Tier::Lower)));
    let v1_up = b.add_curve("ramp-start-upper", p7, p14, InternalSplit, Some(N(Tier::Upper)));
    let v2_lo = b.add_curve("kink-lower", p3, p8, InternalSplit, Some(N(Tier::Lower)));
    let v2_up = b.add_curve("kink-upper", p8, p15, InternalSplit, Some(N(Tier::Upper)));
    let throat_in = b.add_curve("throat-inlet", p4, p9, InternalSplit, Some(N(Tier::Throat)));
    let v3 = b.add_curve("lip-upper", p9, p16, InternalSplit, Some(N(Tier::Upper)));
    let v4 = b.add_curve("shoulder-upper", p10, p17, InternalSplit, Some(N(Tier::Upper)));
    let outlet = b.add_curve("outlet", p5, p12, Outlet, Some(N(Tier::Throat)));
    let ext_out = b.add_curve("exterior-outlet", p11, p18, ExteriorOutlet, Some(N(Tier::Upper)));

    let f = OrientedCurve::forward;
    let r = OrientedCurve::reversed;
    let blocks = [
        ("pre-ramp-lower", [f(bottom), f(v1_lo), r(mid_1), r(inlet_lo)], [p1, p2, p7, p6]),
        ("ramp-1-lower", [f(ramp_1), f(v2_lo), r(mid_2), r(v1_lo)], [p2, p3, p8, p7]),
        ("ramp-2-lower", [f(ramp_2), f(throat_in), r(mid_3), r(v2_lo)], [p3, p4, p9, p8]),
        ("throat", [f(floor), f(outlet), f(roof), r(throat_in)], [p4, p5, p12, p9]),
        ("pre-ramp-upper", [f(mid_1), f(v1_up), r(top_1), r(inlet_up)], [p6, p7, p14, p13]),
        ("ramp-1-upper", [f(mid_2), f(v2_up), r(top_2), r(v1_up)], [p7, p8, p15, p14]),
        ("ramp-2-upper", [f(mid_3), f(v3), r(top_3), r(v2_up)], [p8, p9, p16, p15]),
        ("cowl", [f(cowl_outer), f(v4), r(top_4), r(v3)], [p9, p10, p17, p16]),
        ("wake", [f(cowl_back), f(ext_out), r(top_5), r(v4)], [p10, p11, p18, p17]),
    ];
    for (label, sides, corners) in blocks {
        b.add_surface(label, sides.to_vec(), Some(corners));
    }
    b.finish()
}
