use super::*;
use crate::error::TopologyError;
use crate::geom::{resolve, ControlPoint, InletGeometry, PointRole};
use crate::params::InletSpec;
use crate::presets;
use crate::testutil::ramp_params;
use nalgebra::vector;
use proptest::prelude::*;

fn reference_geometry() -> InletGeometry {
    let spec = InletSpec::new(&presets::di_vanna_params()).unwrap();
    resolve(&spec).unwrap()
}

#[test]
fn loop_layout_is_closed_and_tagged() {
    let topo = build_loop(&reference_geometry()).unwrap();
    assert_eq!(topo.layout(), Layout::Loop);
    assert_eq!(topo.curves().len(), 11);
    assert_eq!(topo.surfaces().len(), 1);
    let pts = topo.loop_points(SurfaceId(0));
    assert_eq!(pts.len(), 12);
    assert_eq!(pts.first(), pts.last());

    let roles = topo.roles();
    let walls: Vec<_> = roles
        .get(CurveRole::Wall)
        .iter()
        .map(|&c| topo.curve(c).label)
        .collect();
    assert_eq!(
        walls,
        ["ramp-1", "ramp-2", "throat-floor", "throat-roof", "cowl-outer", "cowl-back"]
    );
    assert_eq!(roles.get(CurveRole::Outlet).len(), 1);
    assert!(roles.get(CurveRole::InternalSplit).is_empty());
}

#[test]
fn block_layout_shares_internal_edges_exactly_twice() {
    let topo = build_blocks(&reference_geometry()).unwrap();
    assert_eq!(topo.layout(), Layout::Blocks);
    assert_eq!(topo.surfaces().len(), 9);
    assert_eq!(topo.curves().len(), 26);
    assert!(topo.surfaces().iter().all(|s| s.is_block()));
    for id in topo.curve_ids() {
        let expected = if topo.curve(id).role.is_boundary() { 1 } else { 2 };
        assert_eq!(topo.surface_count(id), expected, "{}", topo.curve(id).label);
    }
    assert_eq!(topo.roles().get(CurveRole::InternalSplit).len(), 10);
    // Streamwise curves on the three elevations share their span tag.
    let span_of = |label: &str| topo.curve(topo.find_curve(label).unwrap()).direction;
    assert_eq!(span_of("ramp-1"), span_of("mid-2"));
    assert_eq!(span_of("mid-2"), span_of("top-2"));
}

#[test]
fn block_corners_sit_on_split_and_top() {
    let geo = reference_geometry();
    let topo = build_blocks(&geo).unwrap();
    let split = topo.find_point(PointRole::SplitKink).unwrap();
    assert!((topo.point(split).pos.y - geo.stations.y_throat).abs() < 1e-15);
    assert!((topo.point(split).pos.x - geo.stations.x_kink).abs() < 1e-15);
    let throat = &topo.surfaces()[3];
    assert_eq!(throat.label, "throat");
    let corners = throat.corners.unwrap();
    assert_eq!(topo.point(corners[0]).role, PointRole::RampEnd);
    assert_eq!(topo.point(corners[2]).role, PointRole::OutletTop);
}

fn square_builder() -> (TopologyBuilder, [PointId; 4]) {
    let mut b = TopologyBuilder::new(Layout::Loop);
    let p = [
        b.add_point(ControlPoint::new(PointRole::InletBottom, vector![0.0, 0.0])),
        b.add_point(ControlPoint::new(PointRole::RampStart, vector![1.0, 0.0])),
        b.add_point(ControlPoint::new(PointRole::CowlBack, vector![1.0, 1.0])),
        b.add_point(ControlPoint::new(PointRole::FarfieldInlet, vector![0.0, 1.0])),
    ];
    (b, p)
}

#[test]
fn bowtie_loop_is_rejected() {
    let (mut b, p) = square_builder();
    // 0 -> 1 -> 3 -> 2 -> 0 crosses itself.
    let c0 = b.add_curve("a", p[0], p[1], CurveRole::Wall, None);
    let c1 = b.add_curve("b", p[1], p[3], CurveRole::Wall, None);
    let c2 = b.add_curve("c", p[3], p[2], CurveRole::Wall, None);
    let c3 = b.add_curve("d", p[2], p[0], CurveRole::Wall, None);
    let sides = [c0, c1, c2, c3].map(OrientedCurve::forward).to_vec();
    b.add_surface("bowtie", sides, None);
    assert!(matches!(
        b.finish(),
        Err(TopologyError::SelfIntersection { .. })
    ));
}

#[test]
fn foreign_handles_are_not_resolved() {
    let topo = build_loop(&reference_geometry()).unwrap();
    assert_eq!(topo.get_point(PointId(10)).map(|p| p.role), Some(PointRole::FarfieldInlet));
    assert!(topo.get_point(PointId(11)).is_none());
    assert!(topo.get_curve(CurveId(11)).is_none());
}

#[test]
#[should_panic]
fn foreign_point_handle_panics() {
    let topo = build_loop(&reference_geometry()).unwrap();
    let _ = topo.point(PointId(11));
}

#[test]
fn consecutive_sides_folding_back_are_rejected() {
    let mut b = TopologyBuilder::new(Layout::Loop);
    let p0 = b.add_point(ControlPoint::new(PointRole::InletBottom, vector![0.0, 0.0]));
    let p1 = b.add_point(ControlPoint::new(PointRole::RampStart, vector![2.0, 0.0]));
    let p2 = b.add_point(ControlPoint::new(PointRole::RampKink, vector![1.0, 0.0]));
    let c0 = b.add_curve("a", p0, p1, CurveRole::Wall, None);
    let c1 = b.add_curve("b", p1, p2, CurveRole::Wall, None);
    let c2 = b.add_curve("c", p2, p0, CurveRole::Wall, None);
    b.add_surface("sliver", [c0, c1, c2].map(OrientedCurve::forward).to_vec(), None);
    assert_eq!(
        b.finish().unwrap_err(),
        TopologyError::SelfIntersection {
            surface: "sliver".into(),
            first: "a".into(),
            second: "b".into()
        }
    );

    // A proper triangle with the same first side is accepted.
    let mut b = TopologyBuilder::new(Layout::Loop);
    let p0 = b.add_point(ControlPoint::new(PointRole::InletBottom, vector![0.0, 0.0]));
    let p1 = b.add_point(ControlPoint::new(PointRole::RampStart, vector![2.0, 0.0]));
    let p2 = b.add_point(ControlPoint::new(PointRole::RampKink, vector![1.0, 1.0]));
    let c0 = b.add_curve("a", p0, p1, CurveRole::Wall, None);
    let c1 = b.add_curve("b", p1, p2, CurveRole::Wall, None);
    let c2 = b.add_curve("c", p2, p0, CurveRole::Wall, None);
    b.add_surface("triangle", [c0, c1, c2].map(OrientedCurve::forward).to_vec(), None);
    assert!(b.finish().is_ok());
}

#[test]
fn open_loop_and_short_block_are_rejected() {
    let (mut b, p) = square_builder();
    let c0 = b.add_curve("a", p[0], p[1], CurveRole::Wall, None);
    let c1 = b.add_curve("b", p[1], p[2], CurveRole::Wall, None);
    let c2 = b.add_curve("c", p[3], p[0], CurveRole::Wall, None);
    b.add_surface("gap", [c0, c1, c2].map(OrientedCurve::forward).to_vec(), None);
    assert_eq!(
        b.finish().unwrap_err(),
        TopologyError::OpenLoop {
            surface: "gap".into(),
            at: 1
        }
    );

    let (mut b, p) = square_builder();
    let c0 = b.add_curve("a", p[0], p[1], CurveRole::Wall, None);
    let c1 = b.add_curve("b", p[1], p[2], CurveRole::Wall, None);
    let c2 = b.add_curve("c", p[2], p[0], CurveRole::Wall, None);
    b.add_surface(
        "tri",
        [c0, c1, c2].map(OrientedCurve::forward).to_vec(),
        Some([p[0], p[1], p[2], p[3]]),
    );
    assert!(matches!(
        b.finish(),
        Err(TopologyError::BlockSides { sides: 3, .. })
    ));
}

#[test]
fn coincident_points_are_rejected() {
    let (mut b, _) = square_builder();
    b.add_point(ControlPoint::new(PointRole::CowlTip, vector![1.0, 1.0]));
    assert!(matches!(
        b.finish(),
        Err(TopologyError::CoincidentPoints { .. })
    ));
}

#[test]
fn unreferenced_internal_split_is_rejected() {
    let (mut b, p) = square_builder();
    let sides = [(0, 1), (1, 2), (2, 3), (3, 0)]
        .map(|(i, j)| OrientedCurve::forward(b.add_curve("edge", p[i], p[j], CurveRole::Wall, None)))
        .to_vec();
    b.add_curve("dangling", p[0], p[2], CurveRole::InternalSplit, None);
    b.add_surface("square", sides, None);
    assert!(matches!(
        b.finish(),
        Err(TopologyError::SharedEdge { surfaces: 0, .. })
    ));
}

proptest! {
    #[test]
    fn both_layouts_build_for_valid_ramps(
        a1 in 2.0f64..30.0,
        delta in 2.0f64..30.0,
        ramp_length in 0.2f64..1.0,
        frac in 0.1f64..0.9,
    ) {
        let a2 = a1 + delta;
        let (t1, t2) = (a1.to_radians().tan(), a2.to_radians().tan());
        let ramp_height = ramp_length * (t1 + frac * (t2 - t1));
        let spec = InletSpec::new(&ramp_params(a1, a2, ramp_length, ramp_height)).unwrap();
        let geo = resolve(&spec).unwrap();
        let single = build_loop(&geo).unwrap();
        let pts = single.loop_points(SurfaceId(0));
        prop_assert_eq!(pts.first(), pts.last());
        let blocks = build_blocks(&geo).unwrap();
        prop_assert_eq!(blocks.surfaces().len(), 9);
    }
}
