use super::*;
use crate::error::{InletError, TopologyError};
use crate::geom::{resolve, ControlPoint, InletGeometry, PointRole};
use crate::params::{InletConfig, InletSpec, StructuredParams, UnstructuredParams, UnstructuredSizing};
use crate::presets;
use crate::testutil::ramp_params;
use crate::topology::{
    build_blocks, build_loop, CurveRole, Layout, OrientedCurve, PointId, Topology, TopologyBuilder,
};
use nalgebra::vector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn geometry(cfg: &InletConfig) -> InletGeometry {
    resolve(&InletSpec::new(&cfg.geometry).unwrap()).unwrap()
}

fn structured(cfg: &InletConfig) -> &StructuredParams {
    match &cfg.mesh {
        MeshMode::Structured(p) => p,
        MeshMode::Unstructured(_) => panic!("structured preset expected"),
    }
}

fn unstructured(cfg: &InletConfig) -> &UnstructuredParams {
    match &cfg.mesh {
        MeshMode::Unstructured(p) => p,
        MeshMode::Structured(_) => panic!("unstructured preset expected"),
    }
}

fn nodes(topo: &Topology, plan: &TransfinitePlan, label: &str) -> (usize, Grading) {
    let r = plan.resolution(topo.find_curve(label).unwrap()).unwrap();
    (r.nodes, r.grading)
}

#[test]
fn reference_case_node_counts() {
    let cfg = presets::mach5_structured();
    let geo = geometry(&cfg);
    let topo = build_blocks(&geo).unwrap();
    let plan = plan_transfinite(&geo, &topo, structured(&cfg)).unwrap();

    assert!((plan.dx - 1.05 / 1024.0).abs() < 1e-15);
    assert_eq!(plan.curves.len(), 26);
    assert_eq!(plan.blocks.len(), 9);
    for (label, expected) in [
        ("bottom", 49),
        ("ramp-1", 343),
        ("ramp-2", 188),
        ("cowl-outer", 90),
        ("cowl-back", 354),
        ("throat-floor", 444),
        ("throat-roof", 444),
    ] {
        assert_eq!(nodes(&topo, &plan, label), (expected, Grading::Uniform), "{label}");
    }
    assert_eq!(
        nodes(&topo, &plan, "inlet-lower"),
        (380, Grading::Progression(1.005))
    );
    assert_eq!(nodes(&topo, &plan, "throat-inlet"), (380, Grading::Bump(0.05)));
    assert_eq!(nodes(&topo, &plan, "outlet"), (380, Grading::Bump(0.05)));
}

#[test]
fn streamwise_spans_agree_across_elevations() {
    let cfg = presets::mach5_structured();
    let geo = geometry(&cfg);
    let topo = build_blocks(&geo).unwrap();
    let plan = plan_transfinite(&geo, &topo, structured(&cfg)).unwrap();
    for span_curves in [
        ["bottom", "mid-1", "top-1"],
        ["ramp-1", "mid-2", "top-2"],
        ["ramp-2", "mid-3", "top-3"],
    ] {
        let counts: Vec<_> = span_curves.iter().map(|l| nodes(&topo, &plan, l).0).collect();
        assert!(counts.windows(2).all(|w| w[0] == w[1]), "{span_curves:?}: {counts:?}");
    }
}

#[test]
fn shared_edges_carry_one_count_in_every_block() {
    let cfg = presets::mach5_structured();
    let geo = geometry(&cfg);
    let topo = build_blocks(&geo).unwrap();
    let plan = plan_transfinite(&geo, &topo, structured(&cfg)).unwrap();
    for &c in topo.roles().get(CurveRole::InternalSplit) {
        let seen: Vec<usize> = plan
            .blocks
            .iter()
            .flat_map(|b| topo.surfaces()[b.0].boundary.iter())
            .filter(|oc| oc.curve == c)
            .map(|oc| plan.resolution(oc.curve).unwrap().nodes)
            .collect();
        assert_eq!(seen.len(), 2, "{}", topo.curve(c).label);
        assert_eq!(seen[0], seen[1]);
    }
    assert_eq!(check_conforming(&topo, &plan), Ok(()));
}

#[test]
fn mismatched_opposing_sides_are_reported() {
    let cfg = presets::mach5_structured();
    let geo = geometry(&cfg);
    let topo = build_blocks(&geo).unwrap();
    let mut plan = plan_transfinite(&geo, &topo, structured(&cfg)).unwrap();
    let top_4 = topo.find_curve("top-4").unwrap();
    plan.curves[top_4.0].nodes += 1;
    match check_conforming(&topo, &plan) {
        Err(TopologyError::NodeCountMismatch {
            block,
            first,
            second,
            counts,
        }) => {
            assert_eq!(block, "cowl");
            assert_eq!((first.as_str(), second.as_str()), ("cowl-outer", "top-4"));
            assert_eq!(counts, (90, 91));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn span_shorter_than_two_cells_fails_fast() {
    let cfg = presets::mach5_structured();
    let geo = geometry(&cfg);
    let topo = build_blocks(&geo).unwrap();
    // dx = 1.05/20 leaves the 0.05-long pre-ramp span with a single node.
    let params = StructuredParams {
        target_streamwise_cells: 20,
        ..StructuredParams::default()
    };
    match plan_transfinite(&geo, &topo, &params) {
        Err(InletError::Config(e)) => {
            assert_eq!(e.parameter, "target_streamwise_cells");
            assert!(e.reason.contains("pre-ramp"), "{}", e.reason);
        }
        other => panic!("unexpected: {other:?}"),
    }
    let zero = StructuredParams {
        target_streamwise_cells: 0,
        ..StructuredParams::default()
    };
    assert!(matches!(
        plan_transfinite(&geo, &topo, &zero),
        Err(InletError::Config(_))
    ));
}

#[test]
fn transfinite_plan_needs_blocks() {
    let cfg = presets::mach5_structured();
    let geo = geometry(&cfg);
    let single = build_loop(&geo).unwrap();
    assert!(matches!(
        plan_transfinite(&geo, &single, structured(&cfg)),
        Err(InletError::Topology(TopologyError::BlockSides { sides: 11, .. }))
    ));
}

#[test]
fn node_counts_are_reproducible() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..32 {
        let a1: f64 = rng.gen_range(4.0..20.0);
        let a2: f64 = a1 + rng.gen_range(4.0..20.0);
        let ramp_length: f64 = rng.gen_range(0.4..0.9);
        let (t1, t2) = (a1.to_radians().tan(), a2.to_radians().tan());
        let frac: f64 = rng.gen_range(0.2..0.8);
        let ramp_height = ramp_length * (t1 + frac * (t2 - t1));
        let params = StructuredParams {
            target_streamwise_cells: rng.gen_range(200..2000),
            ..StructuredParams::default()
        };
        let spec = InletSpec::new(&ramp_params(a1, a2, ramp_length, ramp_height)).unwrap();
        let run = || {
            let geo = resolve(&spec).unwrap();
            let topo = build_blocks(&geo).unwrap();
            plan_transfinite(&geo, &topo, &params).map(|p| p.curves)
        };
        match (run(), run()) {
            (Ok(a), Ok(b)) => assert_eq!(a, b),
            (Err(a), Err(b)) => assert_eq!(a.to_string(), b.to_string()),
            (a, b) => panic!("runs disagree: {a:?} vs {b:?}"),
        }
    }
}

#[test]
fn threshold_fields_follow_wall_distance() {
    let cfg = presets::mach1_5_threshold();
    let geo = geometry(&cfg);
    let topo = build_loop(&geo).unwrap();
    let wall = estimate_wall(&cfg.flow).unwrap();
    let plan = plan_fields(&geo, &topo, unstructured(&cfg), &wall).unwrap();

    let background = plan.background.unwrap();
    assert!(plan.boundary_layer.is_none());
    assert_eq!(plan.fields.len(), 2);
    assert!(plan.get_field(FieldId(2)).is_none());
    let Field::Threshold {
        input,
        size_min,
        size_max,
        dist_min,
        dist_max,
    } = *plan.field(background)
    else {
        panic!("threshold expected as background");
    };
    let s = 1.0 / 150.0;
    assert!((size_min - 0.05 * s).abs() < 1e-15);
    assert!((size_max - 0.5 * s).abs() < 1e-15);
    assert!((dist_min - 6.0 * s).abs() < 1e-15);
    assert!((dist_max - 80.0 * s).abs() < 1e-15);
    let Field::Distance { curves } = plan.field(input) else {
        panic!("distance field expected as threshold input");
    };
    let labels: Vec<_> = curves.iter().map(|&c| topo.curve(c).label).collect();
    assert_eq!(
        labels,
        ["bottom", "ramp-1", "ramp-2", "throat-floor", "throat-roof", "cowl-outer", "cowl-back"]
    );

    let size_at = |role| plan.point_sizes[topo.find_point(role).unwrap().0].unwrap();
    assert_eq!(size_at(PointRole::InletBottom), size_min);
    assert_eq!(size_at(PointRole::CowlTip), size_min);
    assert_eq!(size_at(PointRole::OutletBottom), size_min);
    assert_eq!(size_at(PointRole::FarfieldInlet), size_max);
    assert_eq!(size_at(PointRole::FarfieldOutlet), size_max);
}

#[test]
fn threshold_wall_size_defaults_to_wall_estimate() {
    let cfg = presets::mach1_5_threshold();
    let geo = geometry(&cfg);
    let topo = build_loop(&geo).unwrap();
    let wall = estimate_wall(&cfg.flow).unwrap();
    let mut params = unstructured(&cfg).clone();
    if let UnstructuredSizing::Threshold { lc_wall, .. } = &mut params.sizing {
        *lc_wall = None;
    }
    let plan = plan_fields(&geo, &topo, &params, &wall).unwrap();
    let Field::Threshold { size_min, .. } = plan.fields[1] else {
        panic!("threshold expected");
    };
    assert_eq!(size_min, wall.first_cell_height);
}

#[test]
fn inverted_threshold_bands_are_rejected() {
    let cfg = presets::mach1_5_threshold();
    let geo = geometry(&cfg);
    let topo = build_loop(&geo).unwrap();
    let wall = estimate_wall(&cfg.flow).unwrap();
    let mut params = unstructured(&cfg).clone();
    if let UnstructuredSizing::Threshold { dist_max, .. } = &mut params.sizing {
        *dist_max = 3.0;
    }
    assert_eq!(
        plan_fields(&geo, &topo, &params, &wall).unwrap_err().parameter,
        "dist_max"
    );
}

#[test]
fn boundary_layer_end_and_fan_points() {
    let cfg = presets::mach5_unstructured();
    let geo = geometry(&cfg);
    let topo = build_loop(&geo).unwrap();
    let wall = estimate_wall(&cfg.flow).unwrap();
    let plan = plan_fields(&geo, &topo, unstructured(&cfg), &wall).unwrap();

    assert!(plan.background.is_none());
    let Field::BoundaryLayer(bl) = plan.field(plan.boundary_layer.unwrap()) else {
        panic!("boundary layer expected");
    };
    let roles = |ids: &[PointId]| ids.iter().map(|&p| topo.point(p).role).collect::<Vec<_>>();
    assert_eq!(
        roles(&bl.end_points),
        [
            PointRole::InletBottom,
            PointRole::OutletBottom,
            PointRole::OutletTop,
            PointRole::CowlBack
        ]
    );
    assert_eq!(roles(&bl.fan_points), [PointRole::CowlLip]);
    assert_eq!(bl.curves.len(), 7);
    let s = 1.0 / 150.0;
    assert!((bl.first_height - 0.02 * s).abs() < 1e-15);
    assert!((bl.thickness - s).abs() < 1e-15);
    assert_eq!(bl.ratio, 1.1);
    assert!(bl.quads);
    assert!(plan
        .point_sizes
        .iter()
        .all(|lc| (lc.unwrap() - 0.5 * s).abs() < 1e-15));
}

#[test]
fn fan_points_must_sit_on_layer_curves() {
    let cfg = presets::mach5_unstructured();
    let geo = geometry(&cfg);
    let topo = build_loop(&geo).unwrap();
    let wall = estimate_wall(&cfg.flow).unwrap();
    for bad in [PointRole::FarfieldInlet, PointRole::SplitKink] {
        let mut params = unstructured(&cfg).clone();
        if let UnstructuredSizing::BoundaryLayer { fan_points, .. } = &mut params.sizing {
            fan_points.push(bad);
        }
        let err = plan_fields(&geo, &topo, &params, &wall).unwrap_err();
        assert_eq!(err.parameter, "fan_points");
        assert!(err.reason.contains(bad.as_str()));
    }
}

#[test]
fn layer_thinner_than_first_cell_is_rejected() {
    let cfg = presets::mach5_unstructured();
    let geo = geometry(&cfg);
    let topo = build_loop(&geo).unwrap();
    let wall = estimate_wall(&cfg.flow).unwrap();
    let mut params = unstructured(&cfg).clone();
    if let UnstructuredSizing::BoundaryLayer { thickness, .. } = &mut params.sizing {
        *thickness = 0.01;
    }
    assert_eq!(
        plan_fields(&geo, &topo, &params, &wall).unwrap_err().parameter,
        "thickness"
    );
}

#[test]
fn plan_dispatches_on_mode_and_sets_options() {
    let cfg = presets::mach5_structured();
    let geo = geometry(&cfg);
    let topo = build_blocks(&geo).unwrap();
    let sizing = plan(&geo, &topo, &cfg.mesh, &cfg.flow).unwrap();
    assert!(matches!(sizing.resolution, Resolution::Transfinite(_)));
    assert_eq!(
        sizing.options,
        MeshOptions {
            algorithm: None,
            recombine_all: true,
            smoothing: Some(10)
        }
    );

    let cfg = presets::mach5_unstructured();
    let geo = geometry(&cfg);
    let topo = build_loop(&geo).unwrap();
    let sizing = plan(&geo, &topo, &cfg.mesh, &cfg.flow).unwrap();
    assert!(matches!(sizing.resolution, Resolution::Fields(_)));
    assert_eq!(sizing.options.algorithm, Some(6));
    assert!(!sizing.options.recombine_all);
    assert!(sizing.wall.first_cell_height > 0.0);
}

#[test]
fn block_curve_without_direction_has_no_count() {
    let cfg = presets::mach5_structured();
    let geo = geometry(&cfg);
    let mut b = TopologyBuilder::new(Layout::Blocks);
    let p = [
        (PointRole::InletBottom, vector![0.0, 0.0]),
        (PointRole::RampStart, vector![1.0, 0.0]),
        (PointRole::CowlBack, vector![1.0, 1.0]),
        (PointRole::FarfieldInlet, vector![0.0, 1.0]),
    ]
    .map(|(role, pos)| b.add_point(ControlPoint::new(role, pos)));
    let sides = [(0, 1), (1, 2), (2, 3), (3, 0)]
        .map(|(i, j)| OrientedCurve::forward(b.add_curve("edge", p[i], p[j], CurveRole::Wall, None)))
        .to_vec();
    b.add_surface("square", sides, Some(p));
    let topo = b.finish().unwrap();
    assert_eq!(
        plan_transfinite(&geo, &topo, structured(&cfg)).unwrap_err().to_string(),
        "topology error: curve `edge` has no transfinite node count"
    );
}
