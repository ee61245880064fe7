//! Background fields for free meshing.

use super::directives::{BoundaryLayer, Field, FieldId, FieldPlan};
use super::wall::WallEstimate;
use crate::error::ConfigError;
use crate::geom::InletGeometry;
use crate::params::{sizing_length, UnstructuredParams, UnstructuredSizing};
use crate::topology::{CurveId, CurveRole, PointId, Topology};

fn layer_roles(include_bottom: bool) -> Vec<CurveRole> {
    if include_bottom {
        vec![CurveRole::Bottom, CurveRole::Wall]
    } else {
        vec![CurveRole::Wall]
    }
}

fn touches(topo: &Topology, curves: &[CurveId], p: PointId) -> bool {
    curves.iter().any(|&c| {
        let curve = topo.curve(c);
        curve.start == p || curve.end == p
    })
}

/// Points where a layer curve meets a boundary curve that carries no layer.
pub fn layer_end_points(topo: &Topology, layer: &[CurveId]) -> Vec<PointId> {
    let others: Vec<CurveId> = topo
        .curve_ids()
        .filter(|c| topo.curve(*c).role.is_boundary() && !layer.contains(c))
        .collect();
    topo.point_ids()
        .filter(|&p| touches(topo, layer, p) && touches(topo, &others, p))
        .collect()
}

pub fn plan_fields(
    geo: &InletGeometry,
    topo: &Topology,
    params: &UnstructuredParams,
    wall: &WallEstimate,
) -> Result<FieldPlan, ConfigError> {
    let spec = &geo.spec;
    match &params.sizing {
        UnstructuredSizing::Threshold {
            lc_wall,
            lc_far,
            dist_min,
            dist_max,
            include_bottom,
        } => {
            let size_min = match lc_wall {
                Some(v) => sizing_length(spec, "lc_wall", *v)?,
                None => wall.first_cell_height,
            };
            let size_max = sizing_length(spec, "lc_far", *lc_far)?;
            let dist_min = sizing_length(spec, "dist_min", *dist_min)?;
            let dist_max = sizing_length(spec, "dist_max", *dist_max)?;
            if size_min > size_max {
                return Err(ConfigError::new(
                    "lc_far",
                    format!("far size {size_max:.3e} is finer than wall size {size_min:.3e}"),
                ));
            }
            if dist_min >= dist_max {
                return Err(ConfigError::new(
                    "dist_max",
                    format!("must exceed dist_min ({dist_max:.3e} <= {dist_min:.3e})"),
                ));
            }
            let walls = topo.roles().union(&layer_roles(*include_bottom));
            let point_sizes = topo
                .point_ids()
                .map(|p| Some(if touches(topo, &walls, p) { size_min } else { size_max }))
                .collect();
            Ok(FieldPlan {
                point_sizes,
                fields: vec![
                    Field::Distance { curves: walls },
                    Field::Threshold {
                        input: FieldId(0),
                        size_min,
                        size_max,
                        dist_min,
                        dist_max,
                    },
                ],
                background: Some(FieldId(1)),
                boundary_layer: None,
            })
        }
        UnstructuredSizing::BoundaryLayer {
            lc_base,
            first_height,
            ratio,
            thickness,
            quads,
            include_bottom,
            fan_points,
        } => {
            let lc_base = sizing_length(spec, "lc_base", *lc_base)?;
            let first_height = match first_height {
                Some(v) => sizing_length(spec, "first_height", *v)?,
                None => wall.first_cell_height,
            };
            let thickness = sizing_length(spec, "thickness", *thickness)?;
            if !(ratio.is_finite() && *ratio >= 1.0) {
                return Err(ConfigError::new(
                    "ratio",
                    format!("growth ratio must be finite and >= 1, got {ratio}"),
                ));
            }
            if thickness <= first_height {
                return Err(ConfigError::new(
                    "thickness",
                    format!(
                        "layer thickness {thickness:.3e} does not exceed first height {first_height:.3e}"
                    ),
                ));
            }
            let curves = topo.roles().union(&layer_roles(*include_bottom));
            let mut fans = Vec::with_capacity(fan_points.len());
            for role in fan_points {
                let p = topo
                    .find_point(*role)
                    .filter(|&p| touches(topo, &curves, p))
                    .ok_or_else(|| {
                        ConfigError::new(
                            "fan_points",
                            format!("`{role}` is not a corner of any boundary-layer curve"),
                        )
                    })?;
                fans.push(p);
            }
            let end_points = layer_end_points(topo, &curves);
            Ok(FieldPlan {
                point_sizes: vec![Some(lc_base); topo.points().len()],
                fields: vec![Field::BoundaryLayer(BoundaryLayer {
                    curves,
                    end_points,
                    fan_points: fans,
                    first_height,
                    ratio: *ratio,
                    thickness,
                    quads: *quads,
                })],
                background: None,
                boundary_layer: Some(FieldId(0)),
            })
        }
    }
}
