//! Transfinite node counts from a global streamwise spacing.
//!
//! `dx = domain_length / target_streamwise_cells`; a streamwise span of
//! length `s` gets `round(s/dx)` nodes, using the span's x-extent so that the
//! ramp, the split line and the top boundary agree. The throat floor and roof
//! take the cowl count plus the wake count. Wall-normal curves use a
//! geometric progression, except across the throat where a bump law
//! resolves both the ramp-side and cowl-side shear layers.

use super::directives::{CurveResolution, Grading, TransfinitePlan};
use crate::error::{ConfigError, InletError, TopologyError};
use crate::geom::InletGeometry;
use crate::params::StructuredParams;
use crate::topology::{Direction, Span, Tier, Topology};

/// A transfinite curve needs both end nodes.
pub const MIN_NODES: usize = 2;

fn span_length(geo: &InletGeometry, span: Span) -> f64 {
    let s = &geo.stations;
    match span {
        Span::PreRamp => s.x_ramp_start - s.x_start,
        Span::RampFirst => s.x_kink - s.x_ramp_start,
        Span::RampSecond => s.x_throat_start - s.x_kink,
        Span::Cowl => s.x_cowl_tip - s.x_throat_start,
        Span::Wake => s.x_end - s.x_cowl_tip,
        Span::Throat => s.x_end - s.x_throat_start,
    }
}

fn span_name(span: Span) -> &'static str {
    match span {
        Span::PreRamp => "pre-ramp",
        Span::RampFirst => "ramp-1",
        Span::RampSecond => "ramp-2",
        Span::Cowl => "cowl",
        Span::Wake => "wake",
        Span::Throat => "throat",
    }
}

/// Node count of a streamwise span; fails rather than clamping.
pub fn span_nodes(geo: &InletGeometry, span: Span, dx: f64) -> Result<usize, ConfigError> {
    if span == Span::Throat {
        return Ok(span_nodes(geo, Span::Cowl, dx)? + span_nodes(geo, Span::Wake, dx)?);
    }
    let length = span_length(geo, span);
    let cells = (length / dx).round();
    if !(cells >= MIN_NODES as f64) {
        return Err(ConfigError::new(
            "target_streamwise_cells",
            format!(
                "span `{}` of length {length:.6} resolves to {cells} nodes at dx = {dx:.6} \
                 (needs at least {MIN_NODES})",
                span_name(span)
            ),
        ));
    }
    Ok(cells as usize)
}

fn validate(p: &StructuredParams) -> Result<(), ConfigError> {
    if p.target_streamwise_cells == 0 {
        return Err(ConfigError::new("target_streamwise_cells", "must be >= 1"));
    }
    if p.ny_bottom < MIN_NODES {
        return Err(ConfigError::new("ny_bottom", format!("must be >= {MIN_NODES}")));
    }
    if p.ny_top < MIN_NODES {
        return Err(ConfigError::new("ny_top", format!("must be >= {MIN_NODES}")));
    }
    if !(p.wall_progression.is_finite() && p.wall_progression > 0.0) {
        return Err(ConfigError::new("wall_progression", "must be finite and > 0"));
    }
    if !(p.throat_bump.is_finite() && p.throat_bump > 0.0) {
        return Err(ConfigError::new("throat_bump", "must be finite and > 0"));
    }
    Ok(())
}

pub fn plan_transfinite(
    geo: &InletGeometry,
    topo: &Topology,
    params: &StructuredParams,
) -> Result<TransfinitePlan, InletError> {
    validate(params)?;
    if let Some(s) = topo.surfaces().iter().find(|s| !s.is_block()) {
        return Err(TopologyError::BlockSides {
            block: s.label.to_string(),
            sides: s.boundary.len(),
        }
        .into());
    }
    let dx = geo.spec.domain_length / params.target_streamwise_cells as f64;

    let mut curves = Vec::with_capacity(topo.curves().len());
    for id in topo.curve_ids() {
        let curve = topo.curve(id);
        let (nodes, grading) = match curve.direction {
            Some(Direction::Streamwise(span)) => (span_nodes(geo, span, dx)?, Grading::Uniform),
            Some(Direction::WallNormal(Tier::Lower)) => {
                (params.ny_bottom, Grading::Progression(params.wall_progression))
            }
            Some(Direction::WallNormal(Tier::Upper)) => {
                (params.ny_top, Grading::Progression(params.wall_progression))
            }
            Some(Direction::WallNormal(Tier::Throat)) => {
                (params.ny_bottom, Grading::Bump(params.throat_bump))
            }
            None => {
                return Err(TopologyError::MissingResolution {
                    curve: curve.label.to_string(),
                }
                .into())
            }
        };
        curves.push(CurveResolution {
            curve: id,
            nodes,
            grading,
        });
    }
    let plan = TransfinitePlan {
        dx,
        curves,
        blocks: topo.surface_ids().collect(),
    };
    check_conforming(topo, &plan)?;
    tracing::debug!(
        dx,
        curves = plan.curves.len(),
        blocks = plan.blocks.len(),
        "transfinite plan ready"
    );
    Ok(plan)
}

/// Every block must be a four-sided surface whose opposing sides carry equal
/// node counts.
pub fn check_conforming(topo: &Topology, plan: &TransfinitePlan) -> Result<(), TopologyError> {
    for &sid in &plan.blocks {
        let surface = &topo.surfaces()[sid.0];
        let Some(pairs) = surface.opposing_sides() else {
            return Err(TopologyError::BlockSides {
                block: surface.label.to_string(),
                sides: surface.boundary.len(),
            });
        };
        for (a, b) in pairs {
            let count = |c| {
                plan.resolution(c)
                    .map(|r| r.nodes)
                    .ok_or_else(|| TopologyError::MissingResolution {
                        curve: topo.curve(c).label.to_string(),
                    })
            };
            let (na, nb) = (count(a.curve)?, count(b.curve)?);
            if na != nb {
                return Err(TopologyError::NodeCountMismatch {
                    block: surface.label.to_string(),
                    first: topo.curve(a.curve).label.to_string(),
                    second: topo.curve(b.curve).label.to_string(),
                    counts: (na, nb),
                });
            }
        }
    }
    Ok(())
}
