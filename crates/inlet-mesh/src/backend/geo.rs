//! gmsh `.geo` script rendering.
//!
//! Entity tags are 1-based arena indices: point `PointId(i)` is `Point(i+1)`,
//! curve `CurveId(i)` is `Line(i+1)`, surface `SurfaceId(i)` owns both
//! `Curve Loop(i+1)` and `Plane Surface(i+1)`. Field tags follow the order of
//! `FieldPlan::fields`.

use std::fmt::{self, Write};

use super::groups::{GroupMembers, PhysicalGroup};
use super::MeshJob;
use crate::sizing::{Field, FieldPlan, Grading, MeshOptions, Resolution, TransfinitePlan};
use crate::topology::Topology;

fn tag(index: usize) -> usize {
    index + 1
}

fn list<I: IntoIterator<Item = usize>>(tags: I) -> String {
    tags.into_iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render the complete kernel input for one job.
pub fn render_geo(job: &MeshJob<'_>) -> String {
    let mut out = String::new();
    // `fmt::Write` for `String` never returns an error.
    if write_geo(&mut out, job).is_err() {
        out.clear();
    }
    out
}

/// Write the kernel input for one job into any formatter sink.
pub fn write_geo<W: Write>(out: &mut W, job: &MeshJob<'_>) -> fmt::Result {
    let topo = job.topology;
    writeln!(out, "// {}", job.name)?;
    writeln!(out, "// generated by inlet-mesh {}", crate::VERSION)?;

    let fields = match &job.sizing.resolution {
        Resolution::Fields(plan) => Some(plan),
        Resolution::Transfinite(_) => None,
    };
    writeln!(out)?;
    for id in topo.point_ids() {
        let p = match fields {
            Some(plan) => plan.sized_point(topo, id),
            None => *topo.point(id),
        };
        match p.size {
            Some(lc) => writeln!(
                out,
                "Point({}) = {{{}, {}, 0, {}}}; // {}",
                tag(id.0),
                p.pos.x,
                p.pos.y,
                lc,
                p.role
            )?,
            None => writeln!(
                out,
                "Point({}) = {{{}, {}, 0}}; // {}",
                tag(id.0),
                p.pos.x,
                p.pos.y,
                p.role
            )?,
        }
    }

    writeln!(out)?;
    for id in topo.curve_ids() {
        let c = topo.curve(id);
        writeln!(
            out,
            "Line({}) = {{{}, {}}}; // {}",
            tag(id.0),
            tag(c.start.0),
            tag(c.end.0),
            c.label
        )?;
    }

    writeln!(out)?;
    for sid in topo.surface_ids() {
        let s = &topo.surfaces()[sid.0];
        let sides: Vec<String> = s
            .boundary
            .iter()
            .map(|oc| {
                let t = tag(oc.curve.0) as i64;
                (if oc.reversed { -t } else { t }).to_string()
            })
            .collect();
        writeln!(out, "Curve Loop({}) = {{{}}};", tag(sid.0), sides.join(", "))?;
        writeln!(
            out,
            "Plane Surface({0}) = {{{0}}}; // {1}",
            tag(sid.0),
            s.label
        )?;
    }

    match &job.sizing.resolution {
        Resolution::Transfinite(plan) => write_transfinite(out, topo, plan)?,
        Resolution::Fields(plan) => write_fields(out, plan)?,
    }
    write_groups(out, job.groups)?;
    write_options(out, &job.sizing.options)
}

fn write_transfinite<W: Write>(
    out: &mut W,
    topo: &Topology,
    plan: &TransfinitePlan,
) -> fmt::Result {
    writeln!(out)?;
    for r in &plan.curves {
        let law = match r.grading {
            Grading::Uniform => String::new(),
            Grading::Progression(q) => format!(" Using Progression {q}"),
            Grading::Bump(b) => format!(" Using Bump {b}"),
        };
        writeln!(
            out,
            "Transfinite Curve {{{}}} = {}{};",
            tag(r.curve.0),
            r.nodes,
            law
        )?;
    }
    for &sid in &plan.blocks {
        let s = &topo.surfaces()[sid.0];
        match s.corners {
            Some(corners) => writeln!(
                out,
                "Transfinite Surface {{{}}} = {{{}}};",
                tag(sid.0),
                list(corners.iter().map(|p| tag(p.0)))
            )?,
            None => writeln!(out, "Transfinite Surface {{{}}};", tag(sid.0))?,
        }
    }
    Ok(())
}

fn write_fields<W: Write>(out: &mut W, plan: &FieldPlan) -> fmt::Result {
    if plan.fields.is_empty() {
        return Ok(());
    }
    writeln!(out)?;
    for (i, field) in plan.fields.iter().enumerate() {
        let t = tag(i);
        writeln!(out, "Field[{t}] = {};", field.kind())?;
        match field {
            Field::Distance { curves } => {
                writeln!(
                    out,
                    "Field[{t}].CurvesList = {{{}}};",
                    list(curves.iter().map(|c| tag(c.0)))
                )?;
            }
            Field::Threshold {
                input,
                size_min,
                size_max,
                dist_min,
                dist_max,
            } => {
                writeln!(out, "Field[{t}].InField = {};", tag(input.0))?;
                writeln!(out, "Field[{t}].SizeMin = {size_min};")?;
                writeln!(out, "Field[{t}].SizeMax = {size_max};")?;
                writeln!(out, "Field[{t}].DistMin = {dist_min};")?;
                writeln!(out, "Field[{t}].DistMax = {dist_max};")?;
            }
            Field::BoundaryLayer(bl) => {
                writeln!(
                    out,
                    "Field[{t}].CurvesList = {{{}}};",
                    list(bl.curves.iter().map(|c| tag(c.0)))
                )?;
                if !bl.end_points.is_empty() {
                    writeln!(
                        out,
                        "Field[{t}].PointsList = {{{}}};",
                        list(bl.end_points.iter().map(|p| tag(p.0)))
                    )?;
                }
                if !bl.fan_points.is_empty() {
                    writeln!(
                        out,
                        "Field[{t}].FanPointsList = {{{}}};",
                        list(bl.fan_points.iter().map(|p| tag(p.0)))
                    )?;
                }
                writeln!(out, "Field[{t}].Size = {};", bl.first_height)?;
                writeln!(out, "Field[{t}].Ratio = {};", bl.ratio)?;
                writeln!(out, "Field[{t}].Thickness = {};", bl.thickness)?;
                writeln!(out, "Field[{t}].Quads = {};", u8::from(bl.quads))?;
            }
        }
    }
    if let Some(bg) = plan.background {
        writeln!(out, "Background Field = {};", tag(bg.0))?;
    }
    if let Some(bl) = plan.boundary_layer {
        writeln!(out, "BoundaryLayer Field = {};", tag(bl.0))?;
    }
    Ok(())
}

fn write_groups<W: Write>(out: &mut W, groups: &[PhysicalGroup]) -> fmt::Result {
    writeln!(out)?;
    for g in groups {
        let (kind, members) = match &g.members {
            GroupMembers::Surfaces(s) => ("Surface", list(s.iter().map(|s| tag(s.0)))),
            GroupMembers::Curves(c) => ("Curve", list(c.iter().map(|c| tag(c.0)))),
        };
        writeln!(out, "Physical {kind}(\"{}\") = {{{members}}};", g.name)?;
    }
    Ok(())
}

fn write_options<W: Write>(out: &mut W, options: &MeshOptions) -> fmt::Result {
    writeln!(out)?;
    if let Some(a) = options.algorithm {
        writeln!(out, "Mesh.Algorithm = {a};")?;
    }
    if options.recombine_all {
        writeln!(out, "Mesh.RecombineAll = 1;")?;
    }
    if let Some(s) = options.smoothing {
        writeln!(out, "Mesh.Smoothing = {s};")?;
    }
    Ok(())
}
