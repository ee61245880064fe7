use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use inlet_mesh::backend::{GmshProcess, MeshBackend, ScriptOnly};
use inlet_mesh::params::FlowParams;
use inlet_mesh::pipeline::CurveReport;
use inlet_mesh::sizing::{estimate_wall, Grading};
use inlet_mesh::{presets, InletConfig};
use polars::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

#[derive(Parser)]
#[command(name = "inlet")]
#[command(about = "Parametric 2D meshes for supersonic intakes")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum BackendKind {
    /// Run gmsh and write a .msh file
    Gmsh,
    /// Write only the .geo script
    Script,
}

#[derive(Subcommand)]
enum Action {
    /// Mesh one configuration and write a provenance sidecar next to it
    Mesh {
        #[arg(long)]
        config: PathBuf,
        /// Mesh file (`.msh`), or the script (`.geo`) with `--backend script`
        #[arg(long)]
        out: PathBuf,
        #[arg(long, value_enum, default_value_t = BackendKind::Gmsh)]
        backend: BackendKind,
        /// gmsh executable
        #[arg(long, default_value = "gmsh")]
        gmsh: PathBuf,
        /// Optional per-curve resolution table (CSV)
        #[arg(long)]
        table: Option<PathBuf>,
        /// Optional JSON diagnostics report
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Print the near-wall first-cell estimate as JSON
    Wall {
        #[arg(long)]
        reynolds: f64,
        #[arg(long, default_value_t = 1.0)]
        y_plus: f64,
        #[arg(long, default_value_t = 1.0)]
        density: f64,
        #[arg(long, default_value_t = 1.0)]
        velocity: f64,
    },
    /// Emit a reference configuration
    Preset {
        name: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Mesh {
            config,
            out,
            backend,
            gmsh,
            table,
            report,
        } => mesh(&config, &out, backend, gmsh, table.as_deref(), report.as_deref()),
        Action::Wall {
            reynolds,
            y_plus,
            density,
            velocity,
        } => wall(FlowParams {
            reynolds_number: reynolds,
            target_y_plus: y_plus,
            density,
            velocity,
        }),
        Action::Preset { name, out } => preset(&name, out.as_deref()),
        Action::Report => report(),
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}

fn mesh(
    config: &Path,
    out: &Path,
    kind: BackendKind,
    gmsh: PathBuf,
    table: Option<&Path>,
    report_path: Option<&Path>,
) -> Result<()> {
    let cfg = InletConfig::from_json_file(config)?;
    tracing::info!(case = %cfg.name, config = %config.display(), out = %out.display(), "mesh");
    let backend: Box<dyn MeshBackend> = match kind {
        BackendKind::Gmsh => Box::new(GmshProcess::new(gmsh)),
        BackendKind::Script => Box::new(ScriptOnly),
    };
    let report = inlet_mesh::run(&cfg, backend.as_ref(), out)
        .with_context(|| format!("meshing case `{}`", cfg.name))?;

    let mut record = provenance::MeshRecord::new(&cfg, backend.name(), &report);
    if let Some(path) = table {
        ensure_parent(path)?;
        let mut df = curve_table(&report.curves)?;
        let mut file =
            fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
        CsvWriter::new(&mut file).finish(&mut df)?;
        tracing::info!(rows = df.height(), path = %path.display(), "curve table");
        record.outputs.push(path.to_path_buf());
    }
    if let Some(path) = report_path {
        ensure_parent(path)?;
        fs::write(path, report.to_json_pretty()?)
            .with_context(|| format!("writing {}", path.display()))?;
        record.outputs.push(path.to_path_buf());
    }
    let sidecar = provenance::write_sidecar(out, &record)?;
    tracing::info!(
        first_cell_height = report.wall.first_cell_height,
        time_step = report.wall.time_step,
        provenance = %sidecar.display(),
        "done"
    );
    Ok(())
}

fn grading_label(g: Grading) -> String {
    match g {
        Grading::Uniform => "uniform".to_string(),
        Grading::Progression(q) => format!("progression {q}"),
        Grading::Bump(b) => format!("bump {b}"),
    }
}

/// One row per curve: label, role, end points, length and transfinite
/// resolution (empty for free meshing).
fn curve_table(curves: &[CurveReport]) -> PolarsResult<DataFrame> {
    let label: Vec<&str> = curves.iter().map(|c| c.label).collect();
    let role: Vec<&str> = curves.iter().map(|c| c.role.as_str()).collect();
    let start: Vec<&str> = curves.iter().map(|c| c.start.as_str()).collect();
    let end: Vec<&str> = curves.iter().map(|c| c.end.as_str()).collect();
    let length: Vec<f64> = curves.iter().map(|c| c.length).collect();
    let nodes: Vec<Option<u64>> = curves.iter().map(|c| c.nodes.map(|n| n as u64)).collect();
    let grading: Vec<Option<String>> = curves
        .iter()
        .map(|c| c.grading.map(grading_label))
        .collect();
    df!(
        "label" => label,
        "role" => role,
        "start" => start,
        "end" => end,
        "length" => length,
        "nodes" => nodes,
        "grading" => grading,
    )
}

fn wall(flow: FlowParams) -> Result<()> {
    let estimate = estimate_wall(&flow)?;
    println!("{}", serde_json::to_string_pretty(&estimate)?);
    Ok(())
}

fn preset(name: &str, out: Option<&Path>) -> Result<()> {
    let cfg = presets::preset(name).ok_or_else(|| {
        anyhow!(
            "unknown preset `{name}` (available: {})",
            presets::PRESET_NAMES.join(", ")
        )
    })?;
    let text = cfg.to_json_pretty()?;
    match out {
        Some(path) => {
            ensure_parent(path)?;
            fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(name, path = %path.display(), "preset");
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::current_git_rev(),
        "inlet_mesh": inlet_mesh::VERSION,
        "presets": presets::PRESET_NAMES,
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
