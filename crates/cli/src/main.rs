use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clearway::api::{LayerId, Planner, ProfilePlan, SelectedRoute};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod export;
mod provenance;
mod scenario_file;

use scenario_file::ScenarioFile;

#[derive(Parser)]
#[command(name = "clearway")]
#[command(about = "Obstacle-aware route planning for layered scenarios")]
struct Cmd {
    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Build the planner and print every area route and border loop as JSON
    Plan {
        #[arg(long)]
        scenario: PathBuf,
        /// Optional CSV of route points (plus a provenance sidecar)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print graph sizes of both clearance profiles of one layer
    Graph {
        #[arg(long)]
        scenario: PathBuf,
        #[arg(long)]
        layer: u8,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    let out = match cmd.action {
        Action::Plan { scenario, out } => plan(&scenario, out.as_deref())?,
        Action::Graph { scenario, layer } => graph(&scenario, LayerId(layer))?,
        Action::Report => report(),
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn load_planner(path: &Path) -> Result<(ScenarioFile, Planner)> {
    let file = ScenarioFile::load(path)?;
    let scenario = file.to_scenario()?;
    let planner = Planner::build(&scenario, &file.planner_cfg())
        .with_context(|| format!("planning {}", path.display()))?;
    Ok((file, planner))
}

fn route_json(sel: &SelectedRoute) -> Value {
    json!({
        "profile": sel.profile.as_str(),
        "clearance": sel.clearance,
        "length": sel.route.length,
        "points": sel.route.points.iter().map(|p| [p.x, p.y]).collect::<Vec<_>>(),
    })
}

fn plan(path: &Path, out: Option<&Path>) -> Result<Value> {
    tracing::info!(scenario = %path.display(), "plan");
    let (file, planner) = load_planner(path)?;
    let areas = planner.areas();
    let routes: Vec<Value> = planner
        .all_area_routes()
        .iter()
        .map(|r| {
            let from = &areas[r.from.0];
            json!({
                "from": from.name,
                "to": areas[r.to.0].name,
                "layer": from.kind.layer().0,
                "route": route_json(&r.selected),
            })
        })
        .collect();
    let loops: Vec<Value> = planner
        .all_border_loops()
        .iter()
        .map(|b| {
            json!({
                "parking": areas[b.parking.0].name,
                "destination": areas[b.destination.0].name,
                "length": b.length(),
                "to_border": route_json(&b.to_border),
                "along_border": b.along_border.iter().map(|p| [p.x, p.y]).collect::<Vec<_>>(),
                "to_parking": route_json(&b.to_parking),
            })
        })
        .collect();

    if let Some(out) = out {
        let mut df = export::routes_frame(&planner)?;
        export::write_csv(&mut df, out)?;
        let record = provenance::PlanRecord::new(path, &file).with_output(out, df.height());
        let sidecar = provenance::write_sidecar(out, &record)?;
        tracing::info!(
            rows = df.height(),
            out = %out.display(),
            sidecar = %sidecar.display(),
            "routes written"
        );
    }
    Ok(json!({ "routes": routes, "border_loops": loops }))
}

fn profile_json(p: &ProfilePlan) -> Value {
    json!({
        "radius": p.radius,
        "obstacles": p.obstacles.len(),
        "vertices": p.graph.len(),
        "edges": p.graph.edge_count(),
    })
}

fn graph(path: &Path, layer: LayerId) -> Result<Value> {
    tracing::info!(scenario = %path.display(), layer = layer.0, "graph");
    let (_, planner) = load_planner(path)?;
    let plan = planner.layer(layer)?;
    Ok(json!({
        "layer": layer.0,
        "shared": plan.is_shared(),
        "tight": profile_json(&plan.tight),
        "generous": profile_json(&plan.generous),
    }))
}

fn report() -> Value {
    json!({
        "code_rev": provenance::current_git_rev(),
        "clearway_version": clearway::VERSION,
        "params": {},
        "outputs": []
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario_file::SAMPLE;
    use tempfile::tempdir;

    #[test]
    fn plan_writes_json_csv_and_sidecar() {
        let dir = tempdir().unwrap();
        let scenario = dir.path().join("scenario.json");
        std::fs::write(&scenario, SAMPLE).unwrap();
        let out = dir.path().join("routes.csv");
        let doc = plan(&scenario, Some(&out)).unwrap();
        assert_eq!(doc["routes"].as_array().unwrap().len(), 3);
        assert_eq!(doc["border_loops"].as_array().unwrap().len(), 1);
        assert_eq!(doc["routes"][0]["from"], "incident");
        assert!(out.exists());
        let sidecar: Value = serde_json::from_slice(
            &std::fs::read(dir.path().join("routes.provenance.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(sidecar["scenario"]["areas"], 4);
        assert_eq!(sidecar["planner"]["generous_radius"], 2.5);
    }

    #[test]
    fn graph_reports_both_profiles() {
        let dir = tempdir().unwrap();
        let scenario = dir.path().join("scenario.json");
        std::fs::write(&scenario, SAMPLE).unwrap();
        let doc = graph(&scenario, LayerId(0)).unwrap();
        assert_eq!(doc["shared"], false);
        assert_eq!(doc["tight"]["obstacles"], 1);
        assert_eq!(doc["generous"]["radius"], 2.5);
        assert!(graph(&scenario, LayerId(7)).is_err());
    }

    #[test]
    fn cli_parses_subcommands() {
        let cmd = Cmd::try_parse_from([
            "clearway",
            "-v",
            "graph",
            "--scenario",
            "s.json",
            "--layer",
            "4",
        ])
        .unwrap();
        assert!(cmd.verbose);
        assert!(matches!(cmd.action, Action::Graph { layer: 4, .. }));
        assert!(Cmd::try_parse_from(["clearway", "plan"]).is_err());
    }
}
