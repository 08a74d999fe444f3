//! Provenance sidecars for planner outputs.
//!
//! Every artifact written by `plan --out` gets a `<stem>.provenance.json` next to it
//! recording the code revision, the scenario it was planned from (file, domain, area
//! and obstacle counts), the effective planner parameters, and the outputs.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::scenario_file::{DomainFile, PlannerFile, ScenarioFile};

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioRecord {
    pub path: String,
    pub domain: DomainFile,
    pub areas: usize,
    pub obstacles: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutputRecord {
    pub path: String,
    pub rows: usize,
}

#[derive(Debug, Clone, Serialize)]
struct Callsite {
    file: &'static str,
    line: u32,
}

/// Everything a sidecar records about one planning run.
#[derive(Debug, Clone, Serialize)]
pub struct PlanRecord {
    pub scenario: ScenarioRecord,
    pub planner: PlannerFile,
    pub outputs: Vec<OutputRecord>,
}

impl PlanRecord {
    pub fn new(path: &Path, file: &ScenarioFile) -> Self {
        Self {
            scenario: ScenarioRecord {
                path: path.to_string_lossy().into_owned(),
                domain: file.domain,
                areas: file.areas.len(),
                obstacles: file.obstacles.len(),
            },
            planner: file.planner,
            outputs: Vec::new(),
        }
    }

    pub fn with_output(mut self, path: &Path, rows: usize) -> Self {
        self.outputs.push(OutputRecord {
            path: path.to_string_lossy().into_owned(),
            rows,
        });
        self
    }
}

#[derive(Serialize)]
struct Sidecar<'a> {
    code_rev: String,
    clearway_version: &'static str,
    callsite: Callsite,
    #[serde(flatten)]
    record: &'a PlanRecord,
}

/// Write the sidecar of `artifact` and return its path.
#[track_caller]
pub fn write_sidecar(artifact: &Path, record: &PlanRecord) -> Result<PathBuf> {
    let path = sidecar_path(artifact);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }
    let caller = Location::caller();
    let doc = Sidecar {
        code_rev: current_git_rev(),
        clearway_version: clearway::VERSION,
        callsite: Callsite {
            file: caller.file(),
            line: caller.line(),
        },
        record,
    };
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn sidecar_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "routes".into());
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

/// Revision of the running code: `GIT_COMMIT` at build time, then at run time, then `git`.
pub fn current_git_rev() -> String {
    option_env!("GIT_COMMIT")
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok().filter(|s| !s.is_empty()))
        .or_else(|| {
            Command::new("git")
                .args(["rev-parse", "HEAD"])
                .output()
                .ok()
                .filter(|out| out.status.success())
                .and_then(|out| String::from_utf8(out.stdout).ok())
                .map(|s| s.trim().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario_file::SAMPLE;
    use serde_json::Value;
    use tempfile::tempdir;

    #[test]
    fn sidecar_sits_next_to_the_artifact() {
        assert_eq!(
            sidecar_path(Path::new("/tmp/output/routes.csv")),
            Path::new("/tmp/output/routes.provenance.json")
        );
        assert_eq!(
            sidecar_path(Path::new("plan")),
            Path::new("plan.provenance.json")
        );
    }

    #[test]
    fn sidecar_records_scenario_planner_and_outputs() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("out").join("routes.csv");
        let file: ScenarioFile = serde_json::from_str(SAMPLE).unwrap();
        let record = PlanRecord::new(Path::new("scenario.json"), &file).with_output(&artifact, 42);
        let path = write_sidecar(&artifact, &record).unwrap();
        assert_eq!(path, dir.path().join("out").join("routes.provenance.json"));
        let parsed: Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(parsed["clearway_version"], clearway::VERSION);
        assert_eq!(parsed["scenario"]["path"], "scenario.json");
        assert_eq!(parsed["scenario"]["domain"]["width"], 100.0);
        assert_eq!(parsed["scenario"]["areas"], 4);
        assert_eq!(parsed["scenario"]["obstacles"], 2);
        assert_eq!(parsed["planner"]["tight_radius"], 1.0);
        assert_eq!(parsed["planner"]["no_knock_over"], false);
        assert_eq!(parsed["outputs"][0]["rows"], 42);
        assert_eq!(
            parsed["outputs"][0]["path"],
            artifact.to_string_lossy().as_ref()
        );
        assert!(parsed["callsite"]["line"].as_u64().is_some());
    }
}
