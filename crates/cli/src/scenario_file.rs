//! JSON scenario files.
//!
//! Points are `[x, y]` arrays, area kinds are their layer numbers (0-4), and an
//! obstacle's `layers` is either `"all"` or one layer number. The optional `planner`
//! block overrides `PlannerCfg` defaults field by field.

use anyhow::{bail, Context, Result};
use clearway::api::{
    Area, AreaKind, Domain, GeomCfg, LayerId, LayerMask, ObstacleSpec, PlannerCfg, Point,
    Scenario,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioFile {
    pub domain: DomainFile,
    #[serde(default)]
    pub planner: PlannerFile,
    pub areas: Vec<AreaFile>,
    #[serde(default)]
    pub obstacles: Vec<ObstacleFile>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DomainFile {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerFile {
    pub tight_radius: f64,
    pub generous_radius: f64,
    pub arc_segments: usize,
    pub clearance_factor: f64,
    pub no_knock_over: bool,
}

impl Default for PlannerFile {
    fn default() -> Self {
        let d = PlannerCfg::default();
        Self {
            tight_radius: d.tight_radius,
            generous_radius: d.generous_radius,
            arc_segments: d.arc_segments,
            clearance_factor: d.clearance_factor,
            no_knock_over: d.no_knock_over,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaFile {
    pub name: String,
    pub kind: u8,
    pub polygon: Vec<[f64; 2]>,
    pub entry: [f64; 2],
    pub exit: [f64; 2],
    #[serde(default)]
    pub border_entry: Option<[f64; 2]>,
    #[serde(default)]
    pub border_exit: Option<[f64; 2]>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleFile {
    #[serde(default)]
    pub name: Option<String>,
    pub polygon: Vec<[f64; 2]>,
    #[serde(default)]
    pub layers: LayersFile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LayersFile {
    Layer(u8),
    Named(String),
}

impl Default for LayersFile {
    fn default() -> Self {
        LayersFile::Named("all".to_string())
    }
}

#[inline]
fn pt(p: [f64; 2]) -> Point {
    Point::new(p[0], p[1])
}

impl ScenarioFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_slice(&raw).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn planner_cfg(&self) -> PlannerCfg {
        PlannerCfg {
            tight_radius: self.planner.tight_radius,
            generous_radius: self.planner.generous_radius,
            arc_segments: self.planner.arc_segments,
            clearance_factor: self.planner.clearance_factor,
            no_knock_over: self.planner.no_knock_over,
            geom: GeomCfg::default(),
        }
    }

    pub fn to_scenario(&self) -> Result<Scenario> {
        let areas = self
            .areas
            .iter()
            .map(|a| {
                let Some(kind) = AreaKind::from_code(a.kind) else {
                    bail!("area '{}': unknown kind {}", a.name, a.kind);
                };
                let border = match (a.border_entry, a.border_exit) {
                    (Some(e), Some(x)) => Some((pt(e), pt(x))),
                    (None, None) => None,
                    _ => bail!(
                        "area '{}': border_entry and border_exit must be given together",
                        a.name
                    ),
                };
                Ok(Area {
                    name: a.name.clone(),
                    kind,
                    vertices: a.polygon.iter().copied().map(pt).collect(),
                    entry: pt(a.entry),
                    exit: pt(a.exit),
                    border,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let obstacles = self
            .obstacles
            .iter()
            .enumerate()
            .map(|(i, o)| {
                let name = o.name.clone().unwrap_or_else(|| format!("obstacle-{i}"));
                let layers = match &o.layers {
                    LayersFile::Layer(n) if *n <= 4 => LayerMask::Only(LayerId(*n)),
                    LayersFile::Named(s) if s.eq_ignore_ascii_case("all") => LayerMask::All,
                    other => bail!(
                        "obstacle '{name}': layers must be \"all\" or 0-4, got {other:?}"
                    ),
                };
                Ok(ObstacleSpec {
                    name,
                    vertices: o.polygon.iter().copied().map(pt).collect(),
                    layers,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Scenario {
            domain: Domain {
                width: self.domain.width,
                height: self.domain.height,
            },
            areas,
            obstacles,
        })
    }
}

#[cfg(test)]
pub(crate) const SAMPLE: &str = r#"{
    "domain": { "width": 100, "height": 60 },
    "planner": { "tight_radius": 1.0, "generous_radius": 2.5 },
    "areas": [
        { "name": "incident", "kind": 0, "polygon": [[10,10],[20,10],[20,20],[10,20]],
          "entry": [15,22], "exit": [22,15] },
        { "name": "patients", "kind": 1, "polygon": [[40,10],[50,10],[50,20],[40,20]],
          "entry": [38,15], "exit": [52,15] },
        { "name": "clearing", "kind": 2, "polygon": [[70,10],[80,10],[80,20],[70,20]],
          "entry": [68,15], "exit": [82,15] },
        { "name": "parking", "kind": 4, "polygon": [[40,40],[50,40],[50,50],[40,50]],
          "entry": [38,45], "exit": [52,45],
          "border_entry": [100,30], "border_exit": [45,60] }
    ],
    "obstacles": [
        { "name": "pole", "polygon": [[28,12],[32,12],[32,18],[28,18]] },
        { "polygon": [[58,25],[66,25],[66,35],[58,35]], "layers": 4 }
    ]
}"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn sample_converts_with_defaults_filled_in() {
        let file: ScenarioFile = serde_json::from_str(SAMPLE).unwrap();
        let cfg = file.planner_cfg();
        assert_eq!(cfg.tight_radius, 1.0);
        assert_eq!(cfg.arc_segments, PlannerCfg::default().arc_segments);
        let s = file.to_scenario().unwrap();
        assert_eq!(s.areas.len(), 4);
        assert_eq!(s.areas[3].kind, AreaKind::AmbulanceParking);
        assert_eq!(
            s.areas[3].border,
            Some((Point::new(100.0, 30.0), Point::new(45.0, 60.0)))
        );
        assert_eq!(s.obstacles[0].layers, LayerMask::All);
        assert_eq!(s.obstacles[1].layers, LayerMask::Only(LayerId::AMBULANCE));
        assert_eq!(s.obstacles[1].name, "obstacle-1");
    }

    #[test]
    fn bad_kind_and_layers_are_rejected() {
        let mut file: ScenarioFile = serde_json::from_str(SAMPLE).unwrap();
        file.areas[0].kind = 7;
        assert!(file.to_scenario().is_err());

        let mut file: ScenarioFile = serde_json::from_str(SAMPLE).unwrap();
        file.obstacles[0].layers = LayersFile::Named("some".to_string());
        assert!(file.to_scenario().is_err());

        let mut file: ScenarioFile = serde_json::from_str(SAMPLE).unwrap();
        file.areas[3].border_exit = None;
        assert!(file.to_scenario().is_err());
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scenario.json");
        fs::write(&path, SAMPLE).unwrap();
        let file = ScenarioFile::load(&path).unwrap();
        assert_eq!(file.domain.width, 100.0);
        assert!(ScenarioFile::load(&dir.path().join("missing.json")).is_err());
    }
}
