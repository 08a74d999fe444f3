//! Route tables: one row per route point.

use anyhow::{Context, Result};
use clearway::api::{Planner, Point, SelectedRoute};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

#[derive(Default)]
struct Columns {
    route: Vec<u32>,
    kind: Vec<&'static str>,
    from: Vec<String>,
    to: Vec<String>,
    seq: Vec<u32>,
    x: Vec<f64>,
    y: Vec<f64>,
    profile: Vec<&'static str>,
}

impl Columns {
    fn push_polyline(
        &mut self,
        route: u32,
        kind: &'static str,
        from: &str,
        to: &str,
        points: &[Point],
        profile: &'static str,
    ) {
        for (seq, p) in points.iter().enumerate() {
            self.route.push(route);
            self.kind.push(kind);
            self.from.push(from.to_string());
            self.to.push(to.to_string());
            self.seq.push(seq as u32);
            self.x.push(p.x);
            self.y.push(p.y);
            self.profile.push(profile);
        }
    }
}

fn profile_label(sel: &SelectedRoute) -> &'static str {
    sel.profile.as_str()
}

/// Area routes followed by border loops. Border loops mix profiles and are labelled `mixed`
/// unless both legs agree.
pub fn routes_frame(planner: &Planner) -> PolarsResult<DataFrame> {
    let areas = planner.areas();
    let mut cols = Columns::default();
    let mut id = 0u32;
    for r in planner.all_area_routes() {
        cols.push_polyline(
            id,
            "area",
            &areas[r.from.0].name,
            &areas[r.to.0].name,
            &r.selected.route.points,
            profile_label(&r.selected),
        );
        id += 1;
    }
    for bl in planner.all_border_loops() {
        let profile = if bl.to_border.profile == bl.to_parking.profile {
            profile_label(&bl.to_border)
        } else {
            "mixed"
        };
        cols.push_polyline(
            id,
            "border_loop",
            &areas[bl.destination.0].name,
            &areas[bl.parking.0].name,
            &bl.points(),
            profile,
        );
        id += 1;
    }
    df!(
        "route" => cols.route,
        "kind" => cols.kind,
        "from" => cols.from,
        "to" => cols.to,
        "seq" => cols.seq,
        "x" => cols.x,
        "y" => cols.y,
        "profile" => cols.profile
    )
}

pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario_file::{ScenarioFile, SAMPLE};
    use tempfile::tempdir;

    fn sample_planner() -> Planner {
        let file: ScenarioFile = serde_json::from_str(SAMPLE).unwrap();
        Planner::build(&file.to_scenario().unwrap(), &file.planner_cfg()).unwrap()
    }

    #[test]
    fn frame_has_one_row_per_point() {
        let planner = sample_planner();
        let df = routes_frame(&planner).unwrap();
        let expected: usize = planner
            .all_area_routes()
            .iter()
            .map(|r| r.selected.route.points.len())
            .sum::<usize>()
            + planner
                .all_border_loops()
                .iter()
                .map(|b| b.points().len())
                .sum::<usize>();
        assert_eq!(df.height(), expected);
        assert_eq!(df.width(), 8);
    }

    #[test]
    fn csv_round_trips_through_lazy_reader() {
        let planner = sample_planner();
        let mut df = routes_frame(&planner).unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("routes.csv");
        write_csv(&mut df, &path).unwrap();
        let back = LazyCsvReader::new(&path)
            .with_has_header(true)
            .finish()
            .unwrap()
            .collect()
            .unwrap();
        assert_eq!(back.height(), df.height());
        assert_eq!(back.get_column_names().len(), 8);
    }
}
