//! Criterion benches for the setup hot paths.
//!
//! - expansion of random obstacles (arc segments 4 and 8),
//! - visibility graph construction over grid obstacle fields (3x3, 5x5),
//! - all-pairs shortest path index on the same graphs,
//! - a full `Planner::build` on a small four-area scenario.
//!
//! Results live under `target/criterion`.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use clearway::api::{
    build_graph, draw_obstacle_field, draw_polygon_radial, expand, Area, AreaKind, CObstacle,
    Domain, FieldCfg, GeomCfg, LayerMask, ObstacleReplay, ObstacleSpec, Planner, PlannerCfg,
    Point, RadialCfg, Scenario, ShortestPathIndex, VisibilityTester,
};

fn field(n: usize, radius: f64) -> Vec<CObstacle> {
    let cfg = FieldCfg {
        cols: n,
        rows: n,
        ..FieldCfg::default()
    };
    draw_obstacle_field(cfg, 42)
        .iter()
        .enumerate()
        .map(|(i, p)| CObstacle::expand_from(i, p, radius, 4, &GeomCfg::default()).unwrap())
        .collect()
}

fn bench_expand(c: &mut Criterion) {
    let mut group = c.benchmark_group("expand");
    for arc in [4usize, 8] {
        group.bench_function(BenchmarkId::new("random_polygon", arc), |b| {
            b.iter_batched(
                || {
                    draw_polygon_radial(
                        RadialCfg::default(),
                        Point::new(0.0, 0.0),
                        ObstacleReplay { seed: 7, index: 1 },
                    )
                    .unwrap()
                },
                |p| {
                    let _ = expand(&p, 2.5, arc, &GeomCfg::default());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph");
    group.sample_size(20);
    for n in [3usize, 5] {
        let obstacles = field(n, 1.0);
        group.bench_function(BenchmarkId::new("build_graph", format!("{n}x{n}")), |b| {
            b.iter(|| {
                let tester = VisibilityTester::new(&obstacles, GeomCfg::default());
                build_graph(&[], &tester)
            })
        });
        let tester = VisibilityTester::new(&obstacles, GeomCfg::default());
        let graph = build_graph(&[], &tester);
        group.bench_function(BenchmarkId::new("path_index", format!("{n}x{n}")), |b| {
            b.iter(|| ShortestPathIndex::build(&graph))
        });
    }
    group.finish();
}

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Point> {
    vec![
        Point::new(x0, y0),
        Point::new(x1, y0),
        Point::new(x1, y1),
        Point::new(x0, y1),
    ]
}

fn small_scenario() -> Scenario {
    let area = |name: &str, kind, x: f64, border| Area {
        name: name.to_string(),
        kind,
        vertices: rect(x, 40.0, x + 10.0, 50.0),
        entry: Point::new(x - 2.0, 45.0),
        exit: Point::new(x + 12.0, 45.0),
        border,
    };
    Scenario {
        domain: Domain {
            width: 200.0,
            height: 100.0,
        },
        areas: vec![
            area("incident", AreaKind::IncidentLocation, 10.0, None),
            area("patients", AreaKind::PatientsWaiting, 60.0, None),
            area("clearing", AreaKind::ClearingStation, 110.0, None),
            area(
                "parking",
                AreaKind::AmbulanceParking,
                160.0,
                Some((Point::new(200.0, 20.0), Point::new(150.0, 0.0))),
            ),
        ],
        obstacles: (0..6)
            .map(|k| {
                let x = 30.0 + 25.0 * k as f64;
                ObstacleSpec {
                    name: format!("tent-{k}"),
                    vertices: rect(x, 60.0, x + 6.0, 70.0),
                    layers: LayerMask::All,
                }
            })
            .collect(),
    }
}

fn bench_planner(c: &mut Criterion) {
    let mut group = c.benchmark_group("planner");
    group.sample_size(10);
    let scenario = small_scenario();
    let cfg = PlannerCfg {
        tight_radius: 1.0,
        generous_radius: 2.5,
        ..PlannerCfg::default()
    };
    group.bench_function("build_four_areas", |b| {
        b.iter(|| Planner::build(&scenario, &cfg).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_expand, bench_graph, bench_planner);
criterion_main!(benches);
