//! Square detour demo: one obstacle, two clearances, one query.
//!
//! Prints the selected route for clearance factors 1.0 and 3.0 so the profile switch
//! is visible. Run with `cargo run -p clearway --example square_detour`.

use clearway::api::{
    AreaId, Blocker, BorderPolicy, GeomCfg, LayerId, LayerPlan, PlannerCfg, Point, Polygon,
    RouteSelector, VertexTag,
};

fn main() {
    let geom = GeomCfg::default();
    let square = Polygon::rect(45.0, 40.0, 55.0, 60.0, &geom).expect("square obstacle");
    let blockers = [Blocker {
        name: "square",
        polygon: &square,
    }];
    let (src, dst) = (Point::new(30.0, 50.0), Point::new(70.0, 50.0));
    let seeds = [
        (src, VertexTag::Exit(AreaId(0))),
        (dst, VertexTag::Entry(AreaId(1))),
    ];
    let cfg = PlannerCfg {
        tight_radius: 1.0,
        generous_radius: 4.0,
        arc_segments: 6,
        ..PlannerCfg::default()
    };
    let border = BorderPolicy {
        width: 100.0,
        height: 100.0,
        margin: cfg.generous_radius,
    };
    let plan = LayerPlan::build(LayerId::INCIDENT, &blockers, &seeds, border, &cfg)
        .expect("layer plan");
    let selector = RouteSelector::new(&plan);
    for factor in [1.0, 3.0] {
        let sel = selector.select_route(src, dst, factor).expect("route");
        println!(
            "factor {factor}: {} (clearance {}) length {:.3}",
            sel.profile, sel.clearance, sel.route.length
        );
        for p in &sel.route.points {
            println!("  ({:.3}, {:.3})", p.x, p.y);
        }
    }
}
