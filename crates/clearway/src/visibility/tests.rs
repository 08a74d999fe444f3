use super::*;
use crate::geom2::rand::{draw_obstacle_field, FieldCfg};
use crate::geom2::{expand, CObstacle, GeomCfg, Point, Polygon};
use nalgebra::vector;
use proptest::prelude::*;

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon {
    Polygon::rect(x0, y0, x1, y1, &GeomCfg::default()).unwrap()
}

fn block() -> Vec<CObstacle> {
    vec![CObstacle::new(0, 0.0, rect(5.0, 0.0, 15.0, 10.0))]
}

#[test]
fn interior_and_crossings_block() {
    let obs = block();
    assert!(!is_visible(vector![0.0, 5.0], vector![20.0, 5.0], &obs));
    assert!(!is_visible(vector![0.0, 5.0], vector![15.0, 0.0], &obs));
    assert!(!is_visible(vector![5.0, 0.0], vector![15.0, 10.0], &obs));
}

#[test]
fn touching_and_sliding_are_visible() {
    let obs = block();
    assert!(is_visible(vector![0.0, 5.0], vector![5.0, 0.0], &obs));
    assert!(is_visible(vector![5.0, 0.0], vector![15.0, 0.0], &obs));
    assert!(is_visible(vector![0.0, 0.0], vector![20.0, 0.0], &obs));
    assert!(is_visible(vector![0.0, 12.0], vector![20.0, 12.0], &obs));
}

#[test]
fn visibility_is_symmetric_and_rejects_zero_length() {
    let obs = block();
    let a = vector![0.0, 5.0];
    for b in [vector![5.0, 10.0], vector![20.0, 5.0], vector![15.0, 0.0]] {
        assert_eq!(is_visible(a, b, &obs), is_visible(b, a, &obs));
    }
    assert!(!is_visible(a, a, &obs));
    assert!(!is_visible(a, a, &[]));
}

#[test]
fn passing_through_two_corners_is_blocked() {
    // Diamond: the segment enters and leaves through vertices, never crossing an edge.
    let diamond = Polygon::new(
        vec![
            vector![0.0, 1.0],
            vector![1.0, 0.0],
            vector![2.0, 1.0],
            vector![1.0, 2.0],
        ],
        &GeomCfg::default(),
    )
    .unwrap();
    let obs = vec![CObstacle::new(0, 0.0, diamond)];
    assert!(!is_visible(vector![-1.0, 1.0], vector![3.0, 1.0], &obs));
    assert!(is_visible(vector![-1.0, 1.0], vector![0.0, 1.0], &obs));
}

#[test]
fn expanded_obstacle_blocks_near_misses() {
    let sq = rect(0.0, 0.0, 2.0, 2.0);
    let grown = expand(&sq, 1.0, 4, &GeomCfg::default()).unwrap();
    let raw = vec![CObstacle::new(0, 0.0, sq)];
    let obs = vec![CObstacle::new(0, 1.0, grown)];
    let (a, b) = (vector![-3.0, 2.5], vector![5.0, 2.5]);
    assert!(is_visible(a, b, &raw));
    assert!(!is_visible(a, b, &obs));
    let tester = VisibilityTester::new(&obs, GeomCfg::default());
    assert_eq!(tester.blocking_obstacle(a, b), Some(0));
}

#[test]
fn border_policy_excludes_segments_along_one_side() {
    let policy = BorderPolicy {
        width: 100.0,
        height: 50.0,
        margin: 2.0,
    };
    assert!(policy.excludes(vector![1.0, 10.0], vector![1.0, 40.0]));
    assert!(policy.excludes(vector![1.0, 1.0], vector![99.0, 1.5]));
    assert!(policy.excludes(vector![30.0, 49.0], vector![70.0, 48.5]));
    assert!(!policy.excludes(vector![1.0, 10.0], vector![50.0, 10.0]));
    assert!(!policy.excludes(vector![1.0, 10.0], vector![99.0, 10.0]));

    let tester = VisibilityTester::new(&[], GeomCfg::default()).with_border(policy);
    assert!(!tester.is_visible(vector![1.0, 10.0], vector![1.0, 40.0]));
    assert!(tester.is_visible(vector![1.0, 10.0], vector![50.0, 10.0]));
}

fn grown_block() -> Vec<CObstacle> {
    let core = rect(5.0, 0.0, 15.0, 10.0);
    let grown = CObstacle::expand_from(0, &core, 2.0, 8, &GeomCfg::default()).unwrap();
    vec![grown]
}

#[test]
fn escaping_endpoint_leaves_the_clearance_zone() {
    let obs = grown_block();
    let tester = VisibilityTester::new(&obs, GeomCfg::default());
    let near = vector![10.0, 11.0];
    let above = vector![10.0, 20.0];
    assert!(!tester.is_visible(near, above));
    assert!(tester.is_visible_escaping(near, above, true, false));
    assert!(tester.is_visible_escaping(above, near, false, true));
    // Both ends in the zone, running parallel to the top edge.
    let also_near = vector![16.0, 11.0];
    assert!(tester.is_visible_escaping(near, also_near, true, true));
}

#[test]
fn escaping_endpoint_never_crosses_the_core() {
    let obs = grown_block();
    let tester = VisibilityTester::new(&obs, GeomCfg::default());
    let near = vector![10.0, 11.0];
    // Straight through the square and out the far side.
    assert!(!tester.is_visible_escaping(near, vector![10.0, -5.0], true, false));
    assert!(!tester.is_visible_escaping(vector![10.0, -5.0], near, false, true));
    assert!(!tester.is_visible_escaping(near, vector![10.0, -1.0], true, true));
    // Clipping a corner of the square.
    assert!(!tester.is_visible_escaping(near, vector![25.0, 5.0], true, false));
    // A point inside the square itself cannot escape at all.
    let buried = vector![10.0, 5.0];
    assert!(!tester.is_visible_escaping(buried, vector![10.0, 20.0], true, false));
}

#[test]
fn escape_covers_only_the_leading_piece() {
    // An L-shaped core expanded with radius zero: the zone is the core, so nothing escapes.
    let l_shape = Polygon::new(
        vec![
            vector![0.0, 0.0],
            vector![10.0, 0.0],
            vector![10.0, 2.0],
            vector![2.0, 2.0],
            vector![2.0, 10.0],
            vector![0.0, 10.0],
        ],
        &GeomCfg::default(),
    )
    .unwrap();
    let obs = vec![CObstacle::new(0, 0.0, l_shape.clone())];
    let tester = VisibilityTester::new(&obs, GeomCfg::default());
    assert!(!tester.is_visible_escaping(vector![1.0, 5.0], vector![5.0, 5.0], true, false));
    // A non-convex zone around a small core: leaving the zone and re-entering it blocks.
    let dot = rect(0.0, 0.0, 0.5, 0.5);
    let obs = vec![CObstacle::new(0, 1.0, l_shape).with_core(dot)];
    let tester = VisibilityTester::new(&obs, GeomCfg::default());
    let start = vector![1.0, 8.0];
    assert!(tester.is_visible_escaping(start, vector![5.0, 8.0], true, false));
    assert!(!tester.is_visible_escaping(start, vector![1.0, 12.0], false, false));
    // Leaving the zone and coming back into its other arm is blocked...
    assert!(!tester.is_visible_escaping(start, vector![9.0, 1.0], true, false));
    // ...unless the far end escapes that arm as well.
    assert!(tester.is_visible_escaping(start, vector![9.0, 1.0], true, true));
}

#[test]
fn graph_connects_mutually_visible_vertices() {
    let obs = block();
    let tester = VisibilityTester::new(&obs, GeomCfg::default());
    let designated = [
        (vector![0.0, 5.0], VertexTag::Entry(AreaId(0))),
        (vector![20.0, 5.0], VertexTag::Exit(AreaId(1))),
    ];
    let g = build_graph(&designated, &tester);
    assert_eq!(g.len(), 6);
    // Four square sides plus two corner links from each designated point.
    assert_eq!(g.edge_count(), 8);
    let s = g.find(vector![0.0, 5.0]).unwrap();
    let t = g.find_tag(VertexTag::Exit(AreaId(1))).unwrap();
    assert!(!g.has_edge(s, t));
    let c = g.find(vector![5.0, 0.0]).unwrap();
    assert!(g.has_edge(s, c) && g.has_edge(c, s));
    for (a, b, len) in g.edges() {
        assert!((len - (g.point(a) - g.point(b)).norm()).abs() < 1e-12);
        assert!(g.has_edge(b, a));
    }
    for list in &g.adj {
        assert!(list.windows(2).all(|w| w[0].to < w[1].to));
    }
}

#[test]
fn coincident_points_merge_and_keep_tags() {
    let obs = block();
    let tester = VisibilityTester::new(&obs, GeomCfg::default());
    let designated = [
        (vector![5.0, 0.0], VertexTag::Entry(AreaId(2))),
        (vector![5.0, 0.0], VertexTag::Exit(AreaId(3))),
    ];
    let g = build_graph(&designated, &tester);
    assert_eq!(g.len(), 4);
    let v = g.vertex(g.find(vector![5.0, 0.0]).unwrap());
    assert_eq!(v.tags.len(), 3);
    assert!(v.is_designated());
}

#[test]
fn empty_scene_is_complete_graph() {
    let tester = VisibilityTester::new(&[], GeomCfg::default());
    let pts: Vec<(Point, VertexTag)> = (0..5)
        .map(|i| (vector![i as f64, (i * i) as f64], VertexTag::Entry(AreaId(i))))
        .collect();
    let g = build_graph(&pts, &tester);
    assert_eq!(g.edge_count(), 10);
}

proptest! {
    /// No graph edge runs through the interior of an obstacle.
    #[test]
    fn edges_avoid_obstacle_interiors(seed in 0u64..200) {
        let field = draw_obstacle_field(FieldCfg { cols: 3, rows: 3, ..FieldCfg::default() }, seed);
        let obs: Vec<CObstacle> = field
            .into_iter()
            .enumerate()
            .map(|(i, p)| CObstacle::new(i, 0.0, p))
            .collect();
        let tester = VisibilityTester::new(&obs, GeomCfg::default());
        let g = build_graph(&[], &tester);
        for (a, b, _) in g.edges() {
            let (pa, pb) = (g.point(a), g.point(b));
            for k in 1..16 {
                let p = pa + (pb - pa) * (k as f64 / 16.0);
                for o in &obs {
                    prop_assert!(!o.polygon.contains_strict(p, 1e-7));
                }
            }
            prop_assert_eq!(tester.is_visible(pa, pb), tester.is_visible(pb, pa));
        }
    }

    /// Designated points in the clearance zone of grown obstacles only route around
    /// the obstacles themselves.
    #[test]
    fn routes_from_clearance_zones_avoid_cores(seed in 0u64..120, radius in 0.5f64..3.0) {
        let field = draw_obstacle_field(FieldCfg { cols: 3, rows: 3, ..FieldCfg::default() }, seed);
        let geom = GeomCfg::default();
        let obs: Vec<CObstacle> = field
            .iter()
            .enumerate()
            .map(|(i, p)| CObstacle::expand_from(i, p, radius, 6, &geom).unwrap())
            .collect();
        // One point just beyond the first vertex of every obstacle, inside its zone.
        let designated: Vec<(Point, VertexTag)> = field
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let verts = p.vertices();
                let centroid = verts.iter().sum::<Point>() / verts.len() as f64;
                let out = (verts[0] - centroid).normalize();
                (verts[0] + out * (0.5 * radius), VertexTag::Entry(AreaId(i)))
            })
            .collect();
        let tester = VisibilityTester::new(&obs, geom);
        let g = build_graph(&designated, &tester);
        let idx = crate::paths::ShortestPathIndex::build(&g);
        let ids: Vec<VertexId> = designated.iter().filter_map(|(p, _)| g.find(*p)).collect();
        prop_assert_eq!(ids.len(), designated.len());
        for &s in &ids {
            for &t in &ids {
                let Some(route) = idx.route(s, t) else { continue };
                for w in route.points.windows(2) {
                    for k in 1..32 {
                        let p = w[0] + (w[1] - w[0]) * (k as f64 / 32.0);
                        let inside = field.iter().any(|core| core.contains_strict(p, 1e-7));
                        prop_assert!(!inside, "{:?} inside an obstacle", p);
                    }
                }
            }
        }
    }
}
