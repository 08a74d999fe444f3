//! Graph construction: vertex collection, merging, and pairwise visibility.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::geom2::Point;

use super::tester::VisibilityTester;
use super::types::{Edge, Vertex, VertexId, VertexTag, VisibilityGraph};

/// Build the visibility graph over the tester's C-obstacle corners plus `designated`.
///
/// Points within `eps_merge` of an earlier vertex merge into it and add their tag.
/// Pair tests run in parallel; the result does not depend on scheduling.
pub fn build_graph(
    designated: &[(Point, VertexTag)],
    tester: &VisibilityTester<'_>,
) -> VisibilityGraph {
    let eps_merge = tester.cfg().eps_merge;
    let mut vertices: Vec<Vertex> = Vec::new();
    let mut insert = |point: Point, tag: VertexTag| {
        match vertices
            .iter()
            .position(|v| (v.point - point).norm() <= eps_merge)
        {
            Some(i) => {
                let tags = &mut vertices[i].tags;
                if !tags.contains(&tag) {
                    tags.push(tag);
                }
            }
            None => vertices.push(Vertex {
                point,
                tags: vec![tag],
            }),
        }
    };
    for obs in tester.obstacles() {
        for corner in obs.polygon.vertices() {
            insert(
                *corner,
                VertexTag::Corner {
                    obstacle: obs.source,
                },
            );
        }
    }
    for (point, tag) in designated {
        insert(*point, *tag);
    }

    let eps = tester.cfg().eps_dist;
    for v in vertices.iter().filter(|v| v.is_designated()) {
        let obstacles = tester.obstacles();
        if obstacles.iter().any(|o| o.core.contains_strict(v.point, eps)) {
            warn!(
                x = v.point.x,
                y = v.point.y,
                tags = ?v.tags,
                "designated point inside an obstacle, it has no visible neighbours"
            );
        } else if obstacles.iter().any(|o| o.polygon.contains_strict(v.point, eps)) {
            debug!(
                x = v.point.x,
                y = v.point.y,
                tags = ?v.tags,
                "designated point in a clearance zone, escaping it"
            );
        }
    }

    let n = vertices.len();
    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
        .collect();
    let visible: Vec<bool> = pairs
        .par_iter()
        .map(|&(i, j)| {
            let (vi, vj) = (&vertices[i], &vertices[j]);
            tester.is_visible_escaping(vi.point, vj.point, vi.is_designated(), vj.is_designated())
        })
        .collect();

    let mut adj: Vec<Vec<Edge>> = vec![Vec::new(); n];
    for (&(i, j), ok) in pairs.iter().zip(visible) {
        if !ok {
            continue;
        }
        let length = (vertices[j].point - vertices[i].point).norm();
        adj[i].push(Edge {
            to: VertexId(j),
            length,
        });
        adj[j].push(Edge {
            to: VertexId(i),
            length,
        });
    }
    for list in adj.iter_mut() {
        list.sort_by_key(|e| e.to);
    }
    let graph = VisibilityGraph {
        vertices,
        adj,
        eps_merge,
    };
    debug!(
        vertices = graph.len(),
        edges = graph.edge_count(),
        "visibility graph built"
    );
    graph
}
