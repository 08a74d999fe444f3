//! All-pairs shortest paths over a visibility graph.
//!
//! One Dijkstra tree per source vertex, computed in parallel. Distances are O(1)
//! lookups; routes are rebuilt on demand by walking predecessors, so memory stays
//! quadratic in the vertex count.

mod dijkstra;
mod types;

use rayon::prelude::*;

use crate::geom2::Point;
use crate::visibility::{VertexId, VisibilityGraph};

pub use dijkstra::dijkstra;
pub use types::{Route, ShortestPathTree};

#[derive(Clone, Debug, Default)]
pub struct ShortestPathIndex {
    trees: Vec<ShortestPathTree>,
    points: Vec<Point>,
}

impl ShortestPathIndex {
    pub fn build(graph: &VisibilityGraph) -> Self {
        let trees: Vec<ShortestPathTree> = (0..graph.len())
            .into_par_iter()
            .map(|s| dijkstra(graph, VertexId(s)))
            .collect();
        let points = graph.vertices.iter().map(|v| v.point).collect();
        Self { trees, points }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    #[inline]
    pub fn tree(&self, source: VertexId) -> &ShortestPathTree {
        &self.trees[source.0]
    }

    /// Shortest distance, `None` if `to` is unreachable from `from`.
    #[inline]
    pub fn distance(&self, from: VertexId, to: VertexId) -> Option<f64> {
        let tree = &self.trees[from.0];
        tree.is_reachable(to).then(|| tree.dist[to.0])
    }

    #[inline]
    pub fn is_reachable(&self, from: VertexId, to: VertexId) -> bool {
        self.trees[from.0].is_reachable(to)
    }

    /// Shortest route `from → to`; a single-point route when `from == to`.
    pub fn route(&self, from: VertexId, to: VertexId) -> Option<Route> {
        let tree = &self.trees[from.0];
        let vertices = tree.vertices_to(to)?;
        let points = vertices.iter().map(|v| self.points[v.0]).collect();
        Some(Route {
            vertices,
            points,
            length: tree.dist[to.0],
        })
    }
}
