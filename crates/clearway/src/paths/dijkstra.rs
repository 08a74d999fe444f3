use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::visibility::{VertexId, VisibilityGraph};

use super::types::{FloatOrd, ShortestPathTree};

/// Dijkstra from `source` over non-negative edge lengths.
///
/// Ties on distance pop the smaller vertex id first, and a predecessor is replaced only
/// by a strictly shorter distance, so the tree is deterministic for a given graph.
pub fn dijkstra(graph: &VisibilityGraph, source: VertexId) -> ShortestPathTree {
    let n = graph.len();
    let mut dist = vec![f64::INFINITY; n];
    let mut pred: Vec<Option<VertexId>> = vec![None; n];
    let mut done = vec![false; n];
    let mut heap: BinaryHeap<Reverse<(FloatOrd, VertexId)>> = BinaryHeap::new();
    dist[source.0] = 0.0;
    heap.push(Reverse((FloatOrd(0.0), source)));
    while let Some(Reverse((FloatOrd(d), u))) = heap.pop() {
        if done[u.0] {
            continue;
        }
        done[u.0] = true;
        for e in graph.neighbors(u) {
            let cand = d + e.length;
            if cand < dist[e.to.0] {
                dist[e.to.0] = cand;
                pred[e.to.0] = Some(u);
                heap.push(Reverse((FloatOrd(cand), e.to)));
            }
        }
    }
    ShortestPathTree { source, dist, pred }
}
