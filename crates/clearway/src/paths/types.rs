use std::cmp::Ordering;

use crate::geom2::Point;
use crate::visibility::VertexId;

/// Total order over `f64` for heap keys.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FloatOrd(pub f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Single-source result: distance and predecessor per vertex.
#[derive(Clone, Debug)]
pub struct ShortestPathTree {
    pub source: VertexId,
    /// `f64::INFINITY` for unreachable vertices.
    pub dist: Vec<f64>,
    pub pred: Vec<Option<VertexId>>,
}

impl ShortestPathTree {
    #[inline]
    pub fn is_reachable(&self, to: VertexId) -> bool {
        self.dist[to.0].is_finite()
    }

    /// Vertex sequence `source → to`, both inclusive. `None` if unreachable.
    pub fn vertices_to(&self, to: VertexId) -> Option<Vec<VertexId>> {
        if !self.is_reachable(to) {
            return None;
        }
        let mut out = vec![to];
        let mut cur = to;
        while let Some(prev) = self.pred[cur.0] {
            out.push(prev);
            cur = prev;
        }
        out.reverse();
        Some(out)
    }
}

/// A shortest route between two graph vertices.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub vertices: Vec<VertexId>,
    pub points: Vec<Point>,
    pub length: f64,
}

impl Route {
    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Number of straight legs.
    #[inline]
    pub fn legs(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}
