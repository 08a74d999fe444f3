//! Data types for visibility graphs.
//!
//! Kept small and explicit so `build` and the path index stay easy to read.

use crate::geom2::Point;

/// Identifier types for clarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AreaId(pub usize);

/// Why a point is part of a graph. One vertex may carry several tags after merging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VertexTag {
    /// Corner of the C-obstacle built from obstacle `obstacle`.
    Corner { obstacle: usize },
    Entry(AreaId),
    Exit(AreaId),
    BorderEntry(AreaId),
    BorderExit(AreaId),
}

impl VertexTag {
    #[inline]
    pub fn is_corner(&self) -> bool {
        matches!(self, VertexTag::Corner { .. })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Vertex {
    pub point: Point,
    pub tags: Vec<VertexTag>,
}

impl Vertex {
    /// `true` if any tag names a designated (non-corner) point.
    pub fn is_designated(&self) -> bool {
        self.tags.iter().any(|t| !t.is_corner())
    }
}

/// Half of an undirected edge, stored in the adjacency list of its origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub to: VertexId,
    pub length: f64,
}

/// Undirected weighted graph over corners and designated points.
///
/// Adjacency lists are sorted by target id; every edge appears once per endpoint.
#[derive(Clone, Debug, Default)]
pub struct VisibilityGraph {
    pub vertices: Vec<Vertex>,
    pub adj: Vec<Vec<Edge>>,
    pub eps_merge: f64,
}

impl VisibilityGraph {
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.0]
    }

    #[inline]
    pub fn point(&self, id: VertexId) -> Point {
        self.vertices[id.0].point
    }

    #[inline]
    pub fn neighbors(&self, id: VertexId) -> &[Edge] {
        &self.adj[id.0]
    }

    pub fn has_edge(&self, a: VertexId, b: VertexId) -> bool {
        self.adj[a.0].binary_search_by_key(&b, |e| e.to).is_ok()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adj.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Undirected edges as `(a, b, length)` with `a < b`.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId, f64)> + '_ {
        self.adj.iter().enumerate().flat_map(|(a, list)| {
            list.iter()
                .filter(move |e| e.to.0 > a)
                .map(move |e| (VertexId(a), e.to, e.length))
        })
    }

    /// Vertex at `p` (within the merge tolerance).
    pub fn find(&self, p: Point) -> Option<VertexId> {
        self.vertices
            .iter()
            .position(|v| (v.point - p).norm() <= self.eps_merge)
            .map(VertexId)
    }

    /// First vertex carrying `tag`.
    pub fn find_tag(&self, tag: VertexTag) -> Option<VertexId> {
        self.vertices
            .iter()
            .position(|v| v.tags.contains(&tag))
            .map(VertexId)
    }
}
