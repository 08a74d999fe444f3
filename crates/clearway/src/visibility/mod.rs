//! Visibility graphs over C-obstacle corners and designated points.
//!
//! Purpose
//! - Decide which straight segments a mover of a given clearance may travel
//!   (`VisibilityTester`), and connect every mutually visible vertex pair into an
//!   undirected weighted graph (`build_graph`).
//! - Shortest obstacle-avoiding paths between graph vertices then run along graph
//!   edges only; see `paths`.
//!
//! Code cross-refs: `geom2::{CObstacle, segment_contact, Polygon::contains_strict}`,
//! `paths::ShortestPathIndex`.

mod build;
mod tester;
mod types;

pub use build::build_graph;
pub use tester::{blocks, is_visible, BorderPolicy, VisibilityTester};
pub use types::{AreaId, Edge, Vertex, VertexId, VertexTag, VisibilityGraph};

#[cfg(test)]
mod tests;
