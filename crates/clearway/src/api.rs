//! Curated internal API (UNSTABLE).
//!
//! Important
//! - This is not a public API. It is a convenience surface for the CLI, benches,
//!   and tests. Breaking changes are allowed and expected.
//! - Prefer these re-exports for clarity and consistency across callers.

// Geometry
pub use crate::geom2::{
    convex_hull, expand, point_segment_distance, segment_contact, Aabb, CObstacle, GeomCfg,
    GeomError, Point, Polygon, SegmentContact, Winding,
};
// Random obstacles
pub use crate::geom2::rand::{
    draw_obstacle_field, draw_polygon_radial, FieldCfg, RadialCfg,
    ReplayToken as ObstacleReplay, VertexCount,
};
// Visibility
pub use crate::visibility::{
    build_graph, is_visible, AreaId, BorderPolicy, Edge, Vertex, VertexId, VertexTag,
    VisibilityGraph, VisibilityTester,
};
// Shortest paths
pub use crate::paths::{dijkstra, Route, ShortestPathIndex, ShortestPathTree};
// Planning
pub use crate::planner::{
    border_way, choose_profile, Area, AreaKind, AreaRoute, Blocker, BorderLoop,
    ClearanceProfile, Domain, LayerId, LayerMask, LayerPlan, ObstacleSpec, PlanError, Planner,
    PlannerCfg, ProfilePlan, RouteSelector, Scenario, SelectedRoute,
};
