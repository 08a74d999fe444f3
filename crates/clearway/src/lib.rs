//! Obstacle-aware route planning on layered polygonal maps.
//!
//! Movers with a clearance radius travel between designated points of areas. Each
//! obstacle is grown into a configuration-space obstacle (`geom2::expand`), the
//! corners of those plus the designated points form a visibility graph
//! (`visibility`), and all-pairs shortest paths over that graph answer route
//! queries (`paths`). The `planner` builds one such bundle per layer for a tight
//! and a generous clearance and picks between them per query.
//!
//! API Policy
//! - The crate serves the `clearway` CLI and its tests. There is no stable public API;
//!   prefer clarity and better design over compatibility.

pub mod api;
pub mod geom2;
pub mod paths;
pub mod planner;
pub mod visibility;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom2::{GeomCfg, Point};
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom2::rand::{
        draw_obstacle_field, draw_polygon_radial, FieldCfg, RadialCfg, ReplayToken, VertexCount,
    };
    pub use crate::geom2::{expand, CObstacle, GeomCfg, Point, Polygon};
    pub use crate::planner::{
        Area, AreaKind, ClearanceProfile, Domain, LayerId, LayerMask, ObstacleSpec, PlanError,
        Planner, PlannerCfg, Scenario, SelectedRoute,
    };
    pub use crate::visibility::AreaId;
    pub use nalgebra::Vector2 as Vec2;
}
