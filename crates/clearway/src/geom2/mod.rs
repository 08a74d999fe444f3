//! Planar geometry for clearance planning.
//!
//! Purpose
//! - Provide validated simple polygons (`Polygon`), the segment predicates the
//!   visibility test is built from, and the clearance expansion that turns an
//!   obstacle into a configuration-space obstacle (`CObstacle`).
//! - Keep the API minimal and numerically explicit (every predicate takes its eps,
//!   defaults live in `GeomCfg`).
//!
//! Code cross-refs: `Polygon`, `expand`, `CObstacle`, `segment_contact`, `GeomCfg`

pub mod expand;
mod polygon;
pub mod rand;
mod types;
mod util;

pub use expand::{expand, CObstacle};
pub use polygon::{Polygon, Winding};
pub use types::{Aabb, GeomCfg, GeomError, Point};
pub use util::{
    convex_hull, cross, on_segment, point_segment_distance, segment_contact, segment_param, side,
    signed_area, SegmentContact,
};
