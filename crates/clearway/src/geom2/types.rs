//! Basic 2D types and tolerances shared by expansion, visibility, and planning.
//!
//! - `GeomCfg`: centralizes epsilons for vertex merging, line side tests, and turn angles.
//! - `Aabb`: axis-aligned bounding box used for early rejection.
//! - `GeomError`: why a polygon or an expansion request was refused.

use nalgebra::Vector2;
use thiserror::Error;

/// A point (or free vector) in the plane.
pub type Point = Vector2<f64>;

/// Geometry configuration (tolerances).
///
/// All three values are absolute lengths or angles, so they behave the same on every
/// scenario scale the planner is used with (domains of a few hundred units).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeomCfg {
    /// Two points closer than this are the same vertex.
    pub eps_merge: f64,
    /// A point within this distance of a line or segment lies on it.
    pub eps_dist: f64,
    /// Corner turns below this angle (radians) get no arc points.
    pub eps_angle: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_merge: 1e-9,
            eps_dist: 1e-9,
            eps_angle: 1e-12,
        }
    }
}

/// Closed axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Point,
    pub max: Point,
}

impl Aabb {
    /// Smallest box containing all points. `None` for an empty slice.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = *points.first()?;
        let mut out = Self {
            min: first,
            max: first,
        };
        for p in &points[1..] {
            out.min.x = out.min.x.min(p.x);
            out.min.y = out.min.y.min(p.y);
            out.max.x = out.max.x.max(p.x);
            out.max.y = out.max.y.max(p.y);
        }
        Some(out)
    }

    #[inline]
    pub fn of_segment(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Overlap test with `eps` slack on every side.
    #[inline]
    pub fn intersects(&self, other: &Aabb, eps: f64) -> bool {
        self.min.x <= other.max.x + eps
            && other.min.x <= self.max.x + eps
            && self.min.y <= other.max.y + eps
            && other.min.y <= self.max.y + eps
    }

    #[inline]
    pub fn contains(&self, p: Point, eps: f64) -> bool {
        p.x >= self.min.x - eps
            && p.x <= self.max.x + eps
            && p.y >= self.min.y - eps
            && p.y <= self.max.y + eps
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// Rejections raised while building or expanding polygons.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GeomError {
    #[error("polygon needs at least 3 distinct vertices, found {found}")]
    TooFewVertices { found: usize },
    #[error("polygon edges {first} and {second} intersect")]
    SelfIntersecting { first: usize, second: usize },
    #[error("polygon encloses no area")]
    Degenerate,
    #[error("polygon has a non-finite coordinate at vertex {index}")]
    NonFinite { index: usize },
    #[error("clearance radius must be finite and non-negative, got {radius}")]
    InvalidRadius { radius: f64 },
    #[error("arc approximation needs at least 3 points per corner, got {found}")]
    TooFewArcSegments { found: usize },
}
