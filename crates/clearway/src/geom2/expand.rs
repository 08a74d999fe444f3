//! Clearance expansion (Minkowski sum with an approximated disk).
//!
//! Model
//! - The obstacle is replaced by its convex hull `H`. For radius `r` the result is a
//!   convex polygon containing `H ⊕ B(r)` whose boundary keeps distance at least `r`
//!   from `H`.
//! - Every hull edge is pushed out by `r` along its outward normal. At each hull corner
//!   the gap between the two pushed edges is closed by `arc_segments` points: the two
//!   pushed-edge endpoints plus `arc_segments - 2` points circumscribing the arc, so
//!   every chord is tangent to the true circle of radius `r`.
//! - Arc directions depend only on the hull, so `expand(P, r1) ⊆ expand(P, r2)` for
//!   `r1 <= r2`.

use super::polygon::{Polygon, Winding};
use super::types::{GeomCfg, GeomError, Point};
use super::util::convex_hull;

/// An obstacle after expansion by one clearance radius.
#[derive(Clone, Debug)]
pub struct CObstacle {
    /// Index of the source obstacle in the caller's list.
    pub source: usize,
    pub radius: f64,
    pub polygon: Polygon,
    /// The obstacle before expansion. Nothing may ever enter it.
    pub core: Polygon,
}

impl CObstacle {
    /// An obstacle used as is; its core is the polygon itself.
    pub fn new(source: usize, radius: f64, polygon: Polygon) -> Self {
        Self {
            source,
            radius,
            core: polygon.clone(),
            polygon,
        }
    }

    pub fn with_core(mut self, core: Polygon) -> Self {
        self.core = core;
        self
    }

    /// Expand `polygon` by `radius` and tag the result with `source`.
    pub fn expand_from(
        source: usize,
        polygon: &Polygon,
        radius: f64,
        arc_segments: usize,
        cfg: &GeomCfg,
    ) -> Result<Self, GeomError> {
        let expanded = expand(polygon, radius, arc_segments, cfg)?;
        Ok(Self::new(source, radius, expanded).with_core(polygon.clone()))
    }
}

#[inline]
fn outward_normal(from: Point, to: Point) -> Point {
    // CCW order: outward is the edge direction rotated 90° clockwise.
    let e = to - from;
    Point::new(e.y, -e.x) / e.norm()
}

/// Expand `polygon` by `radius`; see the module docs for the construction.
///
/// Radius zero returns the input unchanged. The output keeps the winding of the input.
pub fn expand(
    polygon: &Polygon,
    radius: f64,
    arc_segments: usize,
    cfg: &GeomCfg,
) -> Result<Polygon, GeomError> {
    if !radius.is_finite() || radius < 0.0 {
        return Err(GeomError::InvalidRadius { radius });
    }
    if arc_segments < 3 {
        return Err(GeomError::TooFewArcSegments {
            found: arc_segments,
        });
    }
    if radius == 0.0 {
        return Ok(polygon.clone());
    }
    let hull = convex_hull(polygon.vertices(), cfg.eps_merge);
    if hull.len() < 3 {
        return Err(GeomError::Degenerate);
    }
    let n = hull.len();
    let inner = arc_segments - 2;
    let mut out: Vec<Point> = Vec::with_capacity(n * arc_segments);
    for i in 0..n {
        let prev = hull[(i + n - 1) % n];
        let v = hull[i];
        let next = hull[(i + 1) % n];
        let n_in = outward_normal(prev, v);
        let n_out = outward_normal(v, next);
        let turn = (n_in.x * n_out.y - n_in.y * n_out.x).atan2(n_in.dot(&n_out));
        out.push(v + n_in * radius);
        if turn <= cfg.eps_angle {
            continue;
        }
        let start = n_in.y.atan2(n_in.x);
        let step = turn / inner as f64;
        let reach = radius / (0.5 * step).cos();
        for k in 0..inner {
            let ang = start + (k as f64 + 0.5) * step;
            out.push(v + Point::new(ang.cos(), ang.sin()) * reach);
        }
        out.push(v + n_out * radius);
    }
    if polygon.winding() == Winding::Cw {
        out.reverse();
    }
    Polygon::from_valid(out)
}
