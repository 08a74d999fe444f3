//! Segment visibility against a set of C-obstacles.
//!
//! A segment `[a, b]` is blocked by an obstacle if it crosses an edge properly or if
//! any part of it runs through the obstacle's interior. Touching a corner or sliding
//! along an edge is fine, so paths can hug C-obstacle boundaries.
//!
//! The interior check splits `[a, b]` at every boundary contact (obstacle vertices
//! lying on the segment, plus both endpoints). Between two consecutive contacts the
//! open piece meets no boundary, so one midpoint decides whether it is inside.
//!
//! Escaping endpoints are designated points that sit in the clearance zone of a
//! C-obstacle. For that obstacle only the piece of the segment between the endpoint
//! and the first boundary crossing is exempt; the rest is tested as usual, and the
//! whole segment must still stay out of the obstacle's core.

use crate::geom2::{
    on_segment, segment_contact, segment_param, Aabb, CObstacle, GeomCfg, Point, Polygon,
    SegmentContact,
};

/// Forbids segments hugging one side of the domain rectangle.
///
/// A segment is excluded when both endpoints lie within `margin` of the same side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BorderPolicy {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl BorderPolicy {
    pub fn excludes(&self, a: Point, b: Point) -> bool {
        let m = self.margin;
        let near = |p: Point| {
            [
                p.x <= m,
                p.x >= self.width - m,
                p.y <= m,
                p.y >= self.height - m,
            ]
        };
        let (na, nb) = (near(a), near(b));
        na.iter().zip(nb.iter()).any(|(x, y)| *x && *y)
    }
}

#[derive(Clone, Debug)]
pub struct VisibilityTester<'a> {
    obstacles: &'a [CObstacle],
    border: Option<BorderPolicy>,
    cfg: GeomCfg,
}

impl<'a> VisibilityTester<'a> {
    pub fn new(obstacles: &'a [CObstacle], cfg: GeomCfg) -> Self {
        Self {
            obstacles,
            border: None,
            cfg,
        }
    }

    pub fn with_border(mut self, policy: BorderPolicy) -> Self {
        self.border = Some(policy);
        self
    }

    #[inline]
    pub fn obstacles(&self) -> &'a [CObstacle] {
        self.obstacles
    }

    #[inline]
    pub fn cfg(&self) -> &GeomCfg {
        &self.cfg
    }

    /// `true` if a mover can travel straight from `a` to `b`.
    pub fn is_visible(&self, a: Point, b: Point) -> bool {
        self.is_visible_escaping(a, b, false, false)
    }

    /// Like [`is_visible`](Self::is_visible), but an endpoint flagged as escaping may
    /// leave a C-obstacle that strictly contains it. Corners never escape.
    pub fn is_visible_escaping(&self, a: Point, b: Point, escape_a: bool, escape_b: bool) -> bool {
        if (b - a).norm() <= self.cfg.eps_merge {
            return false;
        }
        if let Some(policy) = &self.border {
            if policy.excludes(a, b) {
                return false;
            }
        }
        self.blocking_obstacle_escaping(a, b, escape_a, escape_b).is_none()
    }

    /// Index (into the tester's slice) of the first obstacle blocking `[a, b]`.
    pub fn blocking_obstacle(&self, a: Point, b: Point) -> Option<usize> {
        self.blocking_obstacle_escaping(a, b, false, false)
    }

    fn blocking_obstacle_escaping(
        &self,
        a: Point,
        b: Point,
        escape_a: bool,
        escape_b: bool,
    ) -> Option<usize> {
        let seg_box = Aabb::of_segment(a, b);
        let eps = self.cfg.eps_dist;
        self.obstacles.iter().position(|obs| {
            let poly = &obs.polygon;
            if !seg_box.intersects(poly.aabb(), eps) {
                return false;
            }
            let from_a = escape_a && poly.contains_strict(a, eps);
            let from_b = escape_b && poly.contains_strict(b, eps);
            if !from_a && !from_b {
                return blocks(poly, a, b, eps);
            }
            if blocks(&obs.core, a, b, eps) {
                return true;
            }
            let t0 = if from_a {
                first_exit(poly, a, b, eps)
            } else {
                0.0
            };
            let t1 = if from_b {
                1.0 - first_exit(poly, b, a, eps)
            } else {
                1.0
            };
            if t1 - t0 <= 0.0 {
                return false;
            }
            let (p0, p1) = (a + (b - a) * t0, a + (b - a) * t1);
            (p1 - p0).norm() > self.cfg.eps_merge && blocks(poly, p0, p1, eps)
        })
    }
}

/// Parameter along `[a, b]` of the first boundary crossing of `poly`, walking from `a`.
/// `1.0` if the segment never reaches the boundary.
fn first_exit(poly: &Polygon, a: Point, b: Point, eps: f64) -> f64 {
    let d = b - a;
    let mut t_min = 1.0_f64;
    for (p, q) in poly.edges() {
        let e = q - p;
        let denom = d.x * e.y - d.y * e.x;
        if denom.abs() <= f64::EPSILON * d.norm() * e.norm() {
            continue;
        }
        let w = p - a;
        let t = (w.x * e.y - w.y * e.x) / denom;
        let s = (w.x * d.y - w.y * d.x) / denom;
        let tol = eps / e.norm();
        if t > 0.0 && s >= -tol && s <= 1.0 + tol {
            t_min = t_min.min(t);
        }
    }
    t_min
}

/// `true` if `[a, b]` crosses or enters the interior of `poly`.
pub fn blocks(poly: &Polygon, a: Point, b: Point, eps: f64) -> bool {
    let mut contacts: Vec<f64> = vec![0.0, 1.0];
    for (p, q) in poly.edges() {
        if segment_contact(a, b, p, q, eps) == SegmentContact::Proper {
            return true;
        }
    }
    for v in poly.vertices() {
        if on_segment(*v, a, b, eps) {
            contacts.push(segment_param(*v, a, b).clamp(0.0, 1.0));
        }
    }
    contacts.sort_by(|x, y| x.total_cmp(y));
    contacts.dedup_by(|x, y| (*x - *y).abs() <= f64::EPSILON);
    contacts.windows(2).any(|w| {
        let mid = a + (b - a) * (0.5 * (w[0] + w[1]));
        poly.contains_strict(mid, eps)
    })
}

/// Visibility with default tolerances and no border policy.
pub fn is_visible(a: Point, b: Point, obstacles: &[CObstacle]) -> bool {
    VisibilityTester::new(obstacles, GeomCfg::default()).is_visible(a, b)
}
