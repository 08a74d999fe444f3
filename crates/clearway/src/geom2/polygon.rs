//! Simple polygons in vertex representation.
//!
//! A `Polygon` is validated once at construction (finite, at least three distinct
//! vertices, non-zero area, no crossing edges) and immutable afterwards. Both
//! orientations are accepted; `winding()` reports which one was given.

use super::types::{Aabb, GeomCfg, GeomError, Point};
use super::util::{point_segment_distance, segment_contact, signed_area, SegmentContact};

/// Vertex order of a polygon boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Winding {
    Ccw,
    Cw,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
    aabb: Aabb,
}

impl Polygon {
    /// Validate and build a polygon from an open vertex ring.
    ///
    /// Consecutive duplicates (and a repeated closing vertex) are dropped first.
    pub fn new(points: Vec<Point>, cfg: &GeomCfg) -> Result<Self, GeomError> {
        if let Some(index) = points
            .iter()
            .position(|p| !(p.x.is_finite() && p.y.is_finite()))
        {
            return Err(GeomError::NonFinite { index });
        }
        let mut vertices: Vec<Point> = Vec::with_capacity(points.len());
        for p in points {
            if vertices
                .last()
                .map_or(true, |last: &Point| (p - *last).norm() > cfg.eps_merge)
            {
                vertices.push(p);
            }
        }
        while vertices.len() > 1 {
            let (first, last) = (vertices[0], vertices[vertices.len() - 1]);
            if (first - last).norm() <= cfg.eps_merge {
                vertices.pop();
            } else {
                break;
            }
        }
        if vertices.len() < 3 {
            return Err(GeomError::TooFewVertices {
                found: vertices.len(),
            });
        }
        if signed_area(&vertices).abs() <= cfg.eps_dist {
            return Err(GeomError::Degenerate);
        }
        check_simple(&vertices, cfg)?;
        let aabb = Aabb::from_points(&vertices).ok_or(GeomError::TooFewVertices { found: 0 })?;
        Ok(Self { vertices, aabb })
    }

    /// Build from a ring already known to be a valid simple polygon (hull output).
    pub(crate) fn from_valid(vertices: Vec<Point>) -> Result<Self, GeomError> {
        if vertices.len() < 3 {
            return Err(GeomError::TooFewVertices {
                found: vertices.len(),
            });
        }
        let aabb = Aabb::from_points(&vertices).ok_or(GeomError::TooFewVertices { found: 0 })?;
        Ok(Self { vertices, aabb })
    }

    /// Axis-aligned rectangle `[x0, x1] × [y0, y1]` in CCW order.
    pub fn rect(x0: f64, y0: f64, x1: f64, y1: f64, cfg: &GeomCfg) -> Result<Self, GeomError> {
        Self::new(
            vec![
                Point::new(x0, y0),
                Point::new(x1, y0),
                Point::new(x1, y1),
                Point::new(x0, y1),
            ],
            cfg,
        )
    }

    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    /// Boundary edges `(v_i, v_{i+1})`, closing edge included.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    pub fn signed_area(&self) -> f64 {
        signed_area(&self.vertices)
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn winding(&self) -> Winding {
        if self.signed_area() >= 0.0 {
            Winding::Ccw
        } else {
            Winding::Cw
        }
    }

    /// Distance from `p` to the nearest boundary point.
    pub fn boundary_distance(&self, p: Point) -> f64 {
        self.edges()
            .map(|(a, b)| point_segment_distance(p, a, b))
            .fold(f64::INFINITY, f64::min)
    }

    /// `true` for points strictly inside: not within `eps` of the boundary.
    pub fn contains_strict(&self, p: Point, eps: f64) -> bool {
        if !self.aabb.contains(p, -eps) {
            return false;
        }
        if self.boundary_distance(p) <= eps {
            return false;
        }
        self.ray_cast(p)
    }

    /// `true` for points inside or within `eps` of the boundary.
    pub fn contains(&self, p: Point, eps: f64) -> bool {
        if !self.aabb.contains(p, eps) {
            return false;
        }
        self.boundary_distance(p) <= eps || self.ray_cast(p)
    }

    /// Even-odd ray cast towards +x. Only meaningful away from the boundary.
    fn ray_cast(&self, p: Point) -> bool {
        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y > p.y) != (b.y > p.y) {
                let x_at = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if p.x < x_at {
                    inside = !inside;
                }
            }
        }
        inside
    }
}

fn check_simple(vertices: &[Point], cfg: &GeomCfg) -> Result<(), GeomError> {
    let n = vertices.len();
    for i in 0..n {
        let (a, b) = (vertices[i], vertices[(i + 1) % n]);
        for j in (i + 1)..n {
            let adjacent = j == i + 1 || (i == 0 && j == n - 1);
            if adjacent {
                continue;
            }
            let (p, q) = (vertices[j], vertices[(j + 1) % n]);
            if segment_contact(a, b, p, q, cfg.eps_dist) != SegmentContact::Disjoint {
                return Err(GeomError::SelfIntersecting {
                    first: i,
                    second: j,
                });
            }
        }
    }
    Ok(())
}
