use std::cmp::Ordering;

use super::types::Point;

/// Twice the signed area of triangle `abc`. Positive when `c` lies left of `a→b`.
#[inline]
pub fn cross(a: Point, b: Point, c: Point) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

/// Which side of the line through `a→b` the point `p` is on: `1` left, `-1` right,
/// `0` within `eps` of the line (or `a≈b`).
#[inline]
pub fn side(a: Point, b: Point, p: Point, eps: f64) -> i8 {
    let len = (b - a).norm();
    if len <= eps {
        return 0;
    }
    let dist = cross(a, b, p) / len;
    if dist > eps {
        1
    } else if dist < -eps {
        -1
    } else {
        0
    }
}

/// Distance from `p` to the closed segment `[a, b]`.
pub fn point_segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 == 0.0 {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}

/// `true` if `p` lies on the closed segment `[a, b]` up to `eps`.
#[inline]
pub fn on_segment(p: Point, a: Point, b: Point, eps: f64) -> bool {
    point_segment_distance(p, a, b) <= eps
}

/// Parameter of the projection of `p` onto the line `a + t (b - a)`.
#[inline]
pub fn segment_param(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 == 0.0 {
        0.0
    } else {
        (p - a).dot(&ab) / len2
    }
}

/// How two segments meet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentContact {
    Disjoint,
    /// Interiors cross transversally at a single point.
    Proper,
    /// They share at least one point, and one of those points is an endpoint
    /// of one segment or the segments overlap collinearly.
    Touch,
}

/// Classify the contact between segments `[a, b]` and `[p, q]`.
pub fn segment_contact(a: Point, b: Point, p: Point, q: Point, eps: f64) -> SegmentContact {
    let d1 = side(p, q, a, eps);
    let d2 = side(p, q, b, eps);
    let d3 = side(a, b, p, eps);
    let d4 = side(a, b, q, eps);
    if d1 * d2 < 0 && d3 * d4 < 0 {
        return SegmentContact::Proper;
    }
    if on_segment(a, p, q, eps)
        || on_segment(b, p, q, eps)
        || on_segment(p, a, b, eps)
        || on_segment(q, a, b, eps)
    {
        SegmentContact::Touch
    } else {
        SegmentContact::Disjoint
    }
}

#[inline]
fn lex_cmp(a: &Point, b: &Point) -> Ordering {
    match a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal) {
        Ordering::Equal => a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal),
        o => o,
    }
}

/// Andrew’s monotone chain convex hull (CCW, collinear points dropped).
///
/// Points closer than `eps` collapse. Returns fewer than three points when the input
/// spans no area.
pub fn convex_hull(points: &[Point], eps: f64) -> Vec<Point> {
    let mut pts: Vec<Point> = points.to_vec();
    pts.sort_by(lex_cmp);
    pts.dedup_by(|a, b| (*a - *b).norm() <= eps);
    if pts.len() < 3 {
        return pts;
    }
    let mut lower: Vec<Point> = Vec::with_capacity(pts.len());
    for p in &pts {
        while lower.len() >= 2 && side(lower[lower.len() - 2], lower[lower.len() - 1], *p, eps) <= 0
        {
            lower.pop();
        }
        lower.push(*p);
    }
    let mut upper: Vec<Point> = Vec::with_capacity(pts.len());
    for p in pts.iter().rev() {
        while upper.len() >= 2 && side(upper[upper.len() - 2], upper[upper.len() - 1], *p, eps) <= 0
        {
            upper.pop();
        }
        upper.push(*p);
    }
    lower.pop();
    upper.pop();
    let mut hull = lower;
    hull.extend(upper);
    hull
}

/// Signed shoelace area (positive for CCW).
pub fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        acc += a.x * b.y - a.y * b.x;
    }
    0.5 * acc
}
