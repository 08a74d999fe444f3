//! Random convex obstacles (radial jitter + replay tokens).
//!
//! Purpose
//! - Provide a small, deterministic sampler for obstacle polygons used by property
//!   tests and the planning benchmark.
//!
//! Model
//! - Start from `n` equally spaced angles on [0, 2π), add bounded angular and
//!   radial jitter, build the convex hull, then translate to the requested center.
//! - Obstacle fields place polygons on a jittered grid so neighbours keep a gap.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::polygon::Polygon;
use super::types::{GeomCfg, Point};
use super::util::convex_hull;

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}
impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Radial-jitter sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct RadialCfg {
    pub vertex_count: VertexCount,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Radial jitter (relative amplitude). Radii = `base_radius * (1 + u)`, with `u∈[-radial_jitter, radial_jitter]`.
    pub radial_jitter: f64,
    /// Base radius around the center.
    pub base_radius: f64,
    /// Random global phase in [0, 2π)?
    pub random_phase: bool,
}
impl Default for RadialCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Uniform { min: 3, max: 8 },
            angle_jitter_frac: 0.3,
            radial_jitter: 0.25,
            base_radius: 1.0,
            random_phase: true,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}
impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a random convex polygon around `center` via radial jitter + convex hull.
///
/// Returns `None` only if the hull collapses, which the clamps make practically impossible.
pub fn draw_polygon_radial(cfg: RadialCfg, center: Point, tok: ReplayToken) -> Option<Polygon> {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.sample(&mut rng);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.clamp(0.0, 0.9);
    let r0 = cfg.base_radius.max(1e-6);
    let delta = 2.0 * std::f64::consts::PI / (n as f64);
    let phase = if cfg.random_phase {
        rng.gen::<f64>() * 2.0 * std::f64::consts::PI
    } else {
        0.0
    };
    let pts: Vec<Point> = (0..n)
        .map(|k| {
            let jitter = (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            let th = phase + (k as f64) * delta + jitter;
            let u = (rng.gen::<f64>() * 2.0 - 1.0) * rj;
            center + Vector2::new(th.cos(), th.sin()) * ((1.0 + u) * r0)
        })
        .collect();
    let geom = GeomCfg::default();
    let hull = convex_hull(&pts, geom.eps_merge);
    Polygon::new(hull, &geom).ok()
}

/// Grid-placed obstacle field inside `[0, width] × [0, height]`.
#[derive(Clone, Copy, Debug)]
pub struct FieldCfg {
    pub width: f64,
    pub height: f64,
    pub cols: usize,
    pub rows: usize,
    /// Fraction of a grid cell each obstacle may span (0, 1).
    pub fill: f64,
    pub shape: RadialCfg,
}

impl Default for FieldCfg {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
            cols: 4,
            rows: 4,
            fill: 0.5,
            shape: RadialCfg::default(),
        }
    }
}

/// Draw one obstacle per grid cell. Obstacles of distinct cells never overlap.
pub fn draw_obstacle_field(cfg: FieldCfg, seed: u64) -> Vec<Polygon> {
    let cols = cfg.cols.max(1);
    let rows = cfg.rows.max(1);
    let cell_w = cfg.width / cols as f64;
    let cell_h = cfg.height / rows as f64;
    let fill = cfg.fill.clamp(0.05, 0.95);
    // Outer radius bound so the shape stays inside its cell.
    let max_r = 0.5 * fill * cell_w.min(cell_h);
    let rj = cfg.shape.radial_jitter.clamp(0.0, 0.9);
    let shape = RadialCfg {
        base_radius: max_r / (1.0 + rj),
        ..cfg.shape
    };
    let mut out = Vec::with_capacity(cols * rows);
    for row in 0..rows {
        for col in 0..cols {
            let index = (row * cols + col) as u64;
            let center = Point::new((col as f64 + 0.5) * cell_w, (row as f64 + 0.5) * cell_h);
            if let Some(poly) = draw_polygon_radial(shape, center, ReplayToken { seed, index }) {
                out.push(poly);
            }
        }
    }
    out
}
