//! Scenario planning: validation, per-layer graph bundles, and precomputed routes.
//!
//! Purpose
//! - Turn a `Scenario` (domain, areas, obstacles) and a `PlannerCfg` into immutable
//!   per-layer bundles for a tight and a generous clearance, then select every route
//!   the area itinerary requires.
//! - All failures surface from `Planner::build` as one `PlanError`; after that the
//!   planner only answers read-only queries.
//!
//! Layers
//! - Layer `k` serves movers leaving areas of kind `k`. Obstacles block every layer
//!   or exactly one; with `no_knock_over` the non-parking areas also block the
//!   ambulance layer.
//! - Segments hugging one side of the domain are excluded on every layer, with the
//!   generous radius as margin; ambulances return along the border through
//!   precomputed border loops instead.
//!
//! Code cross-refs: `visibility::{VisibilityTester, build_graph}`, `paths::ShortestPathIndex`

mod cfg;
mod error;
pub mod itinerary;
mod layer;
mod scenario;
mod select;

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::geom2::{Point, Polygon};
use crate::visibility::{AreaId, BorderPolicy};

pub use cfg::PlannerCfg;
pub use error::PlanError;
pub use itinerary::{border_way, AreaRoute, BorderLoop};
pub use layer::{Blocker, ClearanceProfile, LayerPlan, ProfilePlan};
pub use scenario::{Area, AreaKind, Domain, LayerId, LayerMask, ObstacleSpec, Scenario};
pub use select::{choose_profile, RouteSelector, SelectedRoute};

#[derive(Clone, Debug)]
pub struct Planner {
    cfg: PlannerCfg,
    domain: Domain,
    areas: Vec<Area>,
    layers: BTreeMap<LayerId, LayerPlan>,
    area_routes: Vec<AreaRoute>,
    border_loops: Vec<BorderLoop>,
}

impl Planner {
    pub fn build(scenario: &Scenario, cfg: &PlannerCfg) -> Result<Self, PlanError> {
        cfg.validate()?;
        let domain = scenario.domain;
        if !(domain.width.is_finite() && domain.height.is_finite())
            || domain.width <= 0.0
            || domain.height <= 0.0
        {
            return Err(PlanError::Config(format!(
                "domain must have positive finite size, got {} x {}",
                domain.width, domain.height
            )));
        }
        let obstacles = validate_obstacles(scenario, cfg)?;
        let area_polys = validate_areas(scenario, cfg)?;
        warn_overlaps(scenario, &obstacles, &area_polys);

        let border = BorderPolicy {
            width: domain.width,
            height: domain.height,
            margin: cfg.generous_radius,
        };
        let mut layers = BTreeMap::new();
        for layer in LayerId::ALL {
            let mut blockers: Vec<Blocker<'_>> = scenario
                .obstacles
                .iter()
                .zip(&obstacles)
                .filter(|(spec, _)| spec.layers.blocks(layer))
                .map(|(spec, polygon)| Blocker {
                    name: &spec.name,
                    polygon,
                })
                .collect();
            if cfg.no_knock_over && layer == LayerId::AMBULANCE {
                blockers.extend(
                    scenario
                        .areas
                        .iter()
                        .zip(&area_polys)
                        .filter(|(a, _)| a.kind != AreaKind::AmbulanceParking)
                        .map(|(a, polygon)| Blocker {
                            name: &a.name,
                            polygon,
                        }),
                );
            }
            let seeds = itinerary::layer_seeds(layer, &scenario.areas);
            let plan = LayerPlan::build(layer, &blockers, &seeds, border, cfg)?;
            info!(
                %layer,
                obstacles = blockers.len(),
                vertices = plan.generous.graph.len(),
                edges = plan.generous.graph.edge_count(),
                shared = plan.is_shared(),
                "layer built"
            );
            layers.insert(layer, plan);
        }

        let area_routes =
            itinerary::plan_area_routes(&scenario.areas, &layers, cfg.clearance_factor)?;
        let border_loops = itinerary::plan_border_loops(
            &scenario.areas,
            &area_routes,
            &layers,
            cfg.clearance_factor,
            cfg.geom.eps_merge,
        )?;
        info!(
            areas = scenario.areas.len(),
            routes = area_routes.len(),
            border_loops = border_loops.len(),
            "planner ready"
        );
        Ok(Self {
            cfg: *cfg,
            domain,
            areas: scenario.areas.clone(),
            layers,
            area_routes,
            border_loops,
        })
    }

    #[inline]
    pub fn cfg(&self) -> &PlannerCfg {
        &self.cfg
    }

    #[inline]
    pub fn domain(&self) -> Domain {
        self.domain
    }

    #[inline]
    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    pub fn layer(&self, layer: LayerId) -> Result<&LayerPlan, PlanError> {
        self.layers.get(&layer).ok_or(PlanError::UnknownLayer(layer))
    }

    pub fn layers(&self) -> impl Iterator<Item = &LayerPlan> {
        self.layers.values()
    }

    pub fn selector(&self, layer: LayerId) -> Result<RouteSelector<'_>, PlanError> {
        itinerary::selector_for(&self.layers, layer)
    }

    /// Route query with the configured clearance factor.
    pub fn select_route(
        &self,
        layer: LayerId,
        src: Point,
        dst: Point,
    ) -> Result<SelectedRoute, PlanError> {
        self.selector(layer)?
            .select_route(src, dst, self.cfg.clearance_factor)
    }

    /// Every precomputed area route, in area order.
    #[inline]
    pub fn all_area_routes(&self) -> &[AreaRoute] {
        &self.area_routes
    }

    /// Routes leaving `area`.
    pub fn area_routes(&self, area: AreaId) -> impl Iterator<Item = &AreaRoute> {
        self.area_routes.iter().filter(move |r| r.from == area)
    }

    #[inline]
    pub fn all_border_loops(&self) -> &[BorderLoop] {
        &self.border_loops
    }

    /// Border loops of parking area `area`, one per destination.
    pub fn border_loops(&self, area: AreaId) -> impl Iterator<Item = &BorderLoop> {
        self.border_loops.iter().filter(move |b| b.parking == area)
    }

    pub fn area_id(&self, name: &str) -> Option<AreaId> {
        self.areas.iter().position(|a| a.name == name).map(AreaId)
    }
}

fn validate_obstacles(scenario: &Scenario, cfg: &PlannerCfg) -> Result<Vec<Polygon>, PlanError> {
    let Domain { width, height } = scenario.domain;
    let eps = cfg.geom.eps_dist;
    scenario
        .obstacles
        .iter()
        .map(|spec| {
            let poly = Polygon::new(spec.vertices.clone(), &cfg.geom).map_err(|source| {
                PlanError::InvalidObstacle {
                    name: spec.name.clone(),
                    source,
                }
            })?;
            if let Some(p) = poly.vertices().iter().find(|p| {
                p.x < -eps || p.y < -eps || p.x > width + eps || p.y > height + eps
            }) {
                return Err(PlanError::ObstacleOutOfBounds {
                    name: spec.name.clone(),
                    x: p.x,
                    y: p.y,
                });
            }
            Ok(poly)
        })
        .collect()
}

fn validate_areas(scenario: &Scenario, cfg: &PlannerCfg) -> Result<Vec<Polygon>, PlanError> {
    let Domain { width, height } = scenario.domain;
    let r = cfg.generous_radius;
    scenario
        .areas
        .iter()
        .map(|area| {
            let poly = Polygon::new(area.vertices.clone(), &cfg.geom).map_err(|source| {
                PlanError::InvalidArea {
                    name: area.name.clone(),
                    source,
                }
            })?;
            if let Some(p) = poly
                .vertices()
                .iter()
                .find(|p| p.x < r || p.y < r || p.x > width - r || p.y > height - r)
            {
                return Err(PlanError::AreaTooCloseToBorder {
                    name: area.name.clone(),
                    x: p.x,
                    y: p.y,
                    radius: r,
                });
            }
            if area.kind == AreaKind::AmbulanceParking && area.border.is_none() {
                return Err(PlanError::Config(format!(
                    "ambulance parking '{}' has no border points",
                    area.name
                )));
            }
            Ok(poly)
        })
        .collect()
}

fn warn_overlaps(scenario: &Scenario, obstacles: &[Polygon], areas: &[Polygon]) {
    for (spec, obs) in scenario.obstacles.iter().zip(obstacles) {
        for (area, poly) in scenario.areas.iter().zip(areas) {
            if obs.aabb().intersects(poly.aabb(), 0.0) {
                warn!(obstacle = %spec.name, area = %area.name, "obstacle overlaps area");
            }
        }
    }
}
