//! Per-layer bundles: C-obstacles, visibility graph, and shortest-path index for
//! each clearance profile.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::geom2::{CObstacle, Point, Polygon};
use crate::paths::ShortestPathIndex;
use crate::visibility::{build_graph, BorderPolicy, VertexTag, VisibilityGraph, VisibilityTester};

use super::cfg::PlannerCfg;
use super::error::PlanError;
use super::scenario::LayerId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClearanceProfile {
    Tight,
    Generous,
}

impl ClearanceProfile {
    pub fn as_str(self) -> &'static str {
        match self {
            ClearanceProfile::Tight => "tight",
            ClearanceProfile::Generous => "generous",
        }
    }
}

impl fmt::Display for ClearanceProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An obstacle polygon blocking one layer, with the name used in errors.
#[derive(Clone, Copy, Debug)]
pub struct Blocker<'a> {
    pub name: &'a str,
    pub polygon: &'a Polygon,
}

/// Everything needed to answer queries for one (layer, profile).
#[derive(Clone, Debug)]
pub struct ProfilePlan {
    pub radius: f64,
    /// `source` indexes the blocker list the plan was built from.
    pub obstacles: Vec<CObstacle>,
    pub graph: VisibilityGraph,
    pub index: ShortestPathIndex,
}

impl ProfilePlan {
    pub fn build(
        blockers: &[Blocker<'_>],
        radius: f64,
        designated: &[(Point, VertexTag)],
        border: BorderPolicy,
        cfg: &PlannerCfg,
    ) -> Result<Self, PlanError> {
        let obstacles = blockers
            .iter()
            .enumerate()
            .map(|(i, b)| {
                CObstacle::expand_from(i, b.polygon, radius, cfg.arc_segments, &cfg.geom).map_err(
                    |source| PlanError::Expansion {
                        name: b.name.to_string(),
                        radius,
                        source,
                    },
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        let tester = VisibilityTester::new(&obstacles, cfg.geom).with_border(border);
        let graph = build_graph(designated, &tester);
        let index = ShortestPathIndex::build(&graph);
        Ok(Self {
            radius,
            obstacles,
            graph,
            index,
        })
    }
}

/// Tight and generous bundles of one layer. Equal radii share one bundle.
#[derive(Clone, Debug)]
pub struct LayerPlan {
    pub layer: LayerId,
    pub tight: Arc<ProfilePlan>,
    pub generous: Arc<ProfilePlan>,
}

impl LayerPlan {
    pub fn build(
        layer: LayerId,
        blockers: &[Blocker<'_>],
        designated: &[(Point, VertexTag)],
        border: BorderPolicy,
        cfg: &PlannerCfg,
    ) -> Result<Self, PlanError> {
        let tight = Arc::new(ProfilePlan::build(
            blockers,
            cfg.tight_radius,
            designated,
            border,
            cfg,
        )?);
        let generous = if cfg.generous_radius == cfg.tight_radius {
            Arc::clone(&tight)
        } else {
            Arc::new(ProfilePlan::build(
                blockers,
                cfg.generous_radius,
                designated,
                border,
                cfg,
            )?)
        };
        debug!(
            %layer,
            tight_vertices = tight.graph.len(),
            tight_edges = tight.graph.edge_count(),
            generous_vertices = generous.graph.len(),
            generous_edges = generous.graph.edge_count(),
            "layer graphs ready"
        );
        Ok(Self {
            layer,
            tight,
            generous,
        })
    }

    #[inline]
    pub fn profile(&self, profile: ClearanceProfile) -> &ProfilePlan {
        match profile {
            ClearanceProfile::Tight => &self.tight,
            ClearanceProfile::Generous => &self.generous,
        }
    }

    /// `true` when both profiles share one bundle.
    pub fn is_shared(&self) -> bool {
        Arc::ptr_eq(&self.tight, &self.generous)
    }
}
