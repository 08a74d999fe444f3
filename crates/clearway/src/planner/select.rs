//! Clearance-profile choice per query.

use crate::geom2::Point;
use crate::paths::Route;
use crate::visibility::VertexId;

use super::cfg::validate_factor;
use super::error::PlanError;
use super::layer::{ClearanceProfile, LayerPlan, ProfilePlan};
use super::scenario::LayerId;

/// A route together with the profile it was taken from.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedRoute {
    pub route: Route,
    pub profile: ClearanceProfile,
    /// Clearance radius of `profile`.
    pub clearance: f64,
}

/// Pick a profile from the two candidate lengths.
///
/// Tight wins only if `tight * factor < generous`; an exact tie goes to generous.
pub fn choose_profile(
    tight: Option<f64>,
    generous: Option<f64>,
    factor: f64,
) -> Option<ClearanceProfile> {
    match (tight, generous) {
        (Some(t), Some(g)) if t * factor < g => Some(ClearanceProfile::Tight),
        (_, Some(_)) => Some(ClearanceProfile::Generous),
        (Some(_), None) => Some(ClearanceProfile::Tight),
        (None, None) => None,
    }
}

/// Read-only view on one layer's two bundles.
#[derive(Clone, Copy, Debug)]
pub struct RouteSelector<'a> {
    layer: LayerId,
    plan: &'a LayerPlan,
}

impl<'a> RouteSelector<'a> {
    pub fn new(plan: &'a LayerPlan) -> Self {
        Self {
            layer: plan.layer,
            plan,
        }
    }

    #[inline]
    pub fn layer(&self) -> LayerId {
        self.layer
    }

    /// Shortest route from `src` to `dst` under the better-fitting profile.
    pub fn select_route(
        &self,
        src: Point,
        dst: Point,
        clearance_factor: f64,
    ) -> Result<SelectedRoute, PlanError> {
        validate_factor(clearance_factor)?;
        let tight = self.candidate(&self.plan.tight, src, dst)?;
        let generous = self.candidate(&self.plan.generous, src, dst)?;
        let chosen = choose_profile(
            tight.as_ref().map(|r| r.length),
            generous.as_ref().map(|r| r.length),
            clearance_factor,
        );
        let (route, profile) = match chosen {
            Some(ClearanceProfile::Tight) => (tight, ClearanceProfile::Tight),
            Some(ClearanceProfile::Generous) => (generous, ClearanceProfile::Generous),
            None => (None, ClearanceProfile::Generous),
        };
        let route = route.ok_or_else(|| PlanError::NoRoute {
            layer: self.layer,
            from: fmt_point(src),
            to: fmt_point(dst),
        })?;
        Ok(SelectedRoute {
            route,
            profile,
            clearance: self.plan.profile(profile).radius,
        })
    }

    fn candidate(
        &self,
        bundle: &ProfilePlan,
        src: Point,
        dst: Point,
    ) -> Result<Option<Route>, PlanError> {
        let s = self.lookup(bundle, src)?;
        let t = self.lookup(bundle, dst)?;
        Ok(bundle.index.route(s, t))
    }

    fn lookup(&self, bundle: &ProfilePlan, p: Point) -> Result<VertexId, PlanError> {
        bundle.graph.find(p).ok_or(PlanError::UnknownPoint {
            layer: self.layer,
            x: p.x,
            y: p.y,
        })
    }
}

pub(crate) fn fmt_point(p: Point) -> String {
    format!("({}, {})", p.x, p.y)
}
