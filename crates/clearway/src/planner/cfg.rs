use crate::geom2::GeomCfg;

use super::error::PlanError;

/// Planner configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlannerCfg {
    /// Clearance radius of the tight profile.
    pub tight_radius: f64,
    /// Clearance radius of the generous profile; also the border margin.
    pub generous_radius: f64,
    /// Points per expanded corner (>= 3).
    pub arc_segments: usize,
    /// Tight routes win only if `tight_len * factor < generous_len`.
    pub clearance_factor: f64,
    /// Non-parking areas block the ambulance layer.
    pub no_knock_over: bool,
    pub geom: GeomCfg,
}

impl Default for PlannerCfg {
    fn default() -> Self {
        Self {
            tight_radius: 2.5,
            generous_radius: 2.5,
            arc_segments: 4,
            clearance_factor: 1.0,
            no_knock_over: false,
            geom: GeomCfg::default(),
        }
    }
}

impl PlannerCfg {
    pub fn validate(&self) -> Result<(), PlanError> {
        for (label, r) in [
            ("tight_radius", self.tight_radius),
            ("generous_radius", self.generous_radius),
        ] {
            if !r.is_finite() || r < 0.0 {
                return Err(PlanError::Config(format!(
                    "{label} must be finite and non-negative, got {r}"
                )));
            }
        }
        if self.tight_radius > self.generous_radius {
            return Err(PlanError::Config(format!(
                "tight_radius {} exceeds generous_radius {}",
                self.tight_radius, self.generous_radius
            )));
        }
        if self.arc_segments < 3 {
            return Err(PlanError::Config(format!(
                "arc_segments must be at least 3, got {}",
                self.arc_segments
            )));
        }
        validate_factor(self.clearance_factor)
    }
}

pub(crate) fn validate_factor(factor: f64) -> Result<(), PlanError> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(PlanError::Config(format!(
            "clearance_factor must be finite and positive, got {factor}"
        )));
    }
    Ok(())
}
