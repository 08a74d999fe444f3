//! Which areas move to which, and the routes connecting them.
//!
//! Rules
//! - Incident locations send to every patients-waiting area (exit → entry).
//! - Patients-waiting areas send to every clearing station (exit → entry).
//! - Ambulance parking areas drive to every clearing station (exit → exit), and
//!   afterwards loop back over the domain border to their own entry.
//! - Clearing stations and technical command have no outgoing routes.

use std::collections::BTreeMap;

use crate::geom2::Point;
use crate::visibility::{AreaId, VertexTag};

use super::error::PlanError;
use super::layer::LayerPlan;
use super::scenario::{Area, AreaKind, LayerId};
use super::select::{fmt_point, RouteSelector, SelectedRoute};

/// Which designated point of a destination area a route ends at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Entry,
    Exit,
}

/// Destination kind and target point for routes leaving an area of `kind`.
pub fn destination_rule(kind: AreaKind) -> Option<(AreaKind, Target)> {
    match kind {
        AreaKind::IncidentLocation => Some((AreaKind::PatientsWaiting, Target::Entry)),
        AreaKind::PatientsWaiting => Some((AreaKind::ClearingStation, Target::Entry)),
        AreaKind::AmbulanceParking => Some((AreaKind::ClearingStation, Target::Exit)),
        AreaKind::ClearingStation | AreaKind::TechnicalCommand => None,
    }
}

/// Destination areas and target points for routes leaving `areas[from]`.
///
/// Empty for kinds without a rule; an error if the rule names a kind no area has.
pub fn destinations(areas: &[Area], from: AreaId) -> Result<Vec<(AreaId, Point)>, PlanError> {
    let area = &areas[from.0];
    let Some((kind, target)) = destination_rule(area.kind) else {
        return Ok(Vec::new());
    };
    let out: Vec<(AreaId, Point)> = areas
        .iter()
        .enumerate()
        .filter(|(_, a)| a.kind == kind)
        .map(|(i, a)| {
            let p = match target {
                Target::Entry => a.entry,
                Target::Exit => a.exit,
            };
            (AreaId(i), p)
        })
        .collect();
    if out.is_empty() {
        return Err(PlanError::Config(format!(
            "area '{}' ({:?}) needs at least one {:?} area",
            area.name, area.kind, kind
        )));
    }
    Ok(out)
}

/// Designated points of one layer, tagged by area.
pub fn layer_seeds(layer: LayerId, areas: &[Area]) -> Vec<(Point, VertexTag)> {
    let mut out = Vec::new();
    for (i, a) in areas.iter().enumerate() {
        let id = AreaId(i);
        let parking = a.kind == AreaKind::AmbulanceParking;
        if layer == LayerId::AMBULANCE {
            if parking {
                out.push((a.entry, VertexTag::Entry(id)));
                out.push((a.exit, VertexTag::Exit(id)));
            } else if a.kind == AreaKind::ClearingStation {
                out.push((a.exit, VertexTag::Exit(id)));
            }
        } else {
            out.push((a.entry, VertexTag::Entry(id)));
            out.push((a.exit, VertexTag::Exit(id)));
        }
        if let (true, Some((be, bx))) = (parking, a.border) {
            out.push((be, VertexTag::BorderEntry(id)));
            out.push((bx, VertexTag::BorderExit(id)));
        }
    }
    out
}

/// Axis-aligned way along the domain border from `entry` to `exit` (entry excluded).
///
/// `None` if both points coincide; a single leg if they share a coordinate, else an
/// L-shape turning at `(entry.x, exit.y)`.
pub fn border_way(entry: Point, exit: Point, eps: f64) -> Option<Vec<Point>> {
    if (exit - entry).norm() <= eps {
        return None;
    }
    if (entry.x - exit.x).abs() <= eps || (entry.y - exit.y).abs() <= eps {
        return Some(vec![exit]);
    }
    Some(vec![Point::new(entry.x, exit.y), exit])
}

/// A precomputed route between two areas.
#[derive(Clone, Debug, PartialEq)]
pub struct AreaRoute {
    pub from: AreaId,
    pub to: AreaId,
    pub selected: SelectedRoute,
}

/// Return trip of an ambulance: destination → border entry, along the border,
/// border exit → parking entry.
#[derive(Clone, Debug, PartialEq)]
pub struct BorderLoop {
    pub parking: AreaId,
    pub destination: AreaId,
    pub to_border: SelectedRoute,
    /// Points after the border entry, up to and including the border exit.
    pub along_border: Vec<Point>,
    pub to_parking: SelectedRoute,
}

impl BorderLoop {
    /// The whole loop as one polyline.
    pub fn points(&self) -> Vec<Point> {
        let mut out = self.to_border.route.points.clone();
        out.extend(self.along_border.iter().copied());
        let back = &self.to_parking.route.points;
        out.extend(back.iter().skip(1).copied());
        out
    }

    pub fn length(&self) -> f64 {
        let mut prev = self.to_border.route.end();
        let mut along = 0.0;
        for p in &self.along_border {
            if let Some(q) = prev {
                along += (p - q).norm();
            }
            prev = Some(*p);
        }
        self.to_border.route.length + along + self.to_parking.route.length
    }
}

pub(crate) fn selector_for(
    layers: &BTreeMap<LayerId, LayerPlan>,
    layer: LayerId,
) -> Result<RouteSelector<'_>, PlanError> {
    layers
        .get(&layer)
        .map(RouteSelector::new)
        .ok_or(PlanError::UnknownLayer(layer))
}

fn name_route_error(err: PlanError, from: String, to: String) -> PlanError {
    match err {
        PlanError::NoRoute { layer, .. } => PlanError::NoRoute { layer, from, to },
        other => other,
    }
}

/// Select every required area-to-area route.
pub(crate) fn plan_area_routes(
    areas: &[Area],
    layers: &BTreeMap<LayerId, LayerPlan>,
    factor: f64,
) -> Result<Vec<AreaRoute>, PlanError> {
    let mut out = Vec::new();
    for (i, area) in areas.iter().enumerate() {
        let from = AreaId(i);
        let targets = destinations(areas, from)?;
        if targets.is_empty() {
            continue;
        }
        let selector = selector_for(layers, area.kind.layer())?;
        for (to, point) in targets {
            let selected = selector
                .select_route(area.exit, point, factor)
                .map_err(|e| {
                    name_route_error(
                        e,
                        format!("area '{}'", area.name),
                        format!("area '{}'", areas[to.0].name),
                    )
                })?;
            out.push(AreaRoute { from, to, selected });
        }
    }
    Ok(out)
}

/// Border loops for every ambulance route in `area_routes`.
pub(crate) fn plan_border_loops(
    areas: &[Area],
    area_routes: &[AreaRoute],
    layers: &BTreeMap<LayerId, LayerPlan>,
    factor: f64,
    eps: f64,
) -> Result<Vec<BorderLoop>, PlanError> {
    let selector = selector_for(layers, LayerId::AMBULANCE)?;
    let mut out = Vec::new();
    for ar in area_routes {
        let parking = &areas[ar.from.0];
        if parking.kind != AreaKind::AmbulanceParking {
            continue;
        }
        let Some((border_entry, border_exit)) = parking.border else {
            return Err(PlanError::Config(format!(
                "ambulance parking '{}' has no border points",
                parking.name
            )));
        };
        let dest = &areas[ar.to.0];
        let start = ar.selected.route.end().unwrap_or(dest.exit);
        let to_border = selector
            .select_route(start, border_entry, factor)
            .map_err(|e| {
                name_route_error(
                    e,
                    format!("area '{}'", dest.name),
                    format!("border entry {} of '{}'", fmt_point(border_entry), parking.name),
                )
            })?;
        let along_border = border_way(border_entry, border_exit, eps).unwrap_or_default();
        let to_parking = selector
            .select_route(border_exit, parking.entry, factor)
            .map_err(|e| {
                name_route_error(
                    e,
                    format!("border exit {} of '{}'", fmt_point(border_exit), parking.name),
                    format!("area '{}'", parking.name),
                )
            })?;
        out.push(BorderLoop {
            parking: ar.from,
            destination: ar.to,
            to_border,
            along_border,
            to_parking,
        });
    }
    Ok(out)
}
