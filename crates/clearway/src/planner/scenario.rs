//! Scenario model: domain rectangle, areas, and obstacles.

use std::fmt;

use crate::geom2::Point;

/// Movement layer. Each area kind has its own layer, and queries are always scoped to one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u8);

impl LayerId {
    pub const INCIDENT: LayerId = LayerId(0);
    pub const PATIENTS: LayerId = LayerId(1);
    pub const CLEARING: LayerId = LayerId(2);
    pub const COMMAND: LayerId = LayerId(3);
    pub const AMBULANCE: LayerId = LayerId(4);

    pub const ALL: [LayerId; 5] = [
        Self::INCIDENT,
        Self::PATIENTS,
        Self::CLEARING,
        Self::COMMAND,
        Self::AMBULANCE,
    ];
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer {}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AreaKind {
    IncidentLocation,
    PatientsWaiting,
    ClearingStation,
    TechnicalCommand,
    AmbulanceParking,
}

impl AreaKind {
    /// The layer movers leaving this area travel on.
    pub fn layer(self) -> LayerId {
        LayerId(self.code())
    }

    pub fn code(self) -> u8 {
        match self {
            AreaKind::IncidentLocation => 0,
            AreaKind::PatientsWaiting => 1,
            AreaKind::ClearingStation => 2,
            AreaKind::TechnicalCommand => 3,
            AreaKind::AmbulanceParking => 4,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => AreaKind::IncidentLocation,
            1 => AreaKind::PatientsWaiting,
            2 => AreaKind::ClearingStation,
            3 => AreaKind::TechnicalCommand,
            4 => AreaKind::AmbulanceParking,
            _ => return None,
        })
    }
}

/// A named region with designated entry and exit points.
#[derive(Clone, Debug, PartialEq)]
pub struct Area {
    pub name: String,
    pub kind: AreaKind,
    pub vertices: Vec<Point>,
    pub entry: Point,
    pub exit: Point,
    /// `(border entry, border exit)` on the domain border; required for parking areas.
    pub border: Option<(Point, Point)>,
}

/// Which layers an obstacle blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerMask {
    All,
    Only(LayerId),
}

impl LayerMask {
    #[inline]
    pub fn blocks(self, layer: LayerId) -> bool {
        match self {
            LayerMask::All => true,
            LayerMask::Only(l) => l == layer,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObstacleSpec {
    pub name: String,
    pub vertices: Vec<Point>,
    pub layers: LayerMask,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scenario {
    pub domain: Domain,
    pub areas: Vec<Area>,
    pub obstacles: Vec<ObstacleSpec>,
}
