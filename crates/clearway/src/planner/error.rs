use thiserror::Error;

use crate::geom2::GeomError;

use super::scenario::LayerId;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum PlanError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("obstacle '{name}' is not a valid polygon")]
    InvalidObstacle {
        name: String,
        #[source]
        source: GeomError,
    },
    #[error("area '{name}' is not a valid polygon")]
    InvalidArea {
        name: String,
        #[source]
        source: GeomError,
    },
    #[error("obstacle '{name}' has vertex ({x}, {y}) outside the domain")]
    ObstacleOutOfBounds { name: String, x: f64, y: f64 },
    #[error("area '{name}' has vertex ({x}, {y}) closer than {radius} to the domain border")]
    AreaTooCloseToBorder {
        name: String,
        x: f64,
        y: f64,
        radius: f64,
    },
    #[error("expanding '{name}' by {radius} failed")]
    Expansion {
        name: String,
        radius: f64,
        #[source]
        source: GeomError,
    },
    #[error("no route on {layer} from {from} to {to}")]
    NoRoute {
        layer: LayerId,
        from: String,
        to: String,
    },
    #[error("({x}, {y}) is not a vertex of {layer}")]
    UnknownPoint { layer: LayerId, x: f64, y: f64 },
    #[error("{0} was not built")]
    UnknownLayer(LayerId),
}
