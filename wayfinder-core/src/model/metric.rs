//! Distance metrics used for edge weights, snapping and the search heuristic

use geo::{Distance, Euclidean, Haversine, Point};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Planar distance in coordinate units
    #[default]
    Euclidean,
    /// Great-circle distance in meters, coordinates are lon/lat degrees
    Haversine,
}

impl Metric {
    pub fn distance(self, a: Point<f64>, b: Point<f64>) -> f64 {
        match self {
            Metric::Euclidean => Euclidean.distance(a, b),
            Metric::Haversine => Haversine.distance(a, b),
        }
    }

    /// Whether nearest neighbours under this metric match the planar ones
    pub fn is_planar(self) -> bool {
        matches!(self, Metric::Euclidean)
    }
}
