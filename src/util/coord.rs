use geo_types::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Anything that can report a latitude and a longitude in decimal degrees.
///
/// Tuples are read as `(lat, lon)`. Points follow the GIS convention of
/// `x = lon`, `y = lat`.
pub trait Coordinate {
    fn lat(&self) -> f64;
    fn lon(&self) -> f64;
}

impl Coordinate for (f64, f64) {
    fn lat(&self) -> f64 { self.0 }
    fn lon(&self) -> f64 { self.1 }
}

impl Coordinate for Point<f64> {
    fn lat(&self) -> f64 { self.y() }
    fn lon(&self) -> f64 { self.x() }
}

/// Which half of a coordinate pair a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Latitude,
    Longitude,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Latitude => write!(f, "latitude"),
            Axis::Longitude => write!(f, "longitude"),
        }
    }
}
