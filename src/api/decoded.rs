use crate::api::config::CoordinateFormat;
use crate::core::constants::{CENTER_UNITS_PER_DEGREE, SCALE_FACTOR};
use crate::util::coord::Coordinate;
use geo_types::{Point, Polygon, Rect, coord};
use serde::{Deserialize, Serialize};

/// Cell center as floating point degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

/// Cell center as exact decimal strings, e.g. `"53.48085"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecimalLatLon {
    pub lat: String,
    pub lon: String,
}

/// The result of decoding a DeciPin: the cell the code addresses.
///
/// Each axis is kept as an integer count of 0.0001° grid units, so the cell
/// center (`units + 0.00005`) is available both as an exact decimal string and
/// as the nearest `f64`.
///
/// # Example
/// ```
/// use decipin_rs::decode;
///
/// # fn main() -> Result<(), decipin_rs::DeciPinError> {
/// let pin = decode("5302.EI24/QY79")?;
/// assert_eq!(pin.code(), "5302EI24QY79");
/// assert_eq!(pin.lat_decimal(), "53.48085");
/// assert_eq!(pin.lon_decimal(), "02.24795");
/// assert!((pin.lat() - 53.48085).abs() < 1e-12);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DecodedPin {
    code: String,
    lat_units: u32,
    lon_units: u32,
}

impl DecodedPin {
    pub(crate) fn new(code: String, lat_units: u32, lon_units: u32) -> Self {
        Self {
            code,
            lat_units,
            lon_units,
        }
    }

    /// Canonical 12-character code: upper-case, no separators.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Latitude grid index in 0.0001° units (south edge of the cell).
    pub fn lat_units(&self) -> u32 {
        self.lat_units
    }

    /// Longitude grid index in 0.0001° units (west edge of the cell).
    pub fn lon_units(&self) -> u32 {
        self.lon_units
    }

    /// Latitude of the cell center.
    pub fn lat(&self) -> f64 {
        center_degrees(self.lat_units)
    }

    /// Longitude of the cell center.
    pub fn lon(&self) -> f64 {
        center_degrees(self.lon_units)
    }

    /// Latitude of the cell center as an exact decimal string.
    pub fn lat_decimal(&self) -> String {
        center_decimal(self.lat_units)
    }

    /// Longitude of the cell center as an exact decimal string.
    pub fn lon_decimal(&self) -> String {
        center_decimal(self.lon_units)
    }

    pub fn as_lat_lon(&self) -> LatLon {
        LatLon {
            lat: self.lat(),
            lon: self.lon(),
        }
    }

    pub fn as_decimal(&self) -> DecimalLatLon {
        DecimalLatLon {
            lat: self.lat_decimal(),
            lon: self.lon_decimal(),
        }
    }

    /// Renders `(lat, lon)` as text in the requested representation.
    pub fn formatted(&self, format: CoordinateFormat) -> (String, String) {
        match format {
            CoordinateFormat::Float => (self.lat().to_string(), self.lon().to_string()),
            CoordinateFormat::Decimal => (self.lat_decimal(), self.lon_decimal()),
        }
    }

    /// Renders the center as a JSON object in the requested representation.
    pub fn to_json(&self, format: CoordinateFormat) -> serde_json::Value {
        match format {
            CoordinateFormat::Float => serde_json::json!(self.as_lat_lon()),
            CoordinateFormat::Decimal => serde_json::json!(self.as_decimal()),
        }
    }

    /// Cell center as a point (`x = lon`, `y = lat`).
    pub fn to_point(&self) -> Point<f64> {
        Point::new(self.lon(), self.lat())
    }

    /// The 0.0001° x 0.0001° cell this code addresses (`x = lon`, `y = lat`).
    pub fn cell(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: edge_degrees(self.lon_units), y: edge_degrees(self.lat_units) },
            coord! { x: edge_degrees(self.lon_units + 1), y: edge_degrees(self.lat_units + 1) },
        )
    }

    /// Converts the cell to a polygon, suitable for WKT or GeoJSON export.
    pub fn to_polygon(&self) -> Polygon<f64> {
        self.cell().to_polygon()
    }
}

impl Coordinate for DecodedPin {
    fn lat(&self) -> f64 { DecodedPin::lat(self) }
    fn lon(&self) -> f64 { DecodedPin::lon(self) }
}

fn center_units(units: u32) -> u32 {
    units * 10 + 5
}

fn center_degrees(units: u32) -> f64 {
    f64::from(center_units(units)) / f64::from(CENTER_UNITS_PER_DEGREE)
}

fn center_decimal(units: u32) -> String {
    let center = center_units(units);
    format!(
        "{:02}.{:05}",
        center / CENTER_UNITS_PER_DEGREE,
        center % CENTER_UNITS_PER_DEGREE
    )
}

fn edge_degrees(units: u32) -> f64 {
    f64::from(units) / SCALE_FACTOR
}
