//! # decipin-rs
//!
//! DeciPin is a fixed-length alphanumeric code for a point on a 0.0001° grid
//! covering latitudes and longitudes in `[0, 99.9999]`. Encoding truncates
//! to four decimals; decoding returns the center of the addressed cell.
//!
//! There are currently three main entry points.
//!
//! ### 1. `encode` / `decode` - Default Format
//!
//! ```
//! use decipin_rs::{decode, encode};
//!
//! # fn main() -> Result<(), decipin_rs::DeciPinError> {
//! let pin = encode(53.4808, 2.2479, true)?;
//! assert_eq!(pin, "5302.EI24/QY79");
//!
//! let cell = decode(&pin)?;
//! println!("{} {}", cell.lat(), cell.lon());
//! println!("{} {}", cell.lat_decimal(), cell.lon_decimal());
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `DeciPinCodec` - Custom Configuration
//!
//! ```
//! use decipin_rs::DeciPinCodec;
//!
//! # fn main() -> Result<(), decipin_rs::DeciPinError> {
//! let codec = DeciPinCodec::builder()
//!     .include_separators(false)
//!     .lenient_separators(true)
//!     .build()?;
//!
//! assert_eq!(codec.encode(0.0, 0.0)?, "0000AA00QQ00");
//! assert!(codec.decode("0000-aa00-qq00").is_ok());
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `CsvToPin` - CSV File Conversion
//!
//! ```no_run
//! use decipin_rs::{CsvToPin, GeometryFormat, PinCsvConfig};
//!
//! let config = PinCsvConfig::from_coords("Latitude", "Longitude")
//!     .exclude(vec!["Notes".into()])
//!     .with_cell_geometry(GeometryFormat::GeoJson);
//!
//! "input.csv".to_pin_csv("output.csv", &config).unwrap();
//! ```
//!

pub mod api;
pub mod core;
pub mod util;

pub use crate::api::{
    Bounds, CoordinateFormat, CoordinateSource, CsvToPin, DeciPinCodec, DeciPinCodecBuilder,
    DeciPinConfig, DecimalLatLon, DecodedPin, GeometryFormat, LatLon, PinCsvConfig,
    csv_to_pin_csv, decode, encode, is_valid_decipin, pin_csv_to_csv,
};
pub use crate::core::{
    CELL_SIZE, CODE_LENGTH, CODE_LENGTH_WITH_SEPARATORS, DECIPIN_BOUNDS, DECIPIN_START_HI,
    DECIPIN_START_LO, DeciPinPattern, HALF_CELL,
};
pub use crate::util::{Axis, Coordinate, DeciPinError};

pub use geo_types;
