pub mod codec;
pub mod config;
pub mod decoded;
pub mod pin_csv;

pub use codec::{DeciPinCodec, DeciPinCodecBuilder, decode, encode, is_valid_decipin};
pub use config::{Bounds, CoordinateFormat, DeciPinConfig};
pub use decoded::{DecimalLatLon, DecodedPin, LatLon};
pub use pin_csv::{
    CoordinateSource, CsvToPin, GeometryFormat, PinCsvConfig, csv_to_pin_csv, pin_csv_to_csv,
};
