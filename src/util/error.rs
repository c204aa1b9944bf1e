use crate::util::coord::Axis;
use thiserror::Error;

/// Result type for decipin-rs operations.
pub type Result<T> = std::result::Result<T, DeciPinError>;

/// Error type for decipin-rs operations.
#[derive(Debug, Error, PartialEq)]
pub enum DeciPinError {
    /// A coordinate lies outside the configured bounds.
    #[error("{axis} out of range: {value} (expected {min} to {max})")]
    OutOfRange {
        axis: Axis,
        value: f64,
        min: f64,
        max: f64,
    },

    /// The input does not match the DeciPin grammar. Carries the upper-cased input.
    #[error("Invalid DeciPin: '{0}'")]
    InvalidFormat(String),

    /// The codec configuration is unusable (bad anchors, separators or bounds).
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// The configuration file could not be parsed.
    #[error("Config parse error: {0}")]
    ConfigParseError(String),

    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(String),

    /// CSV parsing or writing error.
    #[error("CSV error: {0}")]
    CsvError(String),

    /// Failed to parse geometry from string (GeoJSON or WKT).
    #[error("Geometry parse error: {0}")]
    GeometryParseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = DeciPinError::OutOfRange {
            axis: Axis::Latitude,
            value: 100.0,
            min: 0.0,
            max: 99.9999,
        };
        assert_eq!(
            err.to_string(),
            "latitude out of range: 100 (expected 0 to 99.9999)"
        );
    }

    #[test]
    fn test_invalid_format_message() {
        let err = DeciPinError::InvalidFormat("XYZ".to_string());
        assert_eq!(err.to_string(), "Invalid DeciPin: 'XYZ'");
    }
}
