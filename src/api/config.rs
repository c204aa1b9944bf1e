use crate::core::constants::{
    ALPHABET_WIDTH, DECIPIN_BOUNDS, DECIPIN_START_HI, DECIPIN_START_LO, DEFAULT_SEPARATOR_HI,
    DEFAULT_SEPARATOR_LO,
};
use crate::util::coord::Axis;
use crate::util::error::DeciPinError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Inclusive coordinate bounds accepted by the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        let [min_lat, max_lat, min_lon, max_lon] = DECIPIN_BOUNDS;
        Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }
}

impl Bounds {
    /// Returns the `(min, max)` pair for an axis.
    pub fn range(&self, axis: Axis) -> (f64, f64) {
        match axis {
            Axis::Latitude => (self.min_lat, self.max_lat),
            Axis::Longitude => (self.min_lon, self.max_lon),
        }
    }

    /// Fails with [`DeciPinError::OutOfRange`] unless `min <= value <= max`.
    ///
    /// NaN is always out of range.
    pub fn check(&self, axis: Axis, value: f64) -> Result<(), DeciPinError> {
        let (min, max) = self.range(axis);
        if (min..=max).contains(&value) {
            Ok(())
        } else {
            Err(DeciPinError::OutOfRange {
                axis,
                value,
                min,
                max,
            })
        }
    }
}

/// How decoded coordinates are rendered by the CLI and CSV decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateFormat {
    /// `f64` values, e.g. `53.48085`
    #[default]
    Float,
    /// Exact decimal strings with two integer digits, e.g. `"53.48085"`
    Decimal,
}

/// Configuration for a [`DeciPinCodec`](crate::DeciPinCodec).
///
/// The defaults reproduce the reference DeciPin format: anchors `'A'` and
/// `'Q'`, bounds `[0, 99.9999]` on both axes, separators `'.'` and `'/'`
/// emitted by default, strict separator grammar.
///
/// # Example
/// ```
/// use decipin_rs::{CoordinateFormat, DeciPinConfig};
///
/// let config = DeciPinConfig::default()
///     .include_separators(false)
///     .output_format(CoordinateFormat::Decimal);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeciPinConfig {
    /// Letter that digit 0 maps to for latitude decimal digits 1-2
    pub hi_anchor: char,
    /// Letter that digit 0 maps to for latitude decimal digits 3-4
    pub lo_anchor: char,
    pub bounds: Bounds,
    /// Whether `encode` emits separators when not told otherwise
    pub include_separators: bool,
    /// Separators after the 4th and the 8th character
    pub separators: (char, char),
    /// Also accept `'-'` at either separator position when decoding
    pub lenient_separators: bool,
    pub output_format: CoordinateFormat,
}

impl Default for DeciPinConfig {
    fn default() -> Self {
        Self {
            hi_anchor: DECIPIN_START_HI,
            lo_anchor: DECIPIN_START_LO,
            bounds: Bounds::default(),
            include_separators: true,
            separators: (DEFAULT_SEPARATOR_HI, DEFAULT_SEPARATOR_LO),
            lenient_separators: false,
            output_format: CoordinateFormat::default(),
        }
    }
}

impl DeciPinConfig {
    pub fn anchors(mut self, hi: char, lo: char) -> Self {
        self.hi_anchor = hi;
        self.lo_anchor = lo;
        self
    }

    pub fn bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn include_separators(mut self, include: bool) -> Self {
        self.include_separators = include;
        self
    }

    pub fn separators(mut self, hi: char, lo: char) -> Self {
        self.separators = (hi, lo);
        self
    }

    pub fn lenient_separators(mut self, lenient: bool) -> Self {
        self.lenient_separators = lenient;
        self
    }

    pub fn output_format(mut self, format: CoordinateFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Parses a JSON configuration and validates it. Missing fields take their defaults.
    ///
    /// # Example
    /// ```
    /// use decipin_rs::DeciPinConfig;
    ///
    /// # fn main() -> Result<(), decipin_rs::DeciPinError> {
    /// let config = DeciPinConfig::from_json_str(r#"{"include_separators": false}"#)?;
    /// assert!(!config.include_separators);
    /// assert_eq!(config.hi_anchor, 'A');
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, DeciPinError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| DeciPinError::ConfigParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON configuration file. See [`DeciPinConfig::from_json_str`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DeciPinError> {
        let json =
            std::fs::read_to_string(path).map_err(|e| DeciPinError::IoError(e.to_string()))?;
        Self::from_json_str(&json)
    }

    /// Checks that the configuration describes a decodable format.
    ///
    /// # Errors
    ///
    /// [`DeciPinError::InvalidConfig`] when:
    /// - an anchor is not an ASCII upper-case letter, or its 10-letter run passes `'Z'`
    /// - the two anchor runs overlap
    /// - a separator is not ASCII punctuation
    /// - a bound is not finite, `min < 0`, `max >= 100` or `min > max`
    pub fn validate(&self) -> Result<(), DeciPinError> {
        validate_anchor(self.hi_anchor)?;
        validate_anchor(self.lo_anchor)?;

        if (self.hi_anchor as u8).abs_diff(self.lo_anchor as u8) < ALPHABET_WIDTH {
            return Err(invalid(format!(
                "anchor runs overlap: '{}' and '{}'",
                self.hi_anchor, self.lo_anchor
            )));
        }

        for sep in [self.separators.0, self.separators.1] {
            if !sep.is_ascii_punctuation() {
                return Err(invalid(format!("separator must be ASCII punctuation: {:?}", sep)));
            }
        }

        for axis in [Axis::Latitude, Axis::Longitude] {
            let (min, max) = self.bounds.range(axis);
            if !min.is_finite() || !max.is_finite() || min < 0.0 || max >= 100.0 || min > max {
                return Err(invalid(format!(
                    "{} bounds must satisfy 0 <= min <= max < 100, got [{}, {}]",
                    axis, min, max
                )));
            }
        }

        Ok(())
    }
}

fn validate_anchor(anchor: char) -> Result<(), DeciPinError> {
    if !anchor.is_ascii_uppercase() || anchor as u8 + ALPHABET_WIDTH - 1 > b'Z' {
        return Err(invalid(format!(
            "anchor must be an ASCII letter between 'A' and 'Q': {:?}",
            anchor
        )));
    }
    Ok(())
}

fn invalid(msg: String) -> DeciPinError {
    warn!(reason = %msg, "rejected DeciPin config");
    DeciPinError::InvalidConfig(msg)
}
