use crate::api::config::{Bounds, CoordinateFormat, DeciPinConfig};
use crate::api::decoded::DecodedPin;
use crate::core::constants::{AXIS_DIGITS, CODE_LENGTH_WITH_SEPARATORS};
use crate::core::digits::{digits_to_units, fixed_digits};
use crate::core::pattern::DeciPinPattern;
use crate::core::rebase::{rebase_digit, unrebase_letter};
use crate::util::coord::{Axis, Coordinate};
use crate::util::error::DeciPinError;
use rayon::prelude::*;
use std::sync::LazyLock;
use tracing::debug;

static DEFAULT_CODEC: LazyLock<DeciPinCodec> = LazyLock::new(|| {
    DeciPinCodec::new(DeciPinConfig::default()).expect("default DeciPin config is valid")
});

/// Encodes coordinates to DeciPins and decodes them back, for one configuration.
///
/// A codec is immutable once built and can be shared freely across threads.
///
/// # Example
/// ```
/// use decipin_rs::DeciPinCodec;
///
/// # fn main() -> Result<(), decipin_rs::DeciPinError> {
/// let codec = DeciPinCodec::default();
/// let pin = codec.encode(53.4808, 2.2479)?;
/// assert_eq!(pin, "5302.EI24/QY79");
///
/// let decoded = codec.decode(&pin)?;
/// assert!((decoded.lat() - 53.4808).abs() <= 0.00005);
/// assert!((decoded.lon() - 2.2479).abs() <= 0.00005);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DeciPinCodec {
    config: DeciPinConfig,
    pattern: DeciPinPattern,
}

impl Default for DeciPinCodec {
    fn default() -> Self {
        DEFAULT_CODEC.clone()
    }
}

impl DeciPinCodec {
    /// Validates `config` and compiles its grammar.
    pub fn new(config: DeciPinConfig) -> Result<Self, DeciPinError> {
        config.validate()?;
        let pattern = DeciPinPattern::new(
            config.hi_anchor,
            config.lo_anchor,
            config.separators,
            config.lenient_separators,
        )?;
        Ok(Self { config, pattern })
    }

    pub fn builder() -> DeciPinCodecBuilder {
        DeciPinCodecBuilder::new()
    }

    pub fn config(&self) -> &DeciPinConfig {
        &self.config
    }

    pub fn pattern(&self) -> &DeciPinPattern {
        &self.pattern
    }

    /// Encodes a coordinate, emitting separators if the config says so.
    pub fn encode(&self, lat: f64, lon: f64) -> Result<String, DeciPinError> {
        self.encode_with_separators(lat, lon, self.config.include_separators)
    }

    /// Encodes any [`Coordinate`], e.g. a `(lat, lon)` tuple or a `geo_types::Point`.
    pub fn encode_coord(&self, coord: &impl Coordinate) -> Result<String, DeciPinError> {
        self.encode(coord.lat(), coord.lon())
    }

    /// Encodes a coordinate into a 12-character DeciPin, or 14 with separators.
    ///
    /// # Layout
    ///
    /// | Chars | Source                                   |
    /// |-------|------------------------------------------|
    /// | 2     | latitude integer digits                  |
    /// | 2     | longitude integer digits                 |
    /// | 0-1   | first separator                          |
    /// | 2     | latitude decimals 1-2 as high-anchor letters |
    /// | 2     | longitude decimals 1-2                   |
    /// | 0-1   | second separator                         |
    /// | 2     | latitude decimals 3-4 as low-anchor letters  |
    /// | 2     | longitude decimals 3-4                   |
    ///
    /// Each coordinate is truncated (not rounded) to four decimals first.
    ///
    /// # Errors
    ///
    /// [`DeciPinError::OutOfRange`] if either value is outside the configured bounds or NaN.
    pub fn encode_with_separators(
        &self,
        lat: f64,
        lon: f64,
        include_separators: bool,
    ) -> Result<String, DeciPinError> {
        self.config.bounds.check(Axis::Latitude, lat)?;
        self.config.bounds.check(Axis::Longitude, lon)?;

        let lat_digits = fixed_digits(lat);
        let lon_digits = fixed_digits(lon);
        let (hi, lo) = (self.config.hi_anchor, self.config.lo_anchor);
        let (sep_hi, sep_lo) = self.config.separators;

        let mut pin = String::with_capacity(CODE_LENGTH_WITH_SEPARATORS);
        push_digits(&mut pin, &lat_digits[0..2]);
        push_digits(&mut pin, &lon_digits[0..2]);
        if include_separators {
            pin.push(sep_hi);
        }
        push_letters(&mut pin, &lat_digits[2..4], hi);
        push_digits(&mut pin, &lon_digits[2..4]);
        if include_separators {
            pin.push(sep_lo);
        }
        push_letters(&mut pin, &lat_digits[4..6], lo);
        push_digits(&mut pin, &lon_digits[4..6]);

        debug!(lat, lon, pin = %pin, "encoded DeciPin");
        Ok(pin)
    }

    /// Decodes a DeciPin to the cell it addresses. Letters are case-insensitive.
    ///
    /// # Process
    ///
    /// 1. Upper-cases the input (ASCII only)
    /// 2. Matches it against the grammar, stripping separators
    /// 3. Reads latitude from chars 0-1, letters 4-5 and letters 8-9
    /// 4. Reads longitude from chars 2-3, 6-7 and 10-11
    ///
    /// # Errors
    ///
    /// [`DeciPinError::InvalidFormat`] with the upper-cased input if it does not match.
    pub fn decode(&self, code: &str) -> Result<DecodedPin, DeciPinError> {
        let upper = code.to_ascii_uppercase();
        let Some(token) = self.pattern.canonical_token(&upper) else {
            debug!(code = %upper, "rejected DeciPin");
            return Err(DeciPinError::InvalidFormat(upper));
        };

        let (hi, lo) = (self.config.hi_anchor, self.config.lo_anchor);
        let lat_digits: [u8; AXIS_DIGITS] = [
            token[0],
            token[1],
            unrebase_letter(token[4], hi),
            unrebase_letter(token[5], hi),
            unrebase_letter(token[8], lo),
            unrebase_letter(token[9], lo),
        ];
        let lon_digits: [u8; AXIS_DIGITS] = [
            token[2], token[3], token[6], token[7], token[10], token[11],
        ];

        let canonical: String = token.iter().map(|&b| char::from(b)).collect();
        let decoded = DecodedPin::new(
            canonical,
            digits_to_units(&lat_digits),
            digits_to_units(&lon_digits),
        );

        debug!(code = %upper, lat = decoded.lat(), lon = decoded.lon(), "decoded DeciPin");
        Ok(decoded)
    }

    /// Returns true when `code` would decode successfully.
    pub fn is_valid(&self, code: &str) -> bool {
        self.pattern.is_match(&code.to_ascii_uppercase())
    }

    /// Encodes many coordinates in parallel. Results keep the input order.
    pub fn encode_many<C>(&self, coords: &[C]) -> Vec<Result<String, DeciPinError>>
    where
        C: Coordinate + Sync,
    {
        coords.par_iter().map(|c| self.encode_coord(c)).collect()
    }

    /// Decodes many codes in parallel. Results keep the input order.
    pub fn decode_many<S>(&self, codes: &[S]) -> Vec<Result<DecodedPin, DeciPinError>>
    where
        S: AsRef<str> + Sync,
    {
        codes.par_iter().map(|c| self.decode(c.as_ref())).collect()
    }
}

fn push_digits(pin: &mut String, digits: &[u8]) {
    pin.extend(digits.iter().map(|&d| char::from(d)));
}

fn push_letters(pin: &mut String, digits: &[u8], anchor: char) {
    pin.extend(digits.iter().map(|&d| char::from(rebase_digit(d, anchor))));
}

/// Builder for [`DeciPinCodec`].
#[derive(Debug, Default)]
pub struct DeciPinCodecBuilder {
    config: DeciPinConfig,
}

impl DeciPinCodecBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: DeciPinConfig) -> Self {
        self.config = config;
        self
    }

    pub fn anchors(mut self, hi: char, lo: char) -> Self {
        self.config = self.config.anchors(hi, lo);
        self
    }

    pub fn bounds(mut self, bounds: Bounds) -> Self {
        self.config = self.config.bounds(bounds);
        self
    }

    pub fn separators(mut self, hi: char, lo: char) -> Self {
        self.config = self.config.separators(hi, lo);
        self
    }

    pub fn include_separators(mut self, include: bool) -> Self {
        self.config = self.config.include_separators(include);
        self
    }

    pub fn lenient_separators(mut self, lenient: bool) -> Self {
        self.config = self.config.lenient_separators(lenient);
        self
    }

    pub fn output_format(mut self, format: CoordinateFormat) -> Self {
        self.config = self.config.output_format(format);
        self
    }

    pub fn build(self) -> Result<DeciPinCodec, DeciPinError> {
        DeciPinCodec::new(self.config)
    }
}

/// Encodes `(lat, lon)` with the default configuration.
///
/// # Example
/// ```
/// use decipin_rs::encode;
///
/// # fn main() -> Result<(), decipin_rs::DeciPinError> {
/// assert_eq!(encode(0.0, 0.0, true)?, "0000.AA00/QQ00");
/// assert_eq!(encode(0.0, 0.0, false)?, "0000AA00QQ00");
/// # Ok(())
/// # }
/// ```
pub fn encode(lat: f64, lon: f64, include_separators: bool) -> Result<String, DeciPinError> {
    DEFAULT_CODEC.encode_with_separators(lat, lon, include_separators)
}

/// Decodes a DeciPin with the default configuration.
pub fn decode(code: &str) -> Result<DecodedPin, DeciPinError> {
    DEFAULT_CODEC.decode(code)
}

/// Checks a DeciPin against the default grammar.
pub fn is_valid_decipin(code: &str) -> bool {
    DEFAULT_CODEC.is_valid(code)
}
