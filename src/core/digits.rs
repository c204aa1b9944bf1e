use crate::core::constants::{AXIS_DIGITS, SCALE_FACTOR};

/// Renders a coordinate as six ASCII digits on the 0.0001° grid.
///
/// # Process
///
/// 1. Multiplies by `SCALE_FACTOR` and truncates toward zero
/// 2. Renders the integer left-padded with zeros to six digits
/// 3. Keeps the first six digits, which bounds the representable range
///
/// The first two digits are the integer part, the last four the fractional part.
///
/// # Example
/// ```
/// use decipin_rs::core::digits::fixed_digits;
///
/// assert_eq!(&fixed_digits(53.4808), b"534808");
/// assert_eq!(&fixed_digits(1.5), b"015000");
/// ```
pub fn fixed_digits(value: f64) -> [u8; AXIS_DIGITS] {
    let scaled = (value * SCALE_FACTOR).trunc() as u64;
    let rendered = format!("{:0width$}", scaled, width = AXIS_DIGITS);

    let mut digits = [b'0'; AXIS_DIGITS];
    digits.copy_from_slice(&rendered.as_bytes()[..AXIS_DIGITS]);
    digits
}

/// Parses six ASCII digits back into grid units of 0.0001°.
pub fn digits_to_units(digits: &[u8; AXIS_DIGITS]) -> u32 {
    digits
        .iter()
        .fold(0u32, |acc, &d| acc * 10 + u32::from(d - b'0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_padded() {
        assert_eq!(&fixed_digits(0.0), b"000000");
    }

    #[test]
    fn test_truncates_extra_precision() {
        assert_eq!(&fixed_digits(45.67891234), b"456789");
        assert_eq!(&fixed_digits(0.00009), b"000000");
    }

    #[test]
    fn test_upper_bound() {
        assert_eq!(&fixed_digits(99.9999), b"999999");
    }

    #[test]
    fn test_keeps_first_six_digits() {
        assert_eq!(&fixed_digits(123.4567), b"123456");
    }

    #[test]
    fn test_digits_to_units() {
        assert_eq!(digits_to_units(b"534808"), 534_808);
        assert_eq!(digits_to_units(b"000001"), 1);
    }
}
