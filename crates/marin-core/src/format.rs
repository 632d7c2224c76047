//! Decimal formatting for measured values.

/// Smallest magnitude printed in plain notation.
const PLAIN_MIN: f64 = 1e-3;

/// Magnitude at which plain notation switches to exponent notation.
const PLAIN_MAX: f64 = 1e7;

/// Format a number in the host's default decimal form.
///
/// Whole values keep one fractional digit (`4.0`), other values print the
/// shortest digits that round-trip (`12.5`). Magnitudes at or above `1e7`
/// or below `1e-3` use exponent notation with an upper-case `E`
/// (`1.0E7`, `1.5E-4`).
///
/// # Example
///
/// ```rust
/// use marin_core::format_decimal;
///
/// assert_eq!(format_decimal(4.0), "4.0");
/// assert_eq!(format_decimal(12.5), "12.5");
/// assert_eq!(format_decimal(2.5e7), "2.5E7");
/// ```
#[must_use]
#[allow(clippy::float_cmp)]
pub fn format_decimal(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() {
            "Infinity".to_owned()
        } else {
            "-Infinity".to_owned()
        };
    }

    let magnitude = value.abs();
    if magnitude == 0.0 {
        return if value.is_sign_negative() {
            "-0.0".to_owned()
        } else {
            "0.0".to_owned()
        };
    }

    if (PLAIN_MIN..PLAIN_MAX).contains(&magnitude) {
        let mut text = value.to_string();
        if !text.contains('.') {
            text.push_str(".0");
        }
        return text;
    }

    let text = format!("{value:e}");
    let (mantissa, exponent) = text.split_once('e').unwrap_or((text.as_str(), "0"));
    if mantissa.contains('.') {
        format!("{mantissa}E{exponent}")
    } else {
        format!("{mantissa}.0E{exponent}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_values_keep_one_fraction_digit() {
        assert_eq!(format_decimal(4.0), "4.0");
        assert_eq!(format_decimal(12.0), "12.0");
        assert_eq!(format_decimal(-2.0), "-2.0");
        assert_eq!(format_decimal(1_234_567.0), "1234567.0");
    }

    #[test]
    fn test_fractional_values_use_shortest_digits() {
        assert_eq!(format_decimal(12.5), "12.5");
        assert_eq!(format_decimal(1.8), "1.8");
        assert_eq!(format_decimal(3.1), "3.1");
        assert_eq!(format_decimal(0.1), "0.1");
        assert_eq!(format_decimal(0.001), "0.001");
    }

    #[test]
    fn test_zero() {
        assert_eq!(format_decimal(0.0), "0.0");
        assert_eq!(format_decimal(-0.0), "-0.0");
    }

    #[test]
    fn test_exponent_notation_outside_plain_range() {
        assert_eq!(format_decimal(1e7), "1.0E7");
        assert_eq!(format_decimal(2.5e7), "2.5E7");
        assert_eq!(format_decimal(1.5e-4), "1.5E-4");
        assert_eq!(format_decimal(-1e-7), "-1.0E-7");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_decimal(f64::NAN), "NaN");
        assert_eq!(format_decimal(f64::INFINITY), "Infinity");
        assert_eq!(format_decimal(f64::NEG_INFINITY), "-Infinity");
    }
}
