//! Coordinate values and parsing of the `"lat, lon"` text typed by the user

use std::fmt;
use std::str::FromStr;

/// A WGS84 position in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

/// Reasons a `"lat, lon"` string is rejected by [`Coordinate::parse`]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoordinateError {
    #[error("expected \"lat, lon\"")]
    MissingSeparator,

    #[error("expected exactly two values, \"lat, lon\"")]
    TooManyComponents,

    #[error("{0:?} is not a number")]
    InvalidNumber(String),

    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Parse and validate `"lat, lon"`.
    pub fn parse(text: &str) -> Result<Self, CoordinateError> {
        let mut parts = text.split(',');
        let lat = parts.next().unwrap_or_default();
        let lon = parts.next().ok_or(CoordinateError::MissingSeparator)?;
        if parts.next().is_some() {
            return Err(CoordinateError::TooManyComponents);
        }

        let lat = parse_component(lat)?;
        let lon = parse_component(lon)?;

        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(CoordinateError::LongitudeOutOfRange(lon));
        }

        Ok(Self { lat, lon })
    }

    /// Parse without validation.
    ///
    /// Splits on `,` and converts the first two tokens the way JavaScript's
    /// `Number()` does: surrounding whitespace is ignored, an empty token is
    /// zero, `Infinity` and `0x`/`0o`/`0b` literals are numbers and anything
    /// else unparsable is NaN. A missing token is NaN too, so
    /// `"foo"` yields `(NaN, NaN)`. Extra tokens are ignored.
    pub fn parse_lenient(text: &str) -> Self {
        let mut parts = text.split(',').map(js_number);
        let lat = parts.next().unwrap_or(f64::NAN);
        let lon = parts.next().unwrap_or(f64::NAN);
        Self { lat, lon }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lon)
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_component(token: &str) -> Result<f64, CoordinateError> {
    let trimmed = token.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CoordinateError::InvalidNumber(trimmed.to_string())),
    }
}

/// JavaScript `Number(token)`: trimmed, empty is zero, `Infinity` and the
/// `0x`/`0o`/`0b` integer prefixes are understood, anything else not in
/// decimal literal form is NaN.
fn js_number(token: &str) -> f64 {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return radix_integer(&trimmed[2..], radix);
    }

    // Rust also reads "inf", "infinity" and "nan" in any case
    let decimal = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !decimal {
        return f64::NAN;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}

/// Unsigned integer digits in `radix`, NaN when empty or malformed
fn radix_integer(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits
        .chars()
        .try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
        })
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let coordinate = Coordinate::parse("49.982967, 36.183048").unwrap();
        assert_eq!(coordinate, Coordinate::new(49.982967, 36.183048));

        let compact = Coordinate::parse("-33.5,-70.25").unwrap();
        assert_eq!(compact, Coordinate::new(-33.5, -70.25));
    }

    #[test]
    fn test_display_matches_input_format() {
        let coordinate = Coordinate::new(49.992669, 36.231978);
        assert_eq!(coordinate.to_string(), "49.992669, 36.231978");
        assert_eq!(Coordinate::parse(&coordinate.to_string()), Ok(coordinate));
    }

    #[test]
    fn test_parse_missing_separator() {
        assert_eq!(
            Coordinate::parse("foo"),
            Err(CoordinateError::MissingSeparator)
        );
        assert_eq!(Coordinate::parse(""), Err(CoordinateError::MissingSeparator));
    }

    #[test]
    fn test_parse_too_many_components() {
        assert_eq!(
            Coordinate::parse("1, 2, 3"),
            Err(CoordinateError::TooManyComponents)
        );
    }

    #[test]
    fn test_parse_invalid_numbers() {
        assert_eq!(
            Coordinate::parse("abc, 2"),
            Err(CoordinateError::InvalidNumber("abc".to_string()))
        );
        assert_eq!(
            Coordinate::parse("1, "),
            Err(CoordinateError::InvalidNumber(String::new()))
        );
        assert!(matches!(
            Coordinate::parse("NaN, 2"),
            Err(CoordinateError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_parse_out_of_range() {
        assert_eq!(
            Coordinate::parse("91, 0"),
            Err(CoordinateError::LatitudeOutOfRange(91.0))
        );
        assert_eq!(
            Coordinate::parse("0, -180.5"),
            Err(CoordinateError::LongitudeOutOfRange(-180.5))
        );
    }

    #[test]
    fn test_from_str_uses_strict_parsing() {
        let parsed: Result<Coordinate, _> = "10, 20".parse();
        assert_eq!(parsed, Ok(Coordinate::new(10.0, 20.0)));
        assert!("10".parse::<Coordinate>().is_err());
    }

    #[test]
    fn test_lenient_without_comma_is_nan() {
        let coordinate = Coordinate::parse_lenient("foo");
        assert!(coordinate.lat.is_nan());
        assert!(coordinate.lon.is_nan());
        assert!(!coordinate.is_finite());
    }

    #[test]
    fn test_lenient_number_conversion() {
        let coordinate = Coordinate::parse_lenient(" 49.5 ,36.25, ignored");
        assert_eq!(coordinate, Coordinate::new(49.5, 36.25));

        // Empty tokens convert to zero
        let coordinate = Coordinate::parse_lenient(",");
        assert_eq!(coordinate, Coordinate::new(0.0, 0.0));

        let coordinate = Coordinate::parse_lenient("12, x");
        assert_eq!(coordinate.lat, 12.0);
        assert!(coordinate.lon.is_nan());
    }

    #[test]
    fn test_lenient_accepts_out_of_range() {
        let coordinate = Coordinate::parse_lenient("120, 500");
        assert_eq!(coordinate, Coordinate::new(120.0, 500.0));
    }

    #[test]
    fn test_lenient_follows_js_number_literals() {
        assert_eq!(js_number("0x10"), 16.0);
        assert_eq!(js_number("0b101"), 5.0);
        assert_eq!(js_number(" 0o17 "), 15.0);
        assert_eq!(js_number("Infinity"), f64::INFINITY);
        assert_eq!(js_number("-Infinity"), f64::NEG_INFINITY);
        assert_eq!(js_number("1e3"), 1000.0);
        assert_eq!(js_number(".5"), 0.5);
        assert_eq!(js_number("-2."), -2.0);

        for text in ["inf", "infinity", "INFINITY", "nan", "NaN", "0x", "0xg", "-0x10", "1e", "1 2"] {
            assert!(js_number(text).is_nan(), "{text:?} should be NaN");
        }

        let coordinate = Coordinate::parse_lenient("0x1e, Infinity");
        assert_eq!(coordinate.lat, 30.0);
        assert_eq!(coordinate.lon, f64::INFINITY);
    }
}
