use nom::{
    IResult, Parser,
    bytes::complete::{is_not, take_while1},
    combinator::map_res,
};

use crate::prelude::*;

/// Metric suffixes recognized after a numeric literal, longest first so
/// `MEG` is matched before the bare `M`/`G` single-character suffixes.
const SUFFIXES: &[(&str, f64)] = &[
    ("MEG", 1e6),
    ("F", 1e-15),
    ("P", 1e-12),
    ("N", 1e-9),
    ("U", 1e-6),
    ("M", 1e-3),
    ("K", 1e3),
    ("X", 1e6),
    ("G", 1e9),
    ("T", 1e12),
];

/// Parses a SPICE-style numeric value string with metric suffixes.
///
/// Handles plain floating-point numbers (including scientific notation like
/// `1e-6`) plus the suffix table above, matched case-insensitively.
pub fn parse_value(s: &str) -> Result<f64> {
    let s_upper = s.to_uppercase();

    let (num_part_str, multiplier) = SUFFIXES
        .iter()
        .find(|(suffix, _)| s_upper.ends_with(suffix) && s_upper.len() > suffix.len())
        .map(|(suffix, multiplier)| (&s_upper[..s_upper.len() - suffix.len()], *multiplier))
        .unwrap_or((s_upper.as_str(), 1.0));

    let base_val: f64 = num_part_str
        .parse()
        .map_err(|_| Error::InvalidFloatValue(format!("Invalid numeric value '{s}'")))?;

    Ok(base_val * multiplier)
}

/// Parses a string consisting of alphanumeric characters and underscores.
pub fn alphanumeric_or_underscore1(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_').parse(input)
}

/// A nom parser that recognizes a value token and parses it with `parse_value`.
pub fn value_parser(input: &str) -> IResult<&str, f64> {
    let token_parser = is_not(" \t\r\n()");
    map_res(token_parser, parse_value).parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_parser() {
        let epsilon = 1e-15;
        assert!((parse_value("1.5k").unwrap() - 1500.0).abs() < epsilon);
        assert!((parse_value("10u").unwrap() - 10e-6).abs() < epsilon);
        assert!((parse_value("22n").unwrap() - 22e-9).abs() < epsilon);
        assert!((parse_value("1.2p").unwrap() - 1.2e-12).abs() < epsilon);
        assert!((parse_value("3MEG").unwrap() - 3e6).abs() < epsilon);
        assert!((parse_value("100").unwrap() - 100.0).abs() < epsilon);

        assert!((parse_value("1e-6").unwrap() - 1e-6).abs() < epsilon);
        assert!((parse_value("1.23E-9").unwrap() - 1.23e-9).abs() < epsilon);

        assert!(parse_value("garbage").is_err());
    }

    #[test]
    fn test_x_suffix_is_mega() {
        let epsilon = 1e-9;
        assert!((parse_value("2x").unwrap() - 2e6).abs() < epsilon);
        assert!((parse_value("2X").unwrap() - 2e6).abs() < epsilon);
    }
}
