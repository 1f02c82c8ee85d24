use crate::elements::source_value::{SourceValue, parse_pwl_param};
use crate::prelude::*;
use nom::branch::alt;
use nom::combinator::map;
use std::fmt;

#[derive(Debug, Clone)]
/// Represents an independent current source in a circuit.
pub struct CurrentSource {
    pub name: String,
    pub plus: String,
    pub minus: String,
    pub value: SourceValue,
}

impl CurrentSource {
    pub fn identifier(&self) -> String {
        format!("I{}", self.name)
    }
}

fn parse_dc_param(input: &str) -> IResult<&str, SourceValue> {
    map(
        preceded((tag_no_case("dc"), space1), value_parser),
        SourceValue::Dc,
    )
    .parse(input)
}

fn parse_current_source(input: &str) -> IResult<&str, CurrentSource> {
    let (input, _) = tag_no_case("I").parse(input)?;
    let (input, name) = alphanumeric_or_underscore1.parse(input)?;
    let (input, plus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, minus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, value) = preceded(
        space1,
        alt((
            parse_pwl_param,
            parse_dc_param,
            map(value_parser, SourceValue::Dc),
        )),
    )
    .parse(input)?;

    Ok((
        input,
        CurrentSource {
            name: name.to_string(),
            plus: plus.to_string(),
            minus: minus.to_string(),
            value,
        },
    ))
}

impl FromStr for CurrentSource {
    type Err = crate::prelude::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s_without_comment = s.split('%').next().unwrap_or("").trim();
        let (_, current_source) = all_consuming(parse_current_source)
            .parse(s_without_comment)
            .map_err(|e| Error::InvalidFormat(e.to_string()))?;

        Ok(current_source)
    }
}

impl fmt::Display for CurrentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "I{} {} {}", self.name, self.plus, self.minus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_current_source() {
        let current_source_str = "I1 1 0 0.001";
        let current_source = current_source_str.parse::<CurrentSource>().unwrap();

        assert_eq!(current_source.name, "1");
        assert_eq!(current_source.plus, "1");
        assert_eq!(current_source.minus, "0");
        assert_eq!(current_source.value, SourceValue::Dc(0.001));
    }

    #[test]
    fn test_parse_with_comment() {
        let s = "I2 5 3 1.5 % Amperes";
        let source = s.parse::<CurrentSource>().unwrap();
        assert_eq!(source.name, "2");
        assert_eq!(source.value, SourceValue::Dc(1.5));
    }

    #[test]
    fn test_parse_lowercase_identifier() {
        let s = "i5 vdd gnd 10";
        let source = s.parse::<CurrentSource>().unwrap();
        assert_eq!(source.name, "5");
        assert_eq!(source.plus, "vdd");
    }

    #[test]
    fn test_parse_pwl() {
        let s = "I1 a b PWL(0 0 1m 2)";
        let source = s.parse::<CurrentSource>().unwrap();
        match source.value {
            SourceValue::Pwl(table) => assert_eq!(table.times.len(), 2),
            SourceValue::Dc(_) => panic!("expected PWL"),
        }
    }

    #[test]
    fn test_invalid_current_source_format() {
        let current_source_str = "I1 1 0";
        let result = current_source_str.parse::<CurrentSource>();
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_prefix() {
        let s = "V1 1 0 1.0";
        let result = s.parse::<CurrentSource>();
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_current_source_name() {
        let current_source_str = "I 1 0 0.001";
        let result = current_source_str.parse::<CurrentSource>();
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_current_source_value() {
        let current_source_str = "I1 1 0 abc";
        let result = current_source_str.parse::<CurrentSource>();
        assert!(result.is_err());
    }
}
