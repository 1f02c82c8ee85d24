use crate::elements::source_value::{SourceValue, parse_pwl_param};
use crate::prelude::*;
use nom::branch::alt;
use nom::combinator::map;
use std::fmt;

#[derive(Debug, Clone)]
/// Represents an independent voltage source in a circuit.
pub struct VoltageSource {
    pub name: String,
    pub plus: String,
    pub minus: String,
    pub value: SourceValue,
}

impl VoltageSource {
    pub fn identifier(&self) -> String {
        format!("V{}", self.name)
    }
}

fn parse_dc_param(input: &str) -> IResult<&str, SourceValue> {
    map(
        preceded((tag_no_case("dc"), space1), value_parser),
        SourceValue::Dc,
    )
    .parse(input)
}

fn parse_voltage_source(input: &str) -> IResult<&str, VoltageSource> {
    let (input, _) = tag_no_case("V").parse(input)?;
    let (input, name) = alphanumeric_or_underscore1(input)?;
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
        VoltageSource {
            name: name.to_string(),
            plus: plus.to_string(),
            minus: minus.to_string(),
            value,
        },
    ))
}

impl FromStr for VoltageSource {
    type Err = crate::prelude::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s_without_comment = s.split('%').next().unwrap_or("").trim();
        let (_, voltage_source) = all_consuming(parse_voltage_source)
            .parse(s_without_comment)
            .map_err(|e| Error::InvalidFormat(e.to_string()))?;

        Ok(voltage_source)
    }
}

impl fmt::Display for VoltageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V{} {} {}", self.name, self.plus, self.minus)
    }
}
