use crate::prelude::*;

#[derive(Debug, Clone)]
/// Represents an inductor in a circuit.
pub struct Inductor {
    /// Name of the inductor.
    pub name: String,
    /// Value of the inductor in Henries.
    pub value: f64,
    /// Positive node of the inductor.
    pub plus: String,
    /// Negative node of the inductor.
    pub minus: String,
}

impl Inductor {
    pub fn identifier(&self) -> String {
        format!("L{}", self.name)
    }
}

pub fn parse_inductor(input: &str) -> IResult<&str, Inductor> {
    let (input, _) = tag_no_case("L").parse(input)?;
    let (input, name) = alphanumeric_or_underscore1(input)?;
    let (input, plus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, minus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, value) = preceded(space1, value_parser).parse(input)?;

    let inductor = Inductor {
        name: name.to_string(),
        plus: plus.to_string(),
        minus: minus.to_string(),
        value,
    };

    Ok((input, inductor))
}

impl FromStr for Inductor {
    type Err = crate::prelude::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s_without_comment = s.split('%').next().unwrap_or("").trim();
        let (_, inductor) = all_consuming(parse_inductor)
            .parse(s_without_comment)
            .map_err(|e| Error::InvalidFormat(e.to_string()))?;

        if inductor.value <= 0.0 {
            return Err(Error::InvalidFloatValue(format!(
                "Inductor value must be positive: '{s}'"
            )));
        }

        Ok(inductor)
    }
}
