use crate::prelude::*;

/// Voltage-controlled current source: `G name p n ps ns gain`.
///
/// Output current injected into (p,n) equals `gain * (V(ps) - V(ns))`.
#[derive(Debug, Clone)]
pub struct Vccs {
    pub name: String,
    pub plus: String,
    pub minus: String,
    pub pos_sample: String,
    pub neg_sample: String,
    pub gain: f64,
}

impl Vccs {
    pub fn identifier(&self) -> String {
        format!("G{}", self.name)
    }
}

fn parse_vccs(input: &str) -> IResult<&str, Vccs> {
    let (input, _) = tag_no_case("G").parse(input)?;
    let (input, name) = alphanumeric_or_underscore1(input)?;
    let (input, plus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, minus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, pos_sample) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, neg_sample) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, gain) = preceded(space1, value_parser).parse(input)?;

    Ok((
        input,
        Vccs {
            name: name.to_string(),
            plus: plus.to_string(),
            minus: minus.to_string(),
            pos_sample: pos_sample.to_string(),
            neg_sample: neg_sample.to_string(),
            gain,
        },
    ))
}

impl FromStr for Vccs {
    type Err = crate::prelude::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s_without_comment = s.split('%').next().unwrap_or("").trim();
        let (_, vccs) = all_consuming(parse_vccs)
            .parse(s_without_comment)
            .map_err(|e| Error::InvalidFormat(e.to_string()))?;
        Ok(vccs)
    }
}
