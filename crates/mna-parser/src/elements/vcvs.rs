use crate::prelude::*;

/// Voltage-controlled voltage source: `E name p n ps ns gain`.
///
/// Output voltage at (p,n) equals `gain * (V(ps) - V(ns))`.
#[derive(Debug, Clone)]
pub struct Vcvs {
    pub name: String,
    pub plus: String,
    pub minus: String,
    pub pos_sample: String,
    pub neg_sample: String,
    pub gain: f64,
}

impl Vcvs {
    pub fn identifier(&self) -> String {
        format!("E{}", self.name)
    }
}

fn parse_vcvs(input: &str) -> IResult<&str, Vcvs> {
    let (input, _) = tag_no_case("E").parse(input)?;
    let (input, name) = alphanumeric_or_underscore1(input)?;
    let (input, plus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, minus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, pos_sample) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, neg_sample) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, gain) = preceded(space1, value_parser).parse(input)?;

    Ok((
        input,
        Vcvs {
            name: name.to_string(),
            plus: plus.to_string(),
            minus: minus.to_string(),
            pos_sample: pos_sample.to_string(),
            neg_sample: neg_sample.to_string(),
            gain,
        },
    ))
}

impl FromStr for Vcvs {
    type Err = crate::prelude::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s_without_comment = s.split('%').next().unwrap_or("").trim();
        let (_, vcvs) = all_consuming(parse_vcvs)
            .parse(s_without_comment)
            .map_err(|e| Error::InvalidFormat(e.to_string()))?;
        Ok(vcvs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vcvs() {
        let s = "E1 out 0 in 0 5";
        let e = s.parse::<Vcvs>().unwrap();
        assert_eq!(e.name, "1");
        assert_eq!(e.plus, "out");
        assert_eq!(e.minus, "0");
        assert_eq!(e.pos_sample, "in");
        assert_eq!(e.neg_sample, "0");
        assert_eq!(e.gain, 5.0);
    }

    #[test]
    fn test_invalid_prefix() {
        assert!("G1 out 0 in 0 5".parse::<Vcvs>().is_err());
    }

    #[test]
    fn test_invalid_format() {
        assert!("E1 out 0 in".parse::<Vcvs>().is_err());
    }
}
