use crate::prelude::*;

/// Current-controlled voltage source: `H name p n ps ns gain`.
///
/// Output voltage at (p,n) equals `gain * I_sample`, where `I_sample` is the
/// current flowing through whichever branch device is resolved to lie on the
/// (ps, ns) edge during circuit construction.
#[derive(Debug, Clone)]
pub struct Ccvs {
    pub name: String,
    pub plus: String,
    pub minus: String,
    pub pos_sample: String,
    pub neg_sample: String,
    pub gain: f64,
}

impl Ccvs {
    pub fn identifier(&self) -> String {
        format!("H{}", self.name)
    }
}

fn parse_ccvs(input: &str) -> IResult<&str, Ccvs> {
    let (input, _) = tag_no_case("H").parse(input)?;
    let (input, name) = alphanumeric_or_underscore1(input)?;
    let (input, plus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, minus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, pos_sample) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, neg_sample) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, gain) = preceded(space1, value_parser).parse(input)?;

    Ok((
        input,
        Ccvs {
            name: name.to_string(),
            plus: plus.to_string(),
            minus: minus.to_string(),
            pos_sample: pos_sample.to_string(),
            neg_sample: neg_sample.to_string(),
            gain,
        },
    ))
}

impl FromStr for Ccvs {
    type Err = crate::prelude::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s_without_comment = s.split('%').next().unwrap_or("").trim();
        let (_, ccvs) = all_consuming(parse_ccvs)
            .parse(s_without_comment)
            .map_err(|e| Error::InvalidFormat(e.to_string()))?;
        Ok(ccvs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ccvs() {
        let s = "H1 out 0 a b 50";
        let h = s.parse::<Ccvs>().unwrap();
        assert_eq!(h.name, "1");
        assert_eq!(h.pos_sample, "a");
        assert_eq!(h.neg_sample, "b");
        assert_eq!(h.gain, 50.0);
    }

    #[test]
    fn test_invalid_prefix() {
        assert!("E1 out 0 a b 50".parse::<Ccvs>().is_err());
    }
}
