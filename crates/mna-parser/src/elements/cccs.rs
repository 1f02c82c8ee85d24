use crate::prelude::*;

/// Current-controlled current source: `F name p n ps ns gain`.
///
/// Output current injected into (p,n) equals `gain * I_sample`, where
/// `I_sample` is the current through the branch device resolved to lie on
/// the (ps, ns) edge during circuit construction.
#[derive(Debug, Clone)]
pub struct Cccs {
    pub name: String,
    pub plus: String,
    pub minus: String,
    pub pos_sample: String,
    pub neg_sample: String,
    pub gain: f64,
}

impl Cccs {
    pub fn identifier(&self) -> String {
        format!("F{}", self.name)
    }
}

fn parse_cccs(input: &str) -> IResult<&str, Cccs> {
    let (input, _) = tag_no_case("F").parse(input)?;
    let (input, name) = alphanumeric_or_underscore1(input)?;
    let (input, plus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, minus) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, pos_sample) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, neg_sample) = preceded(space1, alphanumeric_or_underscore1).parse(input)?;
    let (input, gain) = preceded(space1, value_parser).parse(input)?;

    Ok((
        input,
        Cccs {
            name: name.to_string(),
            plus: plus.to_string(),
            minus: minus.to_string(),
            pos_sample: pos_sample.to_string(),
            neg_sample: neg_sample.to_string(),
            gain,
        },
    ))
}

impl FromStr for Cccs {
    type Err = crate::prelude::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s_without_comment = s.split('%').next().unwrap_or("").trim();
        let (_, cccs) = all_consuming(parse_cccs)
            .parse(s_without_comment)
            .map_err(|e| Error::InvalidFormat(e.to_string()))?;
        Ok(cccs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cccs() {
        let s = "F1 out 0 a b 2";
        let f = s.parse::<Cccs>().unwrap();
        assert_eq!(f.name, "1");
        assert_eq!(f.gain, 2.0);
    }

    #[test]
    fn test_invalid_prefix() {
        assert!("H1 out 0 a b 2".parse::<Cccs>().is_err());
    }
}
