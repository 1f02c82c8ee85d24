use crate::prelude::*;
use nom::character::complete::space1 as ws1;
use nom::multi::many1;
use nom::sequence::preceded;

/// A piecewise-linear stimulus: paired, strictly-increasing time points and values.
///
/// Built from a `PWL(t1 v1 t2 v2 ...)` source parameter. Interpolation and
/// out-of-range behavior are the responsibility of the consumer
/// (`mna_core::circuit::PwlTable`); this is purely the parsed wire form.
#[derive(Debug, Clone, PartialEq)]
pub struct PwlTable {
    pub times: Vec<f64>,
    pub values: Vec<f64>,
}

impl PwlTable {
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self> {
        if pairs.is_empty() {
            return Err(Error::InvalidFormat("PWL table has no points".to_string()));
        }
        for window in pairs.windows(2) {
            if window[1].0 <= window[0].0 {
                return Err(Error::InvalidFormat(format!(
                    "PWL time values must be strictly increasing, found {} then {}",
                    window[0].0, window[1].0
                )));
            }
        }
        let (times, values) = pairs.iter().copied().unzip();
        Ok(Self { times, values })
    }
}

/// Parses the body of a `PWL(...)` parameter into a flat list of `(time, value)` pairs.
pub fn parse_pwl_points(input: &str) -> IResult<&str, Vec<(f64, f64)>> {
    let pair = (value_parser, preceded(ws1, value_parser));
    let mut points = many1(preceded(nom::character::complete::space0, pair));
    points.parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_pwl() {
        let (rest, points) = parse_pwl_points("0 0 1u 5 2u 0").unwrap();
        assert!(rest.is_empty());
        assert_eq!(points.len(), 3);
        assert_eq!(points[1], (1e-6, 5.0));
    }

    #[test]
    fn table_rejects_non_increasing_time() {
        let points = vec![(0.0, 0.0), (1.0, 1.0), (0.5, 2.0)];
        assert!(PwlTable::from_pairs(&points).is_err());
    }

    #[test]
    fn table_rejects_empty() {
        assert!(PwlTable::from_pairs(&[]).is_err());
    }

    #[test]
    fn table_accepts_strictly_increasing() {
        let points = vec![(0.0, 0.0), (1e-6, 5.0), (2e-6, 0.0)];
        let table = PwlTable::from_pairs(&points).unwrap();
        assert_eq!(table.times, vec![0.0, 1e-6, 2e-6]);
        assert_eq!(table.values, vec![0.0, 5.0, 0.0]);
    }
}
