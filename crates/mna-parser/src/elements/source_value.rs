use crate::prelude::*;
use crate::pwl::{PwlTable, parse_pwl_points};
use nom::bytes::complete::tag_no_case;
use nom::character::complete::space0;
use nom::sequence::delimited;

/// The stimulus driving an independent voltage or current source: a constant
/// value, or a piecewise-linear table evaluated against simulation time.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceValue {
    Dc(f64),
    Pwl(PwlTable),
}

impl SourceValue {
    /// Evaluates the source at `time`. `Dc` values are constant in time;
    /// `Pwl` values are interpolated, clamping to the first/last sample
    /// outside the table's range.
    pub fn value_at(&self, time: f64) -> f64 {
        match self {
            SourceValue::Dc(v) => *v,
            SourceValue::Pwl(table) => interpolate(table, time),
        }
    }
}

fn interpolate(table: &PwlTable, time: f64) -> f64 {
    let times = &table.times;
    let values = &table.values;
    if time <= times[0] {
        return if time < times[0] { 0.0 } else { values[0] };
    }
    if time >= *times.last().unwrap() {
        return *values.last().unwrap();
    }
    let idx = times.partition_point(|&t| t <= time);
    let (t0, t1) = (times[idx - 1], times[idx]);
    let (v0, v1) = (values[idx - 1], values[idx]);
    v0 + (v1 - v0) * (time - t0) / (t1 - t0)
}

/// Parses a `PWL(t1 v1 t2 v2 ...)` parameter body.
pub fn parse_pwl_param(input: &str) -> IResult<&str, SourceValue> {
    let (input, points) = delimited(
        (tag_no_case("pwl"), space0, nom::bytes::complete::tag("(")),
        parse_pwl_points,
        (space0, nom::bytes::complete::tag(")")),
    )
    .parse(input)?;
    let table = PwlTable::from_pairs(&points).map_err(|_| {
        nom::Err::Failure(nom::error::Error::new(input, nom::error::ErrorKind::Verify))
    })?;
    Ok((input, SourceValue::Pwl(table)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dc_value_is_constant() {
        let v = SourceValue::Dc(5.0);
        assert_eq!(v.value_at(0.0), 5.0);
        assert_eq!(v.value_at(100.0), 5.0);
    }

    #[test]
    fn pwl_interpolates_linearly() {
        let table = PwlTable::from_pairs(&[(0.0, 0.0), (1.0, 10.0), (2.0, 0.0)]).unwrap();
        let v = SourceValue::Pwl(table);
        assert_eq!(v.value_at(0.5), 5.0);
        assert_eq!(v.value_at(1.5), 5.0);
    }

    #[test]
    fn pwl_clamps_before_first_point_to_zero() {
        let table = PwlTable::from_pairs(&[(1.0, 3.0), (2.0, 4.0)]).unwrap();
        let v = SourceValue::Pwl(table);
        assert_eq!(v.value_at(0.0), 0.0);
    }

    #[test]
    fn pwl_holds_last_value_after_table() {
        let table = PwlTable::from_pairs(&[(0.0, 0.0), (1.0, 7.0)]).unwrap();
        let v = SourceValue::Pwl(table);
        assert_eq!(v.value_at(5.0), 7.0);
    }

    #[test]
    fn parses_pwl_parameter() {
        let (_, value) = parse_pwl_param("PWL(0 0 1u 5 2u 0)").unwrap();
        match value {
            SourceValue::Pwl(table) => assert_eq!(table.times.len(), 3),
            SourceValue::Dc(_) => panic!("expected PWL"),
        }
    }
}
