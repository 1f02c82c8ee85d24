//! Level-crossing measurement queries over a populated `ResultStore`.

use crate::circuit::Circuit;
use crate::result_store::ResultStore;
use crate::waveform::{self, Target};

#[derive(Debug, Clone)]
pub struct MeasurementQuery<'a> {
    pub trigger: Target<'a>,
    pub trigger_level: f64,
    pub target: Target<'a>,
    pub target_level: f64,
    /// Crossings before this absolute time are ignored.
    pub delay: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeasurementResult {
    Time(f64),
    NeverCrossed,
}

/// Finds the first time `level` is crossed in `series` at or after `after`,
/// linearly interpolating between the two bracketing samples.
fn find_crossing(series: &[(f64, f64)], level: f64, after: f64) -> Option<f64> {
    for window in series.windows(2) {
        let (t0, v0) = window[0];
        let (t1, v1) = window[1];
        if t1 < after {
            continue;
        }
        let crosses = (v0 - level) == 0.0 || (v0 - level).signum() != (v1 - level).signum();
        if !crosses {
            continue;
        }
        if v1 == v0 {
            continue;
        }
        let t = t0 + (level - v0) * (t1 - t0) / (v1 - v0);
        if t >= after {
            return Some(t);
        }
    }
    None
}

/// Resolves a trigger crossing, then the first target crossing at or after
/// it, returning that target crossing's interpolated time.
pub fn measure(circuit: &Circuit, store: &ResultStore, query: &MeasurementQuery) -> MeasurementResult {
    let trigger_series = waveform::waveform(circuit, store, query.trigger);
    let gate = query.delay.unwrap_or(f64::NEG_INFINITY);

    let Some(trigger_time) = find_crossing(&trigger_series, query.trigger_level, gate) else {
        return MeasurementResult::NeverCrossed;
    };

    let target_series = waveform::waveform(circuit, store, query.target);
    match find_crossing(&target_series, query.target_level, trigger_time) {
        Some(t) => MeasurementResult::Time(t),
        None => MeasurementResult::NeverCrossed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::Circuit;
    use crate::index_map::IndexMap;
    use mna_parser::parser::parse_circuit_description;

    fn divider_store() -> (Circuit, ResultStore) {
        let parsed =
            parse_circuit_description("V1 1 0 5\nR1 1 2 1000\nR2 2 0 1000\n.tran 1u 1m\n").unwrap();
        let circuit = Circuit::build(parsed).unwrap();
        let index_map =
            IndexMap::build(circuit.nodes.len(), circuit.ground, &circuit.branch_devices());
        (circuit, ResultStore::new(index_map))
    }

    fn node_row(circuit: &Circuit, store: &ResultStore, name: &str) -> usize {
        let id = circuit.nodes.iter().find(|n| n.name == name).unwrap().id;
        store.index_map().node_row(id).unwrap()
    }

    #[test]
    fn never_crossed_when_trigger_signal_is_flat() {
        let (circuit, mut store) = divider_store();
        store.append(0.0, &vec![0.0; store.dimension()]).unwrap();
        store.append(1.0, &vec![0.0; store.dimension()]).unwrap();
        let query = MeasurementQuery {
            trigger: Target::Node("2"),
            trigger_level: 2.5,
            target: Target::Node("2"),
            target_level: 2.5,
            delay: None,
        };
        assert_eq!(
            measure(&circuit, &store, &query),
            MeasurementResult::NeverCrossed
        );
    }

    #[test]
    fn finds_interpolated_crossing_time() {
        let (circuit, mut store) = divider_store();
        let row2 = node_row(&circuit, &store, "2");
        let mut zeros = vec![0.0; store.dimension()];
        store.append(0.0, &zeros).unwrap();
        zeros[row2] = 5.0;
        store.append(1.0, &zeros).unwrap();

        let query = MeasurementQuery {
            trigger: Target::Node("2"),
            trigger_level: 2.5,
            target: Target::Node("2"),
            target_level: 2.5,
            delay: None,
        };
        match measure(&circuit, &store, &query) {
            MeasurementResult::Time(t) => assert!((t - 0.5).abs() < 1e-9),
            MeasurementResult::NeverCrossed => panic!("expected a crossing"),
        }
    }
}
