//! Plotter contract: a named node or device resolves to a `(time, value)`
//! series plus scalar min/max, computed by scanning the `ResultStore` the
//! engine already populated.

use crate::circuit::Circuit;
use crate::result_store::ResultStore;

/// Identifies what a waveform query is asking for: a node voltage or a
/// device branch current.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    Node(&'a str),
    Device(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveformStats {
    pub min: f64,
    pub max: f64,
}

fn resolve(circuit: &Circuit, target: Target) -> Option<usize> {
    match target {
        Target::Node(name) => circuit.nodes.iter().find(|n| n.name == name).map(|n| n.id),
        Target::Device(name) => circuit
            .devices
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.id),
    }
}

/// Materializes the full `(time, value)` series for `target`.
pub fn waveform(circuit: &Circuit, store: &ResultStore, target: Target) -> Vec<(f64, f64)> {
    let Some(id) = resolve(circuit, target) else {
        return Vec::new();
    };
    (0..store.len())
        .map(|step| {
            let time = store.tick_at(step).unwrap_or(0.0);
            let value = match target {
                Target::Node(_) => store.node_voltage(circuit, id, step),
                Target::Device(_) => store.device_current(circuit, id, step),
            };
            (time, value)
        })
        .collect()
}

/// Scalar min/max over an already-materialized series.
pub fn stats(series: &[(f64, f64)]) -> Option<WaveformStats> {
    if series.is_empty() {
        return None;
    }
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &(_, v) in series {
        min = min.min(v);
        max = max.max(v);
    }
    Some(WaveformStats { min, max })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index_map::IndexMap;
    use mna_parser::parser::parse_circuit_description;

    #[test]
    fn waveform_and_stats_track_appended_samples() {
        let parsed = parse_circuit_description("R1 1 0 1000\nV1 1 0 5\n.tran 1u 1m\n").unwrap();
        let circuit = Circuit::build(parsed).unwrap();
        let index_map = IndexMap::build(circuit.nodes.len(), circuit.ground, &circuit.branch_devices());
        let mut store = ResultStore::new(index_map);
        store.append(0.0, &vec![0.0; store.dimension()]).unwrap();
        store.append(1e-6, &vec![1.0; store.dimension()]).unwrap();

        let series = waveform(&circuit, &store, Target::Node("1"));
        assert_eq!(series.len(), 2);
        let s = stats(&series).unwrap();
        assert_eq!(s.min.min(s.max), s.min);
    }

    #[test]
    fn unknown_target_yields_empty_series() {
        let parsed = parse_circuit_description("R1 1 0 1000\nV1 1 0 5\n.tran 1u 1m\n").unwrap();
        let circuit = Circuit::build(parsed).unwrap();
        let index_map = IndexMap::build(circuit.nodes.len(), circuit.ground, &circuit.branch_devices());
        let store = ResultStore::new(index_map);
        assert!(waveform(&circuit, &store, Target::Node("nope")).is_empty());
    }
}
