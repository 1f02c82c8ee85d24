pub mod circuit;
pub mod config;
pub mod dense;
pub mod error;
pub mod index_map;
pub mod measurement;
pub mod pole_zero;
pub mod poly_roots;
pub mod prelude;
pub mod result_store;
pub mod root_solver;
pub mod stamp;
pub mod transient;
pub mod waveform;

use crate::circuit::Circuit;
use crate::prelude::*;

/// Top-level outcome of running whichever engine a circuit's parsed
/// directives selected.
#[derive(Debug, Clone)]
pub enum AnalysisOutcome {
    Transient(result_store::ResultStore),
    PoleZero(pole_zero::PoleZeroResult),
}

/// Runs the transient engine to `sim_end`, or the pole-zero engine if the
/// netlist carried a `.pz` directive.
pub fn run(circuit: &Circuit) -> Result<AnalysisOutcome> {
    if let Some(request) = &circuit.analysis.pole_zero {
        let engine = pole_zero::PoleZeroEngine::new(circuit);
        let result = engine.run(request)?;
        Ok(AnalysisOutcome::PoleZero(result))
    } else {
        let mut engine = transient::TransientEngine::new(circuit);
        engine.run()?;
        Ok(AnalysisOutcome::Transient(engine.into_store()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mna_parser::parser::parse_circuit_description;

    #[test]
    fn run_dispatches_transient_by_default() {
        let parsed = parse_circuit_description("R1 1 0 1000\nV1 1 0 5\n.tran 1u 10u\n").unwrap();
        let circuit = Circuit::build(parsed).unwrap();
        match run(&circuit).unwrap() {
            AnalysisOutcome::Transient(store) => assert!(store.len() > 1),
            AnalysisOutcome::PoleZero(_) => panic!("expected a transient outcome"),
        }
    }

    #[test]
    fn run_dispatches_pole_zero_when_requested() {
        let parsed =
            parse_circuit_description("R1 1 0 1000\nC1 1 0 1u\n.pz 1 1 1\n").unwrap();
        let circuit = Circuit::build(parsed).unwrap();
        match run(&circuit).unwrap() {
            AnalysisOutcome::PoleZero(result) => assert_eq!(result.poles.len(), 1),
            AnalysisOutcome::Transient(_) => panic!("expected a pole-zero outcome"),
        }
    }
}
