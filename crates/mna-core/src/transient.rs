//! Fixed-step time-domain solver: assembles A = G + C once per chosen
//! integration method, then repeatedly re-solves against a refreshed
//! excitation vector.

use crate::circuit::Circuit;
use crate::dense::DenseLu;
use crate::index_map::IndexMap;
use crate::prelude::*;
use crate::result_store::ResultStore;
use crate::stamp::{self, Domain, Mna, StampMode};
use mna_parser::analyses::IntegrationMethod;

/// A signal the engine watches for a level crossing; when set, the run
/// ends at the crossing instead of at `sim_end`.
#[derive(Debug, Clone, Copy)]
pub enum Termination {
    NodeVoltage { node_id: usize, level: f64 },
    DeviceCurrent { device_id: usize, level: f64 },
}

pub struct TransientEngine<'a> {
    circuit: &'a Circuit,
    store: ResultStore,
    g: Vec<f64>,
    c: Vec<f64>,
    b: Vec<f64>,
    dim: usize,
    lu: Option<DenseLu>,
    previous_method: Option<IntegrationMethod>,
    termination: Option<Termination>,
}

impl<'a> TransientEngine<'a> {
    /// `init`: builds the index map, allocates G/C/b, and appends the fixed
    /// zero initial condition at t=0.
    pub fn new(circuit: &'a Circuit) -> Self {
        let index_map = IndexMap::build(
            circuit.nodes.len(),
            circuit.ground,
            &circuit.branch_devices(),
        );
        let dim = index_map.dimension();
        let mut store = ResultStore::new(index_map);
        store
            .append(0.0, &vec![0.0; dim])
            .expect("zero-length initial tick always appends");
        TransientEngine {
            circuit,
            store,
            g: vec![0.0; dim * dim],
            c: vec![0.0; dim * dim],
            b: vec![0.0; dim],
            dim,
            lu: None,
            previous_method: None,
            termination: None,
        }
    }

    pub fn with_termination(mut self, termination: Termination) -> Self {
        self.termination = Some(termination);
        self
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    /// Consumes the engine, handing ownership of the populated history to
    /// the caller (the report writer, or a longer-lived holder in tests).
    pub fn into_store(self) -> ResultStore {
        self.store
    }

    fn h(&self) -> f64 {
        self.circuit.analysis.tick
    }

    fn next_time(&self) -> f64 {
        self.store.last_tick().unwrap_or(0.0) + self.h()
    }

    /// Trapezoidal and Gear-2 both need a true sample two ticks back (the
    /// capacitor/inductor companion terms difference against it); until the
    /// store holds the zero IC plus one real solve, both fall back to
    /// Backward Euler.
    fn effective_method(&self) -> IntegrationMethod {
        let requested = self.circuit.analysis.method;
        match requested {
            IntegrationMethod::BackwardEuler => IntegrationMethod::BackwardEuler,
            IntegrationMethod::Trapezoidal | IntegrationMethod::Gear2 => {
                if self.store.len() >= 2 {
                    requested
                } else {
                    IntegrationMethod::BackwardEuler
                }
            }
        }
    }

    fn formulate(&mut self, method: IntegrationMethod) -> Result<()> {
        self.g.fill(0.0);
        self.c.fill(0.0);
        self.b.fill(0.0);
        let time = self.next_time();
        let h = self.h();
        let dim = self.dim;
        let mut mats = Mna {
            g: &mut self.g,
            c: &mut self.c,
            b: &mut self.b,
            dim,
        };
        stamp::stamp_all(
            self.circuit,
            &self.store,
            method,
            Domain::Time,
            time,
            h,
            StampMode::Full,
            &mut mats,
        );
        let a: Vec<f64> = self.g.iter().zip(self.c.iter()).map(|(g, c)| g + c).collect();
        self.lu = Some(DenseLu::factor(&a, dim)?);
        self.previous_method = Some(method);
        Ok(())
    }

    fn update_b(&mut self, method: IntegrationMethod) {
        self.b.fill(0.0);
        let time = self.next_time();
        let h = self.h();
        let dim = self.dim;
        let mut mats = Mna {
            g: &mut self.g,
            c: &mut self.c,
            b: &mut self.b,
            dim,
        };
        stamp::stamp_all(
            self.circuit,
            &self.store,
            method,
            Domain::Time,
            time,
            h,
            StampMode::BOnly,
            &mut mats,
        );
    }

    fn solve(&mut self) -> Result<()> {
        let lu = self
            .lu
            .as_ref()
            .expect("formulate must run before the first solve");
        let x = lu.solve(&self.b)?;
        let time = self.next_time();
        self.store.append(time, &x)?;
        Ok(())
    }

    fn crossed(&self, level: f64, previous: f64, current: f64) -> bool {
        (previous - level) == 0.0 || (previous - level).signum() != (current - level).signum()
    }

    fn check_terminate(&self) -> bool {
        if let Some(termination) = self.termination {
            if self.store.len() < 2 {
                return false;
            }
            let last = self.store.len() - 1;
            let (level, previous, current) = match termination {
                Termination::NodeVoltage { node_id, level } => (
                    level,
                    self.store.node_voltage(self.circuit, node_id, last - 1),
                    self.store.node_voltage(self.circuit, node_id, last),
                ),
                Termination::DeviceCurrent { device_id, level } => (
                    level,
                    self.store.device_current(self.circuit, device_id, last - 1),
                    self.store.device_current(self.circuit, device_id, last),
                ),
            };
            return self.crossed(level, previous, current);
        }
        self.store.last_tick().unwrap_or(0.0) >= self.circuit.analysis.sim_end
    }

    /// Runs until termination, driving `formulate`/`solve`/`update_b` per
    /// the state machine: solve every tick, re-formulate only on an
    /// effective-method change, otherwise just refresh b.
    pub fn run(&mut self) -> Result<()> {
        let method = self.effective_method();
        self.formulate(method)?;
        self.solve()?;

        while !self.check_terminate() {
            let method = self.effective_method();
            if Some(method) != self.previous_method {
                self.formulate(method)?;
            } else {
                self.update_b(method);
            }
            self.solve()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mna_parser::parser::parse_circuit_description;

    fn node_row(engine: &TransientEngine, name: &str) -> usize {
        let id = engine
            .circuit
            .nodes
            .iter()
            .find(|n| n.name == name)
            .unwrap()
            .id;
        engine.store.index_map().node_row(id).unwrap()
    }

    #[test]
    fn resistive_divider_settles_on_the_first_tick() {
        let parsed =
            parse_circuit_description("V1 1 0 5\nR1 1 2 1000\nR2 2 0 1000\n.tran 1u 10u\n").unwrap();
        let circuit = Circuit::build(parsed).unwrap();
        let mut engine = TransientEngine::new(&circuit);
        engine.run().unwrap();

        let row = node_row(&engine, "2");
        let last = engine.store.len() - 1;
        let value = engine.store.value_at(row, last).unwrap();
        assert!((value - 2.5).abs() < 1e-6);
    }

    #[test]
    fn rc_charge_approaches_source_voltage() {
        let parsed = parse_circuit_description(
            "V1 1 0 5\nR1 1 2 1000\nC1 2 0 1u\n.tran 10u 5m\n.method backward_euler\n",
        )
        .unwrap();
        let circuit = Circuit::build(parsed).unwrap();
        let mut engine = TransientEngine::new(&circuit);
        engine.run().unwrap();

        let row = node_row(&engine, "2");
        let last = engine.store.len() - 1;
        let value = engine.store.value_at(row, last).unwrap();
        // tau = R*C = 1ms, sim_end = 5ms = 5 tau, so within a few mV of 5V.
        assert!((value - 5.0).abs() < 0.05);
    }

    #[test]
    fn effective_method_falls_back_to_backward_euler_until_two_samples_exist() {
        let parsed =
            parse_circuit_description("V1 1 0 5\nR1 1 0 1000\n.tran 1u 10u\n.method gear2\n")
                .unwrap();
        let circuit = Circuit::build(parsed).unwrap();
        let engine = TransientEngine::new(&circuit);
        assert_eq!(engine.effective_method(), IntegrationMethod::BackwardEuler);
    }
}
