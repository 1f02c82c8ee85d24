//! Append-only tick history of solved unknown vectors.

use crate::circuit::{Circuit, DeviceKind};
use crate::index_map::IndexMap;
use crate::prelude::*;

#[derive(Debug, Clone)]
pub struct ResultStore {
    index_map: IndexMap,
    ticks: Vec<f64>,
    /// Row-major by tick: `values[tick * dimension + row]`.
    values: Vec<f64>,
    dimension: usize,
}

impl ResultStore {
    pub fn new(index_map: IndexMap) -> Self {
        let dimension = index_map.dimension();
        ResultStore {
            index_map,
            ticks: Vec::new(),
            values: Vec::new(),
            dimension,
        }
    }

    pub fn index_map(&self) -> &IndexMap {
        &self.index_map
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    pub fn tick_at(&self, step_index: usize) -> Option<f64> {
        self.ticks.get(step_index).copied()
    }

    pub fn last_tick(&self) -> Option<f64> {
        self.ticks.last().copied()
    }

    /// Appends one solved tick. Requires `tick` strictly greater than the
    /// last appended tick and `x.len() == dimension()`.
    pub fn append(&mut self, tick: f64, x: &[f64]) -> Result<()> {
        if x.len() != self.dimension {
            return Err(Error::DimensionMismatch {
                expected: self.dimension,
                actual: x.len(),
            });
        }
        if let Some(previous) = self.ticks.last().copied() {
            if tick <= previous {
                return Err(Error::NonMonotonicTick { tick, previous });
            }
        }
        self.ticks.push(tick);
        self.values.extend_from_slice(x);
        Ok(())
    }

    /// O(1) lookup of the value at matrix row `row`, absolute tick index
    /// `step_index`.
    pub fn value_at(&self, row: usize, step_index: usize) -> Option<f64> {
        if step_index >= self.ticks.len() {
            return None;
        }
        self.values.get(step_index * self.dimension + row).copied()
    }

    /// Value `k >= 1` samples before the most recently appended tick. Falls
    /// back to the zero initial condition if there isn't enough history.
    pub fn backstep(&self, row: usize, k: usize) -> f64 {
        let len = self.ticks.len();
        if len == 0 || k >= len {
            return 0.0;
        }
        let idx = len - 1 - k;
        self.value_at(row, idx).unwrap_or(0.0)
    }

    /// The solved node voltage at `step_index`, with ideal-voltage-source
    /// read-through: if an attached source defines this node's plus
    /// terminal, its stamped value overrides the solved variable.
    pub fn node_voltage(&self, circuit: &Circuit, node_id: usize, step_index: usize) -> f64 {
        let node = &circuit.nodes[node_id];
        if node.is_ground {
            return 0.0;
        }
        for &dev_id in &node.devices {
            let device = &circuit.devices[dev_id];
            if device.plus != node_id {
                continue;
            }
            if let DeviceKind::VoltageSource { value } = &device.kind {
                let time = self.tick_at(step_index).unwrap_or(0.0);
                return value.value_at(time);
            }
        }
        self.index_map
            .node_row(node_id)
            .and_then(|row| self.value_at(row, step_index))
            .unwrap_or(0.0)
    }

    /// The solved branch current of `device_id` at `step_index`, with
    /// ideal-current-source read-through.
    pub fn device_current(&self, circuit: &Circuit, device_id: usize, step_index: usize) -> f64 {
        let device = &circuit.devices[device_id];
        if let DeviceKind::CurrentSource { value } = &device.kind {
            let time = self.tick_at(step_index).unwrap_or(0.0);
            return value.value_at(time);
        }
        self.index_map
            .dev_row(device_id)
            .and_then(|row| self.value_at(row, step_index))
            .unwrap_or(0.0)
    }

    /// Estimates the `order`-th time derivative (1, 2, or 3) of `row` via
    /// Newton divided differences over the last `order + 1` samples,
    /// `steps_back` ticks before the most recent one. Returns 0 if history
    /// is insufficient.
    pub fn derivative(&self, row: usize, order: usize, steps_back: usize) -> f64 {
        if !(1..=3).contains(&order) {
            return 0.0;
        }
        let len = self.ticks.len();
        let idx_end = match len.checked_sub(1 + steps_back) {
            Some(v) => v,
            None => return 0.0,
        };
        if idx_end < order {
            return 0.0;
        }
        let start = idx_end - order;

        let times: Vec<f64> = self.ticks[start..=idx_end].to_vec();
        let mut table: Vec<f64> = (start..=idx_end)
            .map(|i| self.values[i * self.dimension + row])
            .collect();

        for level in 1..=order {
            for i in (level..=order).rev() {
                table[i] = (table[i] - table[i - 1]) / (times[i] - times[i - level]);
            }
        }

        let factorial: f64 = (1..=order).map(|n| n as f64).product();
        table[order] * factorial
    }
}
