//! Per-device-type contributions to the conductance matrix G, susceptance
//! matrix C, and excitation vector b. Dispatched on the device variant via
//! `match`, not dynamic dispatch, since device count times tick count is
//! the hot loop of the transient engine.

use crate::circuit::{Circuit, Device, DeviceKind};
use crate::result_store::ResultStore;
use mna_parser::analyses::IntegrationMethod;

/// Whether the stamp is being built for the time-domain transient solve or
/// the s-domain moment recursion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Time,
    S,
}

/// `Full` rebuilds G, C, and b; `BOnly` is the cheap re-stamp used every
/// tick once G and C are known not to have changed (resistor, inductor and
/// capacitor stencils, and controlled-source couplings are all constant
/// across ticks for a fixed integration method).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StampMode {
    Full,
    BOnly,
}

/// A mutable view over the three MNA matrices being assembled, dimension
/// `dim x dim` (row-major) for G and C, length `dim` for b.
pub struct Mna<'a> {
    pub g: &'a mut [f64],
    pub c: &'a mut [f64],
    pub b: &'a mut [f64],
    pub dim: usize,
}

impl<'a> Mna<'a> {
    fn add_g(&mut self, row: Option<usize>, col: Option<usize>, val: f64) {
        if let (Some(r), Some(c)) = (row, col) {
            self.g[r * self.dim + c] += val;
        }
    }

    fn add_c(&mut self, row: Option<usize>, col: Option<usize>, val: f64) {
        if let (Some(r), Some(c)) = (row, col) {
            self.c[r * self.dim + c] += val;
        }
    }

    fn add_b(&mut self, row: Option<usize>, val: f64) {
        if let Some(r) = row {
            self.b[r] += val;
        }
    }
}

/// Runs a full stamping pass over every device in the circuit.
pub fn stamp_all(
    circuit: &Circuit,
    store: &ResultStore,
    method: IntegrationMethod,
    domain: Domain,
    time: f64,
    h: f64,
    mode: StampMode,
    mats: &mut Mna,
) {
    for device in &circuit.devices {
        stamp_device(circuit, store, device, method, domain, time, h, mode, mats);
    }
}

fn companion_stencil(value: f64, method: IntegrationMethod, domain: Domain, h: f64, scale: f64) -> f64 {
    match domain {
        Domain::S => value * scale,
        Domain::Time => match method {
            IntegrationMethod::BackwardEuler => value / h,
            IntegrationMethod::Trapezoidal => 2.0 * value / h,
            IntegrationMethod::Gear2 => 1.5 * value / h,
        },
    }
}

#[allow(clippy::too_many_arguments)]
fn stamp_device(
    circuit: &Circuit,
    store: &ResultStore,
    device: &Device,
    method: IntegrationMethod,
    domain: Domain,
    time: f64,
    h: f64,
    mode: StampMode,
    mats: &mut Mna,
) {
    let index_map = store.index_map();
    let p = index_map.node_row(device.plus);
    let n = index_map.node_row(device.minus);
    let full = mode == StampMode::Full;

    match &device.kind {
        DeviceKind::Resistor { value } => {
            if full {
                let g = 1.0 / value;
                mats.add_g(p, p, g);
                mats.add_g(n, n, g);
                mats.add_g(p, n, -g);
                mats.add_g(n, p, -g);
            }
        }

        DeviceKind::Capacitor { value } => {
            let coef = companion_stencil(*value, method, domain, h, circuit.scale);
            if full {
                mats.add_c(p, p, coef);
                mats.add_c(n, n, coef);
                mats.add_c(p, n, -coef);
                mats.add_c(n, p, -coef);
            }
            if domain == Domain::Time {
                let row_p = p;
                let row_n = n;
                let dv_h = {
                    let vp = row_p.map_or(0.0, |r| store.backstep(r, 1));
                    let vn = row_n.map_or(0.0, |r| store.backstep(r, 1));
                    vp - vn
                };
                let b_term = match method {
                    IntegrationMethod::BackwardEuler => coef * dv_h,
                    IntegrationMethod::Trapezoidal => {
                        let dv_2h = {
                            let vp = row_p.map_or(0.0, |r| store.backstep(r, 2));
                            let vn = row_n.map_or(0.0, |r| store.backstep(r, 2));
                            vp - vn
                        };
                        let dvdt_h = (dv_h - dv_2h) / h;
                        coef * dv_h + value * dvdt_h
                    }
                    IntegrationMethod::Gear2 => {
                        let dv_2h = {
                            let vp = row_p.map_or(0.0, |r| store.backstep(r, 2));
                            let vn = row_n.map_or(0.0, |r| store.backstep(r, 2));
                            vp - vn
                        };
                        (value / h) * (2.0 * dv_h - 0.5 * dv_2h)
                    }
                };
                mats.add_b(p, b_term);
                mats.add_b(n, -b_term);
            }
        }

        DeviceKind::Inductor { value } => {
            let d = index_map.dev_row(device.id);
            if full {
                mats.add_g(p, d, 1.0);
                mats.add_g(d, p, 1.0);
                mats.add_g(n, d, -1.0);
                mats.add_g(d, n, -1.0);
                let coef = companion_stencil(*value, method, domain, h, circuit.scale);
                mats.add_c(d, d, -coef);
            }
            if domain == Domain::Time {
                let i_h = d.map_or(0.0, |r| store.backstep(r, 1));
                let b_term = match method {
                    IntegrationMethod::BackwardEuler => (value / h) * i_h,
                    IntegrationMethod::Trapezoidal => {
                        let i_2h = d.map_or(0.0, |r| store.backstep(r, 2));
                        let didt_h = (i_h - i_2h) / h;
                        (2.0 * value / h) * i_h + value * didt_h
                    }
                    IntegrationMethod::Gear2 => {
                        let i_2h = d.map_or(0.0, |r| store.backstep(r, 2));
                        (value / h) * (2.0 * i_h - 0.5 * i_2h)
                    }
                };
                mats.add_b(d, b_term);
            }
        }

        DeviceKind::VoltageSource { value } => {
            let d = index_map.dev_row(device.id);
            if full {
                mats.add_g(p, d, 1.0);
                mats.add_g(d, p, 1.0);
                mats.add_g(n, d, -1.0);
                mats.add_g(d, n, -1.0);
            }
            let stimulus = match domain {
                Domain::Time => value.value_at(time),
                Domain::S => circuit.scale,
            };
            mats.add_b(d, stimulus);
        }

        DeviceKind::CurrentSource { value } => {
            let stimulus = match domain {
                Domain::Time => value.value_at(time),
                Domain::S => circuit.scale,
            };
            mats.add_b(p, -stimulus);
            mats.add_b(n, stimulus);
        }

        DeviceKind::Vcvs {
            gain,
            pos_sample,
            neg_sample,
        } => {
            // The branch identity always occupies its row, same as a plain
            // voltage source; the gain coupling is restricted to time-domain
            // use, so it's omitted from the s-domain moment-matching system.
            if full {
                let d = index_map.dev_row(device.id);
                mats.add_g(p, d, 1.0);
                mats.add_g(d, p, 1.0);
                mats.add_g(n, d, -1.0);
                mats.add_g(d, n, -1.0);
                if domain == Domain::Time {
                    let ps = index_map.node_row(*pos_sample);
                    let ns = index_map.node_row(*neg_sample);
                    mats.add_g(d, ps, -gain);
                    mats.add_g(d, ns, *gain);
                }
            }
        }

        DeviceKind::Vccs {
            gain,
            pos_sample,
            neg_sample,
        } => {
            if full && domain == Domain::Time {
                let ps = index_map.node_row(*pos_sample);
                let ns = index_map.node_row(*neg_sample);
                mats.add_g(p, ps, *gain);
                mats.add_g(p, ns, -gain);
                mats.add_g(n, ps, -gain);
                mats.add_g(n, ns, *gain);
            }
        }

        DeviceKind::Ccvs {
            gain,
            sample_branch,
            sample_sign,
            ..
        } => {
            if full {
                let d = index_map.dev_row(device.id);
                mats.add_g(p, d, 1.0);
                mats.add_g(d, p, 1.0);
                mats.add_g(n, d, -1.0);
                mats.add_g(d, n, -1.0);
                if domain == Domain::Time {
                    if let Some(branch_id) = sample_branch {
                        let s = index_map.dev_row(*branch_id);
                        mats.add_g(d, s, -gain * sample_sign);
                    }
                }
            }
        }

        DeviceKind::Cccs {
            gain,
            sample_branch,
            sample_sign,
            ..
        } => {
            if full && domain == Domain::Time {
                if let Some(branch_id) = sample_branch {
                    let s = index_map.dev_row(*branch_id);
                    mats.add_g(p, s, gain * sample_sign);
                    mats.add_g(n, s, -gain * sample_sign);
                }
            }
        }
    }
}
