//! Frequency-domain core: asymptotic waveform evaluation (moment-matching
//! Padé) over the same s-domain G/C the time-domain stamper produces.

use crate::circuit::Circuit;
use crate::dense::{DenseLu, DenseLuComplex};
use crate::index_map::IndexMap;
use crate::poly_roots;
use crate::prelude::*;
use crate::result_store::ResultStore;
use crate::stamp::{self, Domain, Mna, StampMode};
use mna_parser::analyses::{IntegrationMethod, PoleZeroRequest};
use num_complex::Complex64;

#[derive(Debug, Clone)]
pub struct PoleZeroResult {
    pub poles: Vec<Complex64>,
    pub zeros: Vec<Complex64>,
    pub residues: Vec<Complex64>,
}

pub struct PoleZeroEngine<'a> {
    circuit: &'a Circuit,
}

fn mat_vec(m: &[f64], dim: usize, v: &[f64]) -> Vec<f64> {
    (0..dim)
        .map(|i| (0..dim).map(|j| m[i * dim + j] * v[j]).sum())
        .collect()
}

fn node_row_by_name(circuit: &Circuit, index_map: &IndexMap, name: &str) -> Result<usize> {
    let node = circuit
        .nodes
        .iter()
        .find(|n| n.name == name)
        .ok_or_else(|| Error::UnknownNode(name.to_string()))?;
    index_map
        .node_row(node.id)
        .ok_or_else(|| Error::UnknownNode(format!("'{name}' is the ground node and has no row")))
}

impl<'a> PoleZeroEngine<'a> {
    pub fn new(circuit: &'a Circuit) -> Self {
        PoleZeroEngine { circuit }
    }

    /// Runs the full AWE/Padé pipeline for one `.pz` request.
    pub fn run(&self, request: &PoleZeroRequest) -> Result<PoleZeroResult> {
        let circuit = self.circuit;
        let q = request.order;
        let index_map = IndexMap::build(circuit.nodes.len(), circuit.ground, &circuit.branch_devices());
        let dim = index_map.dimension();
        let store = ResultStore::new(index_map);

        let input_row = node_row_by_name(circuit, store.index_map(), &request.input_node)?;
        let output_row = node_row_by_name(circuit, store.index_map(), &request.output_node)?;

        let mut g = vec![0.0; dim * dim];
        let mut c = vec![0.0; dim * dim];
        let mut discarded_b = vec![0.0; dim];
        {
            let mut mats = Mna {
                g: &mut g,
                c: &mut c,
                b: &mut discarded_b,
                dim,
            };
            // Method/time/h are irrelevant in the s-domain branch of every
            // device stamp; Gear2 is passed only because the function
            // signature requires a concrete variant.
            stamp::stamp_all(
                circuit,
                &store,
                IntegrationMethod::Gear2,
                Domain::S,
                0.0,
                1.0,
                StampMode::Full,
                &mut mats,
            );
        }

        // The excitation is a unit test stimulus at the requested input
        // node, independent of whatever real sources the netlist has
        // there — AWE characterizes the network's transfer function, not
        // any one operating point.
        let mut e = vec![0.0; dim];
        e[input_row] = circuit.scale;

        let lu_g = DenseLu::factor(&g, dim)?;

        let moment_count = 2 * q;
        let mut moments_vec = Vec::with_capacity(moment_count);
        let v0 = lu_g.solve(&e)?;
        moments_vec.push(v0);
        for k in 1..moment_count {
            let prev = &moments_vec[k - 1];
            let rhs: Vec<f64> = mat_vec(&c, dim, prev).iter().map(|x| -x).collect();
            let vk = lu_g.solve(&rhs)?;
            moments_vec.push(vk);
        }

        let m: Vec<f64> = moments_vec.iter().map(|v| v[output_row]).collect();

        let mut hankel = vec![0.0; q * q];
        for i in 0..q {
            for j in 0..q {
                hankel[i * q + j] = m[i + j];
            }
        }
        let neg_v: Vec<f64> = (0..q).map(|i| -m[i + q]).collect();
        let lu_h = DenseLu::factor(&hankel, q)?;
        let denom_free = lu_h.solve(&neg_v)?;

        let mut denom = denom_free.clone();
        denom.push(1.0);

        let mut numerator = vec![0.0; q];
        for (i, slot) in numerator.iter_mut().enumerate() {
            let mut sum = 0.0;
            for j in 0..=i {
                sum += m[i - j] * denom_free[j];
            }
            *slot = sum;
        }

        let scale = circuit.scale;
        let poles: Vec<Complex64> = poly_roots::roots(&denom).iter().map(|p| p * scale).collect();
        let zeros: Vec<Complex64> = poly_roots::roots(&numerator).iter().map(|z| z * scale).collect();

        let mut p_matrix = vec![Complex64::new(0.0, 0.0); q * q];
        // The Vandermonde system is solved in moment space (against the
        // un-scaled moments m), so it needs the un-scaled poles too.
        let moment_space_poles: Vec<Complex64> = poles.iter().map(|p| p / scale).collect();
        for i in 0..q {
            for j in 0..q {
                p_matrix[i * q + j] = moment_space_poles[i].powi(-((j as i32) + 1));
            }
        }
        let neg_m: Vec<Complex64> = (0..q).map(|i| Complex64::new(-m[i], 0.0)).collect();
        let lu_p = DenseLuComplex::factor(&p_matrix, q)?;
        let residues: Vec<Complex64> = lu_p.solve(&neg_m)?.iter().map(|r| r * scale).collect();

        Ok(PoleZeroResult {
            poles,
            zeros,
            residues,
        })
    }
}
