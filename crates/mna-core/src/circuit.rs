//! In-memory device/node graph. Built once, borrowed immutably by whichever
//! engine runs the analysis.

use crate::prelude::*;
use mna_parser::circuit::ParsedCircuit;
use mna_parser::elements::{Element, Identifiable};

pub use mna_parser::analyses::{AnalysisConfig, IntegrationMethod, PoleZeroRequest};
pub use mna_parser::elements::source_value::SourceValue;
pub use mna_parser::pwl::PwlTable;

pub const GROUND_NAME: &str = "0";

#[derive(Debug, Clone)]
pub struct Node {
    pub id: usize,
    pub name: String,
    pub is_ground: bool,
    /// Devices attached to this node via a real electrical terminal
    /// (plus/minus), not via a controlled-source sample reference.
    pub devices: Vec<usize>,
}

#[derive(Debug, Clone)]
pub enum DeviceKind {
    Resistor {
        value: f64,
    },
    Capacitor {
        value: f64,
    },
    Inductor {
        value: f64,
    },
    VoltageSource {
        value: SourceValue,
    },
    CurrentSource {
        value: SourceValue,
    },
    Vcvs {
        gain: f64,
        pos_sample: usize,
        neg_sample: usize,
    },
    Vccs {
        gain: f64,
        pos_sample: usize,
        neg_sample: usize,
    },
    Ccvs {
        gain: f64,
        pos_sample: usize,
        neg_sample: usize,
        /// Resolved once during construction: the device whose branch
        /// current is sampled, and the sign relating the sample direction
        /// to that device's own (plus, minus) orientation.
        sample_branch: Option<usize>,
        sample_sign: f64,
    },
    Cccs {
        gain: f64,
        pos_sample: usize,
        neg_sample: usize,
        sample_branch: Option<usize>,
        sample_sign: f64,
    },
}

impl DeviceKind {
    /// Voltage-defined devices always occupy a branch row; current-defined
    /// controlled sources occupy one only if their sample resolved.
    pub fn is_branch_device(&self) -> bool {
        matches!(
            self,
            DeviceKind::VoltageSource { .. }
                | DeviceKind::Inductor { .. }
                | DeviceKind::Vcvs { .. }
                | DeviceKind::Ccvs { .. }
        )
    }
}

#[derive(Debug, Clone)]
pub struct Device {
    pub id: usize,
    pub name: String,
    pub plus: usize,
    pub minus: usize,
    pub kind: DeviceKind,
}

#[derive(Debug, Clone)]
pub struct Circuit {
    pub nodes: Vec<Node>,
    pub devices: Vec<Device>,
    pub ground: usize,
    /// Stamping scale factor applied in the s-domain to keep the Padé
    /// linear system well-conditioned for sub-pF/sub-nH dynamics.
    pub scale: f64,
    pub analysis: AnalysisConfig,
    /// Non-fatal construction problems (unresolved sample branches), kept
    /// for the CLI to surface rather than aborting the run.
    pub diagnostics: Vec<String>,
}

fn collect_node_names(elements: &[Element]) -> Vec<String> {
    let mut seen = Vec::new();
    let mut push_unique = |name: &str, seen: &mut Vec<String>| {
        if !seen.iter().any(|n: &String| n == name) {
            seen.push(name.to_string());
        }
    };
    for element in elements {
        for node in element.nodes() {
            push_unique(node, &mut seen);
        }
    }
    seen
}

fn choose_ground(elements: &[Element], names: &[String], requested: Option<&str>) -> String {
    if let Some(name) = requested {
        if names.iter().any(|n| n == name) {
            return name.to_string();
        }
        log::warn!("requested ground net '{name}' not found in netlist, falling back to highest-incidence node");
    }

    let mut incidence: HashMap<&str, usize> = HashMap::new();
    for element in elements {
        match element {
            Element::VoltageSource(e) => {
                *incidence.entry(e.plus.as_str()).or_default() += 1;
                *incidence.entry(e.minus.as_str()).or_default() += 1;
            }
            Element::CurrentSource(e) => {
                *incidence.entry(e.plus.as_str()).or_default() += 1;
                *incidence.entry(e.minus.as_str()).or_default() += 1;
            }
            Element::Resistor(e) => {
                *incidence.entry(e.plus.as_str()).or_default() += 1;
                *incidence.entry(e.minus.as_str()).or_default() += 1;
            }
            Element::Capacitor(e) => {
                *incidence.entry(e.plus.as_str()).or_default() += 1;
                *incidence.entry(e.minus.as_str()).or_default() += 1;
            }
            Element::Inductor(e) => {
                *incidence.entry(e.plus.as_str()).or_default() += 1;
                *incidence.entry(e.minus.as_str()).or_default() += 1;
            }
            Element::Vcvs(e) => {
                *incidence.entry(e.plus.as_str()).or_default() += 1;
                *incidence.entry(e.minus.as_str()).or_default() += 1;
            }
            Element::Vccs(e) => {
                *incidence.entry(e.plus.as_str()).or_default() += 1;
                *incidence.entry(e.minus.as_str()).or_default() += 1;
            }
            Element::Ccvs(e) => {
                *incidence.entry(e.plus.as_str()).or_default() += 1;
                *incidence.entry(e.minus.as_str()).or_default() += 1;
            }
            Element::Cccs(e) => {
                *incidence.entry(e.plus.as_str()).or_default() += 1;
                *incidence.entry(e.minus.as_str()).or_default() += 1;
            }
        }
    }

    names
        .iter()
        .max_by(|a, b| {
            let ia = *incidence.get(a.as_str()).unwrap_or(&0);
            let ib = *incidence.get(b.as_str()).unwrap_or(&0);
            ia.cmp(&ib).then_with(|| b.cmp(a))
        })
        .cloned()
        .unwrap_or_else(|| GROUND_NAME.to_string())
}

fn plus_minus<'a>(element: &'a Element) -> (&'a str, &'a str) {
    match element {
        Element::VoltageSource(e) => (&e.plus, &e.minus),
        Element::CurrentSource(e) => (&e.plus, &e.minus),
        Element::Resistor(e) => (&e.plus, &e.minus),
        Element::Capacitor(e) => (&e.plus, &e.minus),
        Element::Inductor(e) => (&e.plus, &e.minus),
        Element::Vcvs(e) => (&e.plus, &e.minus),
        Element::Vccs(e) => (&e.plus, &e.minus),
        Element::Ccvs(e) => (&e.plus, &e.minus),
        Element::Cccs(e) => (&e.plus, &e.minus),
    }
}

impl Circuit {
    pub fn build(parsed: ParsedCircuit) -> Result<Circuit> {
        let ParsedCircuit { elements, analysis } = parsed;

        let names = collect_node_names(&elements);
        let ground_name = choose_ground(&elements, &names, analysis.ground_net.as_deref());

        let mut nodes = Vec::with_capacity(names.len());
        nodes.push(Node {
            id: 0,
            name: ground_name.clone(),
            is_ground: true,
            devices: Vec::new(),
        });
        let mut name_to_id: HashMap<String, usize> = HashMap::new();
        name_to_id.insert(ground_name.clone(), 0);
        for name in &names {
            if *name == ground_name {
                continue;
            }
            let id = nodes.len();
            name_to_id.insert(name.clone(), id);
            nodes.push(Node {
                id,
                name: name.clone(),
                is_ground: false,
                devices: Vec::new(),
            });
        }

        let mut devices = Vec::with_capacity(elements.len());
        let mut diagnostics = Vec::new();
        let mut min_dynamic: Option<f64> = None;

        for (id, element) in elements.iter().enumerate() {
            let (plus_name, minus_name) = plus_minus(element);
            let plus = name_to_id[plus_name];
            let minus = name_to_id[minus_name];
            let name = element.identifier();

            let kind = match element {
                Element::Resistor(e) => DeviceKind::Resistor { value: e.value },
                Element::Capacitor(e) => {
                    min_dynamic = Some(min_dynamic.map_or(e.value, |m: f64| m.min(e.value)));
                    DeviceKind::Capacitor { value: e.value }
                }
                Element::Inductor(e) => {
                    min_dynamic = Some(min_dynamic.map_or(e.value, |m: f64| m.min(e.value)));
                    DeviceKind::Inductor { value: e.value }
                }
                Element::VoltageSource(e) => DeviceKind::VoltageSource {
                    value: e.value.clone(),
                },
                Element::CurrentSource(e) => DeviceKind::CurrentSource {
                    value: e.value.clone(),
                },
                Element::Vcvs(e) => DeviceKind::Vcvs {
                    gain: e.gain,
                    pos_sample: name_to_id[e.pos_sample.as_str()],
                    neg_sample: name_to_id[e.neg_sample.as_str()],
                },
                Element::Vccs(e) => DeviceKind::Vccs {
                    gain: e.gain,
                    pos_sample: name_to_id[e.pos_sample.as_str()],
                    neg_sample: name_to_id[e.neg_sample.as_str()],
                },
                Element::Ccvs(e) => DeviceKind::Ccvs {
                    gain: e.gain,
                    pos_sample: name_to_id[e.pos_sample.as_str()],
                    neg_sample: name_to_id[e.neg_sample.as_str()],
                    sample_branch: None,
                    sample_sign: 1.0,
                },
                Element::Cccs(e) => DeviceKind::Cccs {
                    gain: e.gain,
                    pos_sample: name_to_id[e.pos_sample.as_str()],
                    neg_sample: name_to_id[e.neg_sample.as_str()],
                    sample_branch: None,
                    sample_sign: 1.0,
                },
            };

            nodes[plus].devices.push(id);
            nodes[minus].devices.push(id);
            devices.push(Device {
                id,
                name,
                plus,
                minus,
                kind,
            });
        }

        let mut dropped = Vec::new();
        for id in 0..devices.len() {
            let (pos_sample, neg_sample) = match &devices[id].kind {
                DeviceKind::Ccvs {
                    pos_sample,
                    neg_sample,
                    ..
                }
                | DeviceKind::Cccs {
                    pos_sample,
                    neg_sample,
                    ..
                } => (*pos_sample, *neg_sample),
                _ => continue,
            };

            let resolved = nodes[pos_sample]
                .devices
                .iter()
                .find(|d| nodes[neg_sample].devices.contains(d))
                .copied();

            match resolved {
                Some(branch_id) => {
                    let sign = if devices[branch_id].plus == pos_sample {
                        1.0
                    } else {
                        -1.0
                    };
                    match &mut devices[id].kind {
                        DeviceKind::Ccvs {
                            sample_branch,
                            sample_sign,
                            ..
                        }
                        | DeviceKind::Cccs {
                            sample_branch,
                            sample_sign,
                            ..
                        } => {
                            *sample_branch = Some(branch_id);
                            *sample_sign = sign;
                        }
                        _ => unreachable!(),
                    }
                }
                None => {
                    let message = format!(
                        "device '{}' could not resolve a sample branch between its sense nodes; dropping it",
                        devices[id].name
                    );
                    log::warn!("{message}");
                    diagnostics.push(message);
                    dropped.push(id);
                }
            }
        }

        if !dropped.is_empty() {
            let dropped_set: std::collections::HashSet<usize> = dropped.into_iter().collect();
            devices.retain(|d| !dropped_set.contains(&d.id));
        }

        let min_dynamic = min_dynamic.unwrap_or(1.0);
        let scale = (1.0f64).max(10f64.powf(-min_dynamic.log10().floor() - 3.0));

        log::info!(
            "circuit built: {} nodes, {} devices, ground='{}'",
            nodes.len(),
            devices.len(),
            ground_name
        );

        Ok(Circuit {
            nodes,
            devices,
            ground: 0,
            scale,
            analysis,
            diagnostics,
        })
    }

    /// Devices that must own a branch row in the MNA system: voltage-defined
    /// devices plus every resolved current-controlled-source sample branch.
    pub fn branch_devices(&self) -> Vec<usize> {
        let mut rows: Vec<usize> = self
            .devices
            .iter()
            .filter(|d| d.kind.is_branch_device())
            .map(|d| d.id)
            .collect();
        for device in &self.devices {
            let sample_branch = match &device.kind {
                DeviceKind::Ccvs { sample_branch, .. } => *sample_branch,
                DeviceKind::Cccs { sample_branch, .. } => *sample_branch,
                _ => None,
            };
            if let Some(id) = sample_branch {
                if !rows.contains(&id) {
                    rows.push(id);
                }
            }
        }
        rows
    }

    pub fn node_name(&self, node_id: usize) -> &str {
        &self.nodes[node_id].name
    }

    pub fn device_name(&self, device_id: usize) -> &str {
        &self.devices[device_id].name
    }
}
