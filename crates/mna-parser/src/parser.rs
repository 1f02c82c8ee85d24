use crate::analyses::{AnalysisConfig, IntegrationMethod, PoleZeroRequest};
use crate::circuit::ParsedCircuit;
use crate::elements::cccs::Cccs;
use crate::elements::ccvs::Ccvs;
use crate::elements::current_source::CurrentSource;
use crate::elements::vccs::Vccs;
use crate::elements::vcvs::Vcvs;
use crate::prelude::*;
use crate::utils::parse_value;
use std::{
    fs::File,
    io::{BufReader, Read as IoRead},
    path::Path,
};

use crate::elements::capacitor::Capacitor;
use crate::elements::inductor::Inductor;
use crate::elements::resistor::Resistor;
use crate::elements::voltage_source::VoltageSource;

/// Dispatches a single netlist line to the element parser matching its
/// leading letter.
fn parse_element(line: &str) -> Result<Element> {
    let prefix = line
        .chars()
        .next()
        .ok_or_else(|| Error::InvalidFormat("empty element line".to_string()))?;

    match prefix.to_ascii_uppercase() {
        'R' => Ok(Element::from(line.parse::<Resistor>()?)),
        'C' => Ok(Element::from(line.parse::<Capacitor>()?)),
        'L' => Ok(Element::from(line.parse::<Inductor>()?)),
        'V' => Ok(Element::from(line.parse::<VoltageSource>()?)),
        'I' => Ok(Element::from(line.parse::<CurrentSource>()?)),
        'E' => Ok(Element::from(line.parse::<Vcvs>()?)),
        'G' => Ok(Element::from(line.parse::<Vccs>()?)),
        'H' => Ok(Element::from(line.parse::<Ccvs>()?)),
        'F' => Ok(Element::from(line.parse::<Cccs>()?)),
        other => Err(Error::UnknownElementType(other.to_string())),
    }
}

fn parse_method_keyword(word: &str) -> IntegrationMethod {
    match word.to_ascii_lowercase().as_str() {
        "be" | "backward_euler" | "backwardeuler" => IntegrationMethod::BackwardEuler,
        "trap" | "trapezoidal" => IntegrationMethod::Trapezoidal,
        "gear2" | "gear-2" | "gear" => IntegrationMethod::Gear2,
        other => {
            log::warn!("unrecognized integration method '{other}', defaulting to Gear-2");
            IntegrationMethod::default()
        }
    }
}

fn apply_directive(
    directive: &str,
    rest: &[&str],
    config: &mut AnalysisConfig,
    line: usize,
) -> Result<()> {
    match (directive, rest) {
        (".tran", [tick, sim_end]) => {
            config.tick = parse_value(tick)?;
            config.sim_end = parse_value(sim_end)?;
        }
        (".tran", _) => {
            return Err(Error::ParseError {
                line,
                message: ".tran requires <tick> <sim_end>".to_string(),
            });
        }
        (".method", [method]) => {
            config.method = parse_method_keyword(method);
        }
        (".method", _) => {
            return Err(Error::ParseError {
                line,
                message: ".method requires a single keyword".to_string(),
            });
        }
        (".ground", [net]) => {
            config.ground_net = Some(net.to_string());
        }
        (".ground", _) => {
            return Err(Error::ParseError {
                line,
                message: ".ground requires a single net name".to_string(),
            });
        }
        (".pz", [input_node, output_node, order]) => {
            let order: usize = order.parse().map_err(|_| Error::ParseError {
                line,
                message: format!("invalid pole-zero order '{order}'"),
            })?;
            config.pole_zero = Some(PoleZeroRequest {
                input_node: input_node.to_string(),
                output_node: output_node.to_string(),
                order,
            });
        }
        (".pz", _) => {
            return Err(Error::ParseError {
                line,
                message: ".pz requires <input> <output> <order>".to_string(),
            });
        }
        (".end", _) => {}
        (other, _) => {
            log::warn!("unsupported directive '{other}' on line {line}, ignoring");
        }
    }
    Ok(())
}

/// Parses a SPICE-like netlist into a device list plus analysis directives.
///
/// # Description
/// - It is **case-insensitive** for directive keywords.
/// - Each non-blank, non-comment line describes either **one circuit
///   element** or **one analysis directive**.
/// - The **order of lines** is irrelevant to the resulting circuit.
/// - Text following a `%` or `*` character is a **comment** and ignored.
/// - Node names are arbitrary identifiers; `0` is conventionally ground
///   unless overridden with `.ground`.
pub fn parse_circuit_description(input: &str) -> Result<ParsedCircuit> {
    let mut elements = Vec::new();
    let mut config = AnalysisConfig::default();

    for (line_num, raw_line) in input.lines().enumerate() {
        let current_line = line_num + 1;
        let line = raw_line.trim();

        if line.is_empty() || line.starts_with('%') || line.starts_with('*') {
            continue;
        }

        if let Some(stripped) = line.strip_prefix('.') {
            let mut parts = stripped.split_whitespace();
            let directive = format!(".{}", parts.next().unwrap_or("").to_ascii_lowercase());
            let rest: Vec<&str> = parts.collect();
            apply_directive(&directive, &rest, &mut config, current_line)?;
            continue;
        }

        let element = parse_element(line).map_err(|e| Error::ParseError {
            line: current_line,
            message: e.to_string(),
        })?;
        elements.push(element);
    }

    let circuit = ParsedCircuit::new(elements, config);
    if circuit.is_empty() {
        return Err(Error::EmptyNetlist);
    }

    Ok(circuit)
}

pub fn parse_circuit_description_file(file_path: &Path) -> Result<ParsedCircuit> {
    let file = File::open(file_path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    parse_circuit_description(&contents)
}
