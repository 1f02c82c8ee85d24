//! Primary waveform export: a plain-text column table, TIME followed by one
//! column per solved unknown, each carrying its SPICE-style type code (1 for
//! a node voltage, 8 for a branch current).

use crate::error::Result;
use mna_core::circuit::Circuit;
use mna_core::result_store::ResultStore;
use std::io::Write;

/// Caller-chosen numeric layout for every value column.
#[derive(Debug, Clone, Copy)]
pub struct TrFormat {
    pub significant_digits: usize,
    pub exponent_digits: usize,
}

impl Default for TrFormat {
    fn default() -> Self {
        TrFormat {
            significant_digits: 6,
            exponent_digits: 2,
        }
    }
}

fn format_value(value: f64, format: &TrFormat) -> String {
    let precision = format.significant_digits.saturating_sub(1);
    let rendered = format!("{value:.precision$e}");
    let (mantissa, exponent) = rendered.split_once('e').expect("Rust always emits 'e' in {:e} formatting");
    let exponent_value: i32 = exponent.parse().expect("Rust's {:e} exponent is always a base-10 integer");
    let sign = if exponent_value < 0 { '-' } else { '+' };
    format!(
        "{mantissa}e{sign}{:0width$}",
        exponent_value.abs(),
        width = format.exponent_digits
    )
}

/// SPICE rawfile-style variable type codes: 1 is a node voltage, 8 a branch
/// current.
const TYPE_CODE_VOLTAGE: u8 = 1;
const TYPE_CODE_CURRENT: u8 = 8;

/// One column of the table: its header label, type code, and the row it
/// reads from.
struct Column {
    header: String,
    type_code: u8,
    row: usize,
}

fn columns(circuit: &Circuit, store: &ResultStore) -> Vec<Column> {
    let index_map = store.index_map();
    let mut slots: Vec<Option<Column>> = (0..store.dimension()).map(|_| None).collect();

    for node in &circuit.nodes {
        if let Some(row) = index_map.node_row(node.id) {
            slots[row] = Some(Column {
                header: format!("V({})", node.name),
                type_code: TYPE_CODE_VOLTAGE,
                row,
            });
        }
    }
    for device_id in circuit.branch_devices() {
        if let Some(row) = index_map.dev_row(device_id) {
            slots[row] = Some(Column {
                header: format!("I({})", circuit.device_name(device_id)),
                type_code: TYPE_CODE_CURRENT,
                row,
            });
        }
    }

    slots.into_iter().flatten().collect()
}

/// Writes the column-header line, then one tick row per appended sample.
pub fn write_tr0<W: Write>(
    writer: &mut W,
    circuit: &Circuit,
    store: &ResultStore,
    format: &TrFormat,
) -> Result<()> {
    let columns = columns(circuit, store);

    write!(writer, "TIME")?;
    for column in &columns {
        write!(writer, "\t{}:{}", column.header, column.type_code)?;
    }
    writeln!(writer)?;

    for step in 0..store.len() {
        let time = store.tick_at(step).unwrap_or(0.0);
        write!(writer, "{}", format_value(time, format))?;
        for column in &columns {
            let value = store.value_at(column.row, step).unwrap_or(0.0);
            write!(writer, "\t{}", format_value(value, format))?;
        }
        writeln!(writer)?;
    }

    log::info!("wrote {} ticks across {} columns", store.len(), columns.len());
    Ok(())
}
