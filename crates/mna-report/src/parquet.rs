//! Secondary export: the same tick history (or pole-zero result) as a
//! columnar Parquet file, for downstream analysis in a notebook rather than
//! a waveform viewer.

use crate::error::Result;
use mna_core::circuit::Circuit;
use mna_core::pole_zero::PoleZeroResult;
use mna_core::result_store::ResultStore;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

fn ensure_parquet_extension(filename: &str) -> String {
    let path = Path::new(filename);
    if path.extension().and_then(|e| e.to_str()) == Some("parquet") {
        filename.to_string()
    } else {
        format!("{filename}.parquet")
    }
}

/// One column per node voltage / branch current, one row per tick, matching
/// the ordering `tr0::write_tr0` uses for its text columns.
pub fn write_transient_parquet(circuit: &Circuit, store: &ResultStore, filename: &str) -> Result<()> {
    let filename = ensure_parquet_extension(filename);
    let index_map = store.index_map();

    let mut columns = Vec::new();
    let times: Vec<f64> = (0..store.len()).map(|s| store.tick_at(s).unwrap_or(0.0)).collect();
    columns.push(Series::new("time".into(), times).into_column());

    for node in &circuit.nodes {
        if let Some(row) = index_map.node_row(node.id) {
            let values: Vec<f64> = (0..store.len()).map(|s| store.value_at(row, s).unwrap_or(0.0)).collect();
            columns.push(Series::new(format!("V({})", node.name).into(), values).into_column());
        }
    }
    for device_id in circuit.branch_devices() {
        if let Some(row) = index_map.dev_row(device_id) {
            let values: Vec<f64> = (0..store.len()).map(|s| store.value_at(row, s).unwrap_or(0.0)).collect();
            columns.push(Series::new(format!("I({})", circuit.device_name(device_id)).into(), values).into_column());
        }
    }

    let mut df = DataFrame::new(columns)?;
    let mut file = File::create(&filename)?;
    ParquetWriter::new(&mut file).finish(&mut df)?;
    log::info!("saved transient results to {filename}");
    Ok(())
}

/// Poles, zeros, and residues each get a `_re`/`_im` column pair; the three
/// series are padded to a common length with nulls since they rarely match.
pub fn write_pole_zero_parquet(result: &PoleZeroResult, filename: &str) -> Result<()> {
    let filename = ensure_parquet_extension(filename);

    fn split(values: &[num_complex::Complex64]) -> (Vec<f64>, Vec<f64>) {
        (values.iter().map(|v| v.re).collect(), values.iter().map(|v| v.im).collect())
    }

    let (pole_re, pole_im) = split(&result.poles);
    let (zero_re, zero_im) = split(&result.zeros);
    let (residue_re, residue_im) = split(&result.residues);

    let max_len = [pole_re.len(), zero_re.len(), residue_re.len()].into_iter().max().unwrap_or(0);
    fn pad(mut values: Vec<f64>, len: usize) -> Vec<Option<f64>> {
        values.resize(len, f64::NAN);
        values.into_iter().map(|v| if v.is_nan() { None } else { Some(v) }).collect()
    }

    let columns = vec![
        Series::new("pole_re".into(), pad(pole_re, max_len)).into_column(),
        Series::new("pole_im".into(), pad(pole_im, max_len)).into_column(),
        Series::new("zero_re".into(), pad(zero_re, max_len)).into_column(),
        Series::new("zero_im".into(), pad(zero_im, max_len)).into_column(),
        Series::new("residue_re".into(), pad(residue_re, max_len)).into_column(),
        Series::new("residue_im".into(), pad(residue_im, max_len)).into_column(),
    ];

    let mut df = DataFrame::new(columns)?;
    let mut file = File::create(&filename)?;
    ParquetWriter::new(&mut file).finish(&mut df)?;
    log::info!("saved pole-zero results to {filename}");
    Ok(())
}
