//! `mna` is a SPICE-like circuit simulator driven entirely from a netlist's
//! own `.tran`/`.pz`/`.method`/`.ground` directives.

use clap::Parser;
use mna_core::circuit::Circuit;
use mna_core::AnalysisOutcome;
use mna_report::tr0::TrFormat;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the netlist file to simulate.
    netlist: PathBuf,

    /// Where to write the TR0-style waveform table. Defaults to the
    /// netlist's path with its extension replaced by `.tr0`.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also export the same results as a Parquet file alongside the TR0
    /// output.
    #[arg(long)]
    parquet: bool,

    /// Significant digits in each exported value's mantissa.
    #[arg(long, default_value_t = 6)]
    significant_digits: usize,

    /// Digits in each exported value's exponent.
    #[arg(long, default_value_t = 2)]
    exponent_digits: usize,

    /// Raise the log level to debug regardless of RUST_LOG.
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn default_output_path(netlist: &Path) -> PathBuf {
    netlist.with_extension("tr0")
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    if !args.netlist.exists() {
        eprintln!("netlist file not found: {}", args.netlist.display());
        return ExitCode::from(1);
    }

    let parsed = match mna_parser::parser::parse_circuit_description_file(&args.netlist) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("error parsing '{}': {e}", args.netlist.display());
            return ExitCode::from(1);
        }
    };

    let circuit = match Circuit::build(parsed) {
        Ok(circuit) => circuit,
        Err(e) => {
            eprintln!("error building circuit: {e}");
            return ExitCode::from(2);
        }
    };
    for diagnostic in &circuit.diagnostics {
        log::warn!("{diagnostic}");
    }

    let outcome = match mna_core::run(&circuit) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("simulation failed: {e}");
            return ExitCode::from(2);
        }
    };

    let format = TrFormat {
        significant_digits: args.significant_digits,
        exponent_digits: args.exponent_digits,
    };

    match outcome {
        AnalysisOutcome::Transient(store) => {
            let output_path = args.output.clone().unwrap_or_else(|| default_output_path(&args.netlist));
            let mut file = match std::fs::File::create(&output_path) {
                Ok(file) => file,
                Err(e) => {
                    eprintln!("error creating '{}': {e}", output_path.display());
                    return ExitCode::from(2);
                }
            };
            if let Err(e) = mna_report::tr0::write_tr0(&mut file, &circuit, &store, &format) {
                eprintln!("error writing '{}': {e}", output_path.display());
                return ExitCode::from(2);
            }
            println!("wrote {}", output_path.display());

            if args.parquet {
                let parquet_path = output_path.with_extension("parquet");
                if let Err(e) = mna_report::parquet::write_transient_parquet(
                    &circuit,
                    &store,
                    &parquet_path.to_string_lossy(),
                ) {
                    eprintln!("error writing '{}': {e}", parquet_path.display());
                    return ExitCode::from(2);
                }
                println!("wrote {}", parquet_path.display());
            }
        }
        AnalysisOutcome::PoleZero(result) => {
            print!("{}", mna_report::pole_zero_text::render(&result));
            if args.parquet {
                let parquet_path = args.output.clone().unwrap_or_else(|| default_output_path(&args.netlist)).with_extension("parquet");
                if let Err(e) = mna_report::parquet::write_pole_zero_parquet(&result, &parquet_path.to_string_lossy()) {
                    eprintln!("error writing '{}': {e}", parquet_path.display());
                    return ExitCode::from(2);
                }
                println!("wrote {}", parquet_path.display());
            }
        }
    }

    ExitCode::from(0)
}
