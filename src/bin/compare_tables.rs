//! Diff two sweep result tables (per-pass or aggregated, not mixed) and
//! report the mean absolute difference of each metric across rows matched
//! by parameter key.

use std::error::Error;
use std::fs::read_to_string;
use std::path::PathBuf;

use clap::Parser;

use plumbline::io::table::{Table, diff_tables, parse_csv};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// First CSV (baseline) - per-pass or aggregated
    #[arg(long)]
    a: PathBuf,

    /// Second CSV (rerun) - per-pass or aggregated
    #[arg(long)]
    b: PathBuf,
}

fn load(path: &PathBuf) -> Result<Table, Box<dyn Error>> {
    let text = read_to_string(path)
        .map_err(|e| std::io::Error::other(format!("failed to read {}: {e}", path.display())))?;
    Ok(parse_csv(&text).map_err(std::io::Error::other)?)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let a = load(&args.a)?;
    let b = load(&args.b)?;
    let report = diff_tables(&a, &b).map_err(std::io::Error::other)?;
    print!("{report}");
    Ok(())
}
