//! # scconvert
//!
//! Command-line front-end for the single-cell dataset converter.
//!
//! ## Usage
//!
//! ```bash
//! # Generate a synthetic container
//! scconvert demo demo.scmat --n-obs 192 --n-vars 2000
//!
//! # Inspect and validate it
//! scconvert info demo.scmat
//! scconvert validate demo.scmat
//!
//! # Normalize attribute names, fix identifier placement, store sparsely
//! scconvert convert in.scmat out.scmat --normalize-obs-names --fix-feature-ids --storage sparse
//!
//! # Join a sample sheet onto the observations
//! scconvert annotate in.scmat samples.tsv out.scmat --key barcode
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
