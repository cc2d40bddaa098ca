use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use scconvert::metadata::{annotate_observations, SampleSheet};
use scconvert::reader::import;
use scconvert::writer::export;

/// Join a sample sheet onto the observation attributes of a container
pub fn run(
    input: PathBuf,
    sheet: PathBuf,
    output: PathBuf,
    key: String,
    allow_missing: bool,
) -> Result<()> {
    let dataset = import(&input).with_context(|| format!("Failed to import {}", input.display()))?;
    let sample_sheet = SampleSheet::from_path(&sheet)
        .with_context(|| format!("Failed to read sample sheet {}", sheet.display()))?;
    info!(
        "Sample sheet has {} rows and columns {:?}",
        sample_sheet.len(),
        sample_sheet.headers()
    );

    let dataset = annotate_observations(dataset, &sample_sheet, &key, allow_missing)
        .context("Failed to join sample sheet")?;

    let stats = export(&dataset, &output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("{}", stats);
    Ok(())
}
