use anyhow::{Context, Result};
use log::info;
use std::str::FromStr;

use scconvert::convert::ConversionSteps;
use scconvert::reader::import;
use scconvert::writer::export_with_config;

use super::config::{Config, ConversionConfig};
use super::{ConvertArgs, Profile};

/// Import a container, apply the selected steps, export the result
pub fn run(args: ConvertArgs) -> Result<()> {
    let file_config = match &args.config {
        Some(path) => Config::from_file(path)?.conversion,
        None => ConversionConfig::default(),
    };

    let profile = match (args.profile, &file_config.profile) {
        (Some(arg), _) => Profile::from(arg),
        (None, Some(name)) => Profile::from_str(name).map_err(anyhow::Error::msg)?,
        (None, None) => Profile::default(),
    };
    let writer_config = profile.writer_config_with(
        args.compression_level.or(file_config.compression_level),
        args.row_group_size.or(file_config.row_group_size),
    );

    let steps = ConversionSteps {
        normalize_obs_names: args.normalize_obs_names
            || file_config.normalize_obs_names.unwrap_or(false),
        fix_feature_ids: args.fix_feature_ids || file_config.fix_feature_ids.unwrap_or(false),
        matrix_name: args.rename_matrix.or(file_config.matrix_name),
        storage: args.storage.or(file_config.storage),
    };

    info!("Reading {}", args.input.display());
    let dataset = import(&args.input)
        .with_context(|| format!("Failed to import {}", args.input.display()))?;

    if steps.is_empty() {
        info!("No conversion steps selected; re-encoding with profile {}", profile);
    }
    let dataset = steps.apply(dataset).context("Conversion step failed")?;

    let stats = export_with_config(&dataset, &args.output, &writer_config)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("{}", stats);
    Ok(())
}
