use anyhow::{Context, Result};
use std::path::PathBuf;

use scconvert::reader::ContainerReader;
use scconvert::schema::ColumnDescriptor;

/// Display information about a container without decoding its tables
pub fn run(file: PathBuf) -> Result<()> {
    let reader = ContainerReader::open(&file)
        .with_context(|| format!("Failed to open {}", file.display()))?;
    let manifest = reader.manifest();

    println!("scconvert Container Information");
    println!("===============================");
    println!("File: {}", file.display());
    println!();

    println!("Manifest:");
    println!("  Format version: {}", manifest.format_version);
    println!("  Dataset id: {}", manifest.dataset_id);
    println!("  Created: {}", manifest.created);
    println!("  Converter: {}", manifest.converter);
    println!();

    let cells = manifest.n_obs.saturating_mul(manifest.n_vars);
    let density = if cells == 0 {
        0.0
    } else {
        manifest.nnz as f64 / cells as f64
    };
    println!("Matrix:");
    println!("  Shape: {} observations x {} variables", manifest.n_obs, manifest.n_vars);
    println!("  Storage: {}", manifest.storage);
    println!("  Stored entries: {} ({:.2}% of cells)", manifest.nnz, density * 100.0);
    println!(
        "  Name: {}",
        manifest.matrix_name.as_deref().unwrap_or("<none>")
    );
    println!("  Variable index layout: {}", manifest.index_layout);
    println!();

    print_columns("Observation attributes", &manifest.obs_columns);
    print_columns("Variable attributes", &manifest.var_columns);

    println!("Entries:");
    for name in reader.entry_names() {
        println!("  {}", name);
    }
    Ok(())
}

fn print_columns(title: &str, columns: &[ColumnDescriptor]) {
    println!("{} ({}):", title, columns.len());
    for column in columns {
        match &column.categories {
            Some(categories) => println!(
                "  {} ({}, {} categories)",
                column.name,
                column.kind,
                categories.len()
            ),
            None => println!("  {} ({})", column.name, column.kind),
        }
    }
    println!();
}
