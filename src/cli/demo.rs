use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use scconvert::dataset::{AnnotatedDataset, AttributeValues};
use scconvert::matrix::{MatrixData, SparseMatrix};
use scconvert::writer::export_with_config;

use super::Profile;

/// Fraction of non-zero cells in the synthetic count matrix
const DENSITY: f64 = 0.06;

/// Generate a synthetic single-cell container
pub fn run(output: PathBuf, n_obs: usize, n_vars: usize, dense: bool, profile: Profile) -> Result<()> {
    info!("scconvert demo: {} cells x {} genes", n_obs, n_vars);

    let dataset = generate_demo_dataset(n_obs, n_vars).context("Failed to build demo dataset")?;
    let dataset = if dense {
        dataset.coerce_matrix_dense()
    } else {
        dataset
    };

    let config = profile.writer_config();
    info!("Writing {} with profile {}", output.display(), profile);
    let stats = export_with_config(&dataset, &output, &config)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("{}", stats);
    println!(
        "  Matrix table: {} bytes, container: {} bytes ({:.2} MB)",
        stats.matrix_bytes,
        stats.file_size_bytes,
        stats.file_size_bytes as f64 / 1024.0 / 1024.0
    );
    Ok(())
}

/// Deterministic sparse counts with a few typical annotations.
///
/// Observation attributes use raw, unnormalized names (`Source.Name`,
/// `Cell Type`) the way they usually arrive from sample sheets.
fn generate_demo_dataset(n_obs: usize, n_vars: usize) -> Result<AnnotatedDataset> {
    let mut rng = SplitMix64::new(0x5eed_cafe);

    let mut triplets = Vec::new();
    for row in 0..n_obs {
        for col in 0..n_vars {
            if rng.next_f64() < DENSITY {
                let count = 1 + (rng.next_u64() % 20) as u32;
                triplets.push((row, col, f64::from(count)));
            }
        }
    }
    let matrix = SparseMatrix::from_triplets(n_obs, n_vars, triplets)?;
    let totals: Vec<f64> = (0..n_obs)
        .map(|row| matrix.row(row).1.iter().sum())
        .collect();
    let n_genes: Vec<i64> = (0..n_obs).map(|row| matrix.row(row).0.len() as i64).collect();
    let detected: Vec<usize> = {
        let mut counts = vec![0usize; n_vars];
        for (_, col, _) in matrix.iter() {
            counts[col] += 1;
        }
        counts
    };

    let obs_names = (0..n_obs).map(|i| format!("CELL{:06}-1", i)).collect();
    let var_names = (0..n_vars).map(|j| format!("GENE{:05}", j)).collect();
    let mut dataset = AnnotatedDataset::new(MatrixData::Sparse(matrix), obs_names, var_names)?;

    let samples: Vec<String> = (0..n_obs).map(|i| format!("sample{}", i % 4 + 1)).collect();
    dataset.add_obs("Source.Name", AttributeValues::Strings(samples))?;
    dataset.add_obs("total_counts", AttributeValues::Floats(totals))?;
    dataset.add_obs("n_genes", AttributeValues::Integers(n_genes))?;
    let cell_types: Vec<&str> = (0..n_obs)
        .map(|i| ["T cell", "B cell", "NK cell", "Monocyte"][(i * 7) % 4])
        .collect();
    dataset.add_obs(
        "Cell Type",
        AttributeValues::categorical_from_labels(cell_types),
    )?;

    let highly_variable: Vec<bool> = detected.iter().map(|&d| d * 10 > n_obs).collect();
    dataset.add_var("highly_variable", AttributeValues::Booleans(highly_variable))?;
    dataset.add_var(
        "n_cells",
        AttributeValues::Integers(detected.iter().map(|&d| d as i64).collect()),
    )?;

    Ok(dataset.rename_matrix("counts")?)
}

/// SplitMix64: small, deterministic, good enough for demo data
struct SplitMix64(u64);

impl SplitMix64 {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_dataset_is_deterministic() {
        let a = generate_demo_dataset(12, 40).unwrap();
        let b = generate_demo_dataset(12, 40).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.shape(), (12, 40));
        assert_eq!(a.matrix_name(), Some("counts"));
        assert!(a.obs().contains_key("Source.Name"));
    }
}
