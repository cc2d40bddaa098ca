use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use scconvert::matrix::StorageKind;

mod annotate;
mod config;
mod convert;
mod demo;
mod info;
mod profile;
mod validate;

pub use profile::Profile;

/// scconvert - Single-cell dataset converter
#[derive(Parser)]
#[command(name = "scconvert")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Conversion profile for optimizing speed vs compression.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum ProfileArg {
    /// Prioritize speed over compression
    Fast,
    /// Balance between speed and compression
    #[default]
    Balanced,
    /// Maximum compression, slower conversion
    MaxCompression,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Fast => Profile::Fast,
            ProfileArg::Balanced => Profile::Balanced,
            ProfileArg::MaxCompression => Profile::MaxCompression,
        }
    }
}

/// Options for the convert command
#[derive(clap::Args, Debug)]
pub struct ConvertArgs {
    /// Input container
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output container
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Normalize observation attribute names (trim, lowercase, ' ' and '.' to '_')
    #[arg(long)]
    normalize_obs_names: bool,

    /// Move variable identifiers stored as a 'rownames' attribute back into place
    #[arg(long)]
    fix_feature_ids: bool,

    /// Set the matrix tag
    #[arg(long, value_name = "NAME")]
    rename_matrix: Option<String>,

    /// Target matrix storage (dense or sparse)
    #[arg(long, value_name = "KIND")]
    storage: Option<StorageKind>,

    /// Conversion profile (defaults to the config file's, then balanced)
    #[arg(short = 'p', long, value_enum)]
    profile: Option<ProfileArg>,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    // === Advanced tuning flags (hidden from --help) ===
    /// Compression level for ZSTD (1-22, default: profile-dependent)
    #[arg(short = 'c', long, hide = true)]
    compression_level: Option<i32>,

    /// Row group size (number of matrix entries per row group)
    #[arg(short = 'r', long, hide = true)]
    row_group_size: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a synthetic dataset for testing
    Demo {
        /// Output container path
        #[arg(value_name = "OUTPUT", default_value = "demo.scmat")]
        output: PathBuf,

        /// Number of observations (cells)
        #[arg(long, default_value_t = 192)]
        n_obs: usize,

        /// Number of variables (genes)
        #[arg(long, default_value_t = 2000)]
        n_vars: usize,

        /// Store the matrix densely
        #[arg(long)]
        dense: bool,

        /// Conversion profile (fast, balanced, max-compression)
        #[arg(short = 'p', long, default_value = "balanced", value_enum)]
        profile: ProfileArg,
    },

    /// Display information about a container
    Info {
        /// Input container path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Validate container integrity
    Validate {
        /// Input container path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Import a container, apply the selected steps and export the result
    Convert(ConvertArgs),

    /// Join a sample sheet onto the observation attributes
    Annotate {
        /// Input container path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Sample sheet (TSV, or CSV by extension)
        #[arg(value_name = "SHEET")]
        sheet: PathBuf,

        /// Output container path
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Sample sheet column holding observation identifiers
        #[arg(short, long, value_name = "COLUMN")]
        key: String,

        /// Fill observations without a sheet row with empty values
        #[arg(long)]
        allow_missing: bool,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Demo {
            output,
            n_obs,
            n_vars,
            dense,
            profile,
        } => demo::run(output, n_obs, n_vars, dense, Profile::from(profile)),
        Commands::Info { file } => info::run(file),
        Commands::Validate { file } => validate::run(file),
        Commands::Convert(args) => convert::run(args),
        Commands::Annotate {
            input,
            sheet,
            output,
            key,
            allow_missing,
        } => annotate::run(input, sheet, output, key, allow_missing),
    }
}
