//! Command-line argument parsing for Monte Carlo runs

use clap::Parser;

/// Lattice Monte Carlo simulations with YAML configuration
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    pub config_file: String,

    /// Override output file: (default stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Write the run results as YAML to this file
    #[arg(short, long)]
    pub results: Option<String>,

    /// Override random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override Ising lattice side length
    #[arg(long)]
    pub size: Option<usize>,

    /// Override number of warm-up sweeps
    #[arg(long)]
    pub warmup_sweeps: Option<usize>,

    /// Override number of measurement sweeps
    #[arg(long)]
    pub measurement_sweeps: Option<usize>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}
