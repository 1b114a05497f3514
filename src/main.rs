//! Lattice Monte Carlo Command-Line Interface
//!
//! Runs the Ising temperature scan and random-walk experiments described by
//! a YAML configuration.

use color_eyre::eyre::Result;
use monte_carlo::app::MonteCarloApplication;

fn main() -> Result<()> {
    color_eyre::install()?;
    MonteCarloApplication::from_cli()?.run()
}
