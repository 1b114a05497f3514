//! Input/Output operations for Monte Carlo runs
//!
//! This module handles logging setup and writing run results.

mod output;

pub use output::{print_scan_table, setup_output, write_results};
