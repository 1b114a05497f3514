//! Output formatting and logging utilities

use crate::ising::Thermodynamics;
use color_eyre::eyre::{Result, WrapErr};
use serde::Serialize;
use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::time::SystemTime as StdSystemTime;
use tracing::info;
use tracing_subscriber::{
    filter::LevelFilter, fmt::format::Writer, fmt::layer, fmt::time::FormatTime,
    layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry,
};

/// Custom time formatter that shows only seconds
struct SecondPrecisionTimer;

impl FormatTime for SecondPrecisionTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        let now = StdSystemTime::now();
        let duration = now
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default();

        // Format as HH:MM:SS (only seconds precision)
        let total_seconds = duration.as_secs();
        let hours = (total_seconds / 3600) % 24;
        let minutes = (total_seconds / 60) % 60;
        let seconds = total_seconds % 60;

        write!(w, "{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

/// Setup output logging to file or stdout.
///
/// Logs at INFO level, or DEBUG when `verbose` is set.
pub fn setup_output(output_path: Option<&str>, verbose: bool) -> Result<()> {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    match output_path {
        Some(path) => {
            let log = File::create(path)
                .wrap_err_with(|| format!("Could not create output file: {}", path))?;
            let file_layer = layer()
                .with_writer(log)
                .with_timer(SecondPrecisionTimer)
                .with_ansi(false)
                .with_filter(level);
            Registry::default()
                .with(file_layer)
                .try_init()
                .wrap_err("Failed to install log subscriber")?;
            info!("Output will be written to: {}", path);
        }
        None => {
            let stdout_layer = layer()
                .with_writer(std::io::stdout)
                .with_timer(SecondPrecisionTimer)
                .with_ansi(true)
                .with_filter(level);
            Registry::default()
                .with(stdout_layer)
                .try_init()
                .wrap_err("Failed to install log subscriber")?;
            info!("Output will be printed to stdout");
        }
    }

    Ok(())
}

/// Serialize `results` as YAML into `path`
pub fn write_results<T: Serialize, P: AsRef<Path>>(path: P, results: &T) -> Result<()> {
    let path = path.as_ref();
    let content = serde_yml::to_string(results).wrap_err("Failed to serialize results")?;
    fs::write(path, content)
        .wrap_err_with(|| format!("Unable to write results file: {}", path.display()))?;
    info!("Results written to: {}", path.display());
    Ok(())
}

/// Print a temperature scan as a table
pub fn print_scan_table<W: Write>(writer: &mut W, rows: &[Thermodynamics]) -> Result<()> {
    writeln!(
        writer,
        "{:>8} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "T", "E/N", "|M|/N", "C", "chi", "U_L"
    )?;
    writeln!(writer, "{}", "-".repeat(63))?;
    for row in rows {
        writeln!(
            writer,
            "{:>8.4} {:>10.5} {:>10.5} {:>10.5} {:>10.5} {:>10.5}",
            row.temperature,
            row.energy,
            row.abs_magnetization,
            row.specific_heat,
            row.susceptibility,
            row.binder_cumulant
        )?;
    }
    Ok(())
}
