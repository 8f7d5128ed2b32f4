//! Command-line host for the Necrofarm lifecycle engine.
//!
//! Reads a farm snapshot and an action envelope from JSON files, applies
//! the action, and prints the outcome (new snapshot, events, activity
//! counters) as JSON on stdout. With `--out` the new snapshot is also
//! written to a file, so the host can be chained:
//!
//! ```text
//! snapshot.json + action.json --> dispatch --> stdout (outcome)
//!                                          \-> --out (snapshot)
//! ```
//!
//! A rejected action exits non-zero and leaves every file untouched.

mod cli;
mod error;

use std::path::Path;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use necrofarm_core::{CountingSink, FarmConfig, LoggingConfig, apply_json};
use necrofarm_types::FarmSnapshot;

use crate::cli::CliArgs;
use crate::error::HostError;

/// Application entry point.
///
/// Loads configuration, initializes logging, applies one action, and
/// writes the outcome.
///
/// # Errors
///
/// Returns an error if arguments are invalid, a file cannot be read or
/// written, or the engine rejects the action.
fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse(std::env::args().skip(1))?;
    let config = FarmConfig::load_or_default(&args.config)
        .map_err(HostError::from)
        .with_context(|| format!("loading {}", args.config.display()))?;

    init_logging(&config.logging);
    info!(
        config = %args.config.display(),
        snapshot = %args.snapshot.display(),
        action = %args.action.display(),
        "necrofarm-host starting"
    );

    run(&args, &config).with_context(|| format!("applying {}", args.action.display()))
}

/// Apply the action file to the snapshot file and emit the outcome.
fn run(args: &CliArgs, config: &FarmConfig) -> Result<(), HostError> {
    let snapshot: FarmSnapshot = serde_json::from_str(&read(&args.snapshot)?)?;
    let envelope = read(&args.action)?;

    let sink = CountingSink::new();
    let outcome = apply_json(&snapshot, &envelope, &config.lifecycle, &sink)?;

    if let Some(out) = &args.out {
        write(out, &serde_json::to_string_pretty(&outcome.snapshot)?)?;
        info!(path = %out.display(), "snapshot written");
    }
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    info!(
        events = outcome.events.len(),
        counters = ?sink.totals(),
        "action complete"
    );
    Ok(())
}

/// Initialize structured logging. `RUST_LOG` takes precedence over the
/// configured level.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn read(path: &Path) -> Result<String, HostError> {
    std::fs::read_to_string(path).map_err(|source| HostError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, contents: &str) -> Result<(), HostError> {
    std::fs::write(path, contents).map_err(|source| HostError::Io {
        path: path.to_path_buf(),
        source,
    })
}
