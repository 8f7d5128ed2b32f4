//! Command-line argument parsing.
//!
//! ```text
//! necrofarm-host <snapshot.json> <action.json> [--config <file>] [--out <file>]
//! ```

use std::path::PathBuf;

use necrofarm_core::config::DEFAULT_CONFIG_FILE;

use crate::error::HostError;

const USAGE: &str =
    "necrofarm-host <snapshot.json> <action.json> [--config <file>] [--out <file>]";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    /// Farm snapshot to read.
    pub snapshot: PathBuf,
    /// Action envelope to apply.
    pub action: PathBuf,
    /// Configuration file; defaults apply when it does not exist.
    pub config: PathBuf,
    /// Where to write the new snapshot. Stdout gets the full outcome either way.
    pub out: Option<PathBuf>,
}

impl CliArgs {
    /// Parse arguments, excluding the program name.
    pub fn parse<I>(args: I) -> Result<Self, HostError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut positional = Vec::new();
        let mut config = None;
        let mut out = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => config = Some(flag_value(&mut args, "--config")?),
                "--out" => out = Some(flag_value(&mut args, "--out")?),
                flag if flag.starts_with("--") => {
                    return Err(HostError::Usage(format!("unknown flag {flag}; {USAGE}")));
                }
                _ => positional.push(PathBuf::from(&arg)),
            }
        }

        let mut positional = positional.into_iter();
        let (Some(snapshot), Some(action), None) =
            (positional.next(), positional.next(), positional.next())
        else {
            return Err(HostError::Usage(String::from(USAGE)));
        };

        Ok(Self {
            snapshot,
            action,
            config: config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE)),
            out,
        })
    }
}

fn flag_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<PathBuf, HostError> {
    args.next()
        .map(PathBuf::from)
        .ok_or_else(|| HostError::Usage(format!("{flag} needs a value; {USAGE}")))
}
