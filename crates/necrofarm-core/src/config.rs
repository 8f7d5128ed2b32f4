//! Configuration loading for the Necrofarm engine.
//!
//! The canonical configuration lives in `necrofarm-config.yaml`. Every
//! section and every key is optional; anything left out falls back to the
//! engine defaults, so an empty file is a valid configuration.
//!
//! ```yaml
//! lifecycle:
//!   care:
//!     feed_happiness: 25
//!     max_catch_up_days: 5
//!   tiers:
//!     gold:
//!       daily_rate: "0.02"
//!       floor: "35"
//! logging:
//!   level: debug
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use necrofarm_lifecycle::{InvalidConfig, LifecycleConfig};

/// Default configuration file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "necrofarm-config.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// Parsed, but a value is outside the range the engine accepts.
    #[error("invalid configuration: {source}")]
    Invalid {
        /// The failed range check.
        #[from]
        source: InvalidConfig,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
///
/// Mirrors the structure of `necrofarm-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FarmConfig {
    /// Engine tunables: growth profiles, decay tiers, care, raising.
    #[serde(default)]
    pub lifecycle: LifecycleConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl FarmConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// An empty document yields the defaults. The lifecycle section is
    /// range-checked before it is returned.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        config.lifecycle.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise use the defaults.
    ///
    /// A file that exists but cannot be read or parsed is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let config = Self::from_file(path)?;
        info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    String::from("info")
}

#[cfg(test)]
mod tests {
    use necrofarm_types::{QualityTier, Resource};

    use super::*;

    #[test]
    fn default_config_matches_engine_defaults() {
        let config = FarmConfig::default();
        assert_eq!(config.lifecycle, LifecycleConfig::default());
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
    }

    #[test]
    fn empty_yaml_is_default() {
        let config = FarmConfig::parse("");
        assert!(config.is_ok_and(|c| c == FarmConfig::default()));
    }

    #[test]
    fn parse_partial_yaml() {
        let yaml = r#"
lifecycle:
  care:
    feed_happiness: 25
    feed_resource: RottenFlesh
    max_catch_up_days: 5
  tiers:
    gold:
      daily_rate: "0.02"
      floor: "35"
logging:
  level: debug
"#;
        let config = FarmConfig::parse(yaml);
        assert!(config.is_ok(), "parse failed: {config:?}");
        let config = config.unwrap_or_default();
        assert_eq!(config.lifecycle.care.feed_happiness, 25);
        assert_eq!(config.lifecycle.care.feed_resource, Resource::RottenFlesh);
        assert_eq!(config.lifecycle.care.max_catch_up_days, 5);
        assert_eq!(config.lifecycle.care.pet_happiness, 5);
        assert_eq!(
            config.lifecycle.tiers.get(QualityTier::Gold).daily_rate.to_string(),
            "0.02"
        );
        assert_eq!(
            config.lifecycle.tiers.get(QualityTier::Common),
            LifecycleConfig::default().tiers.get(QualityTier::Common)
        );
        assert_eq!(config.lifecycle.profiles.len(), 4);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let config = FarmConfig::parse("lifecycle: [not, a, map]");
        assert!(matches!(config, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn out_of_range_value_is_rejected() {
        let yaml = r#"
lifecycle:
  care:
    shelter_reduction: "1.5"
"#;
        let config = FarmConfig::parse(yaml);
        assert!(
            matches!(
                &config,
                Err(ConfigError::Invalid { source }) if source.field == "shelter_reduction"
            ),
            "unexpected result: {config:?}"
        );
    }

    #[test]
    fn out_of_range_tier_rate_is_rejected() {
        let yaml = r#"
lifecycle:
  tiers:
    silver:
      daily_rate: "1.2"
      floor: "30"
"#;
        assert!(matches!(
            FarmConfig::parse(yaml),
            Err(ConfigError::Invalid { source }) if source.section == "silver"
        ));
    }

    #[test]
    fn shipped_config_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../necrofarm-config.yaml");
        let config = FarmConfig::from_file(&path);
        assert!(config.is_ok(), "load failed: {config:?}");
        assert_eq!(config.unwrap_or_default(), FarmConfig::default());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = Path::new("definitely-not-a-real-necrofarm-config.yaml");
        let config = FarmConfig::load_or_default(path);
        assert!(config.is_ok_and(|c| c == FarmConfig::default()));
    }

    #[test]
    fn missing_file_is_an_error_when_required() {
        let path = Path::new("definitely-not-a-real-necrofarm-config.yaml");
        assert!(matches!(
            FarmConfig::from_file(path),
            Err(ConfigError::Io { .. })
        ));
    }
}
