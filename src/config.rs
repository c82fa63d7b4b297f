use std::fs;
use std::path::{Path, PathBuf};

use crate::format::DEFAULT_CURRENCY;

/// The dataset that's loaded when neither the command line nor a config file
/// name one
pub const DEFAULT_DATASET: &str = "tranaction_count_amount(2024OCT).csv";

/// The terminal width text output is fitted into by default
pub const DEFAULT_WIDTH: usize = 80;

/// Possible errors to occur while loading the configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

/// Settings read from a TOML config file
///
/// Every field is optional; unset fields fall back to the command line or to
/// the built in defaults.
#[derive(Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub dataset: Option<PathBuf>,
    pub currency: Option<String>,
    pub width: Option<usize>,
}

impl ConfigFile {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        log::info!("Loaded config from {:?}", path);
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// The settings the dashboard runs with
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub dataset: PathBuf,
    pub currency: String,
    pub width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from(DEFAULT_DATASET),
            currency: DEFAULT_CURRENCY.to_string(),
            width: DEFAULT_WIDTH,
        }
    }
}

impl Config {
    /// Resolves the settings, preferring `overrides` (usually the command line)
    /// over the config file, and the config file over the defaults
    pub fn resolve(file: ConfigFile, overrides: ConfigFile) -> Self {
        let defaults = Self::default();
        Self {
            dataset: overrides.dataset.or(file.dataset).unwrap_or(defaults.dataset),
            currency: overrides.currency.or(file.currency).unwrap_or(defaults.currency),
            width: overrides.width.or(file.width).unwrap_or(defaults.width),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::resolve(ConfigFile::default(), ConfigFile::default());

        assert_eq!(config.dataset, PathBuf::from("tranaction_count_amount(2024OCT).csv"));
        assert_eq!(config.currency, "MMK");
        assert_eq!(config.width, 80);
    }

    #[test]
    fn file_values_override_defaults() {
        let file = ConfigFile::from_toml(
            r#"
            dataset = "data/2024-11.csv"
            currency = "USD"
            "#,
        )
        .unwrap();
        let config = Config::resolve(file, ConfigFile::default());

        assert_eq!(config.dataset, PathBuf::from("data/2024-11.csv"));
        assert_eq!(config.currency, "USD");
        assert_eq!(config.width, DEFAULT_WIDTH);
    }

    #[test]
    fn overrides_win_over_file_values() {
        let file = ConfigFile::from_toml("currency = \"USD\"\nwidth = 120").unwrap();
        let overrides = ConfigFile {
            width: Some(60),
            ..ConfigFile::default()
        };
        let config = Config::resolve(file, overrides);

        assert_eq!(config.currency, "USD");
        assert_eq!(config.width, 60);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            ConfigFile::from_toml("colour = \"blue\""),
            Err(ConfigError::Toml(_)),
        ));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            ConfigFile::load_from_file("does/not/exist.toml"),
            Err(ConfigError::Io { .. }),
        ));
    }
}
