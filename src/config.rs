//! Configuration module
//!
//! Reads the rate table and logging settings from a TOML file
//! (~/.config/reading-charges/config.toml by default).
//!
//! ```toml
//! [logging]
//! level = "info"
//! format = "text"
//!
//! # no month: the same rate for the whole year
//! [[tariff.rates]]
//! year = 2017
//! rate = "0.2"
//!
//! [[tariff.rates]]
//! month = 1
//! year = 2018
//! rate = "0.25"
//!
//! [[tariff.thresholds]]
//! year = 2017
//! amount = "0.5"
//! ```

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::RateTable;
use crate::support::AppResult;

/// Environment variable overriding the config file location
pub const CONFIG_ENV_VAR: &str = "READING_CHARGES_CONFIG";

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub tariff: TariffConfig,
}

impl AppConfig {
    pub fn load(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> AppResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Build the rate table described by the `tariff` section.
    pub fn rate_table(&self) -> AppResult<RateTable> {
        self.tariff.to_rate_table()
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    pub level: String,
    /// "text" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// Rate and threshold entries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TariffConfig {
    pub rates: Vec<RateEntry>,
    pub thresholds: Vec<ThresholdEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateEntry {
    /// Omitted: applies to all twelve months of `year`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    pub year: i32,
    pub rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdEntry {
    pub year: i32,
    pub amount: Decimal,
}

impl TariffConfig {
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty() && self.thresholds.is_empty()
    }

    /// An empty section means the compiled-in table.
    pub fn to_rate_table(&self) -> AppResult<RateTable> {
        if self.is_empty() {
            return Ok(RateTable::default());
        }

        let builder = self
            .rates
            .iter()
            .fold(RateTable::builder(), |builder, entry| match entry.month {
                Some(month) => builder.rate(month, entry.year, entry.rate),
                None => builder.year_rate(entry.year, entry.rate),
            });
        let builder = self
            .thresholds
            .iter()
            .fold(builder, |builder, entry| builder.threshold(entry.year, entry.amount));

        Ok(builder.build()?)
    }
}

/// Default config file location
///
/// `$XDG_CONFIG_HOME/reading-charges/config.toml`, or `./config.toml` when no
/// config directory can be determined.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("reading-charges").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

/// Config path from the environment, falling back to [`default_config_path`].
pub fn resolve_config_path() -> PathBuf {
    std::env::var(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_config_path())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::support::{AppError, DomainError};

    const SAMPLE: &str = r#"
[logging]
level = "debug"
format = "json"

[[tariff.rates]]
year = 2017
rate = "0.2"

[[tariff.rates]]
month = 1
year = 2018
rate = "0.25"

[[tariff.thresholds]]
year = 2017
amount = "0.5"
"#;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.rate_table().unwrap(), RateTable::default());
    }

    #[test]
    fn parses_full_sample() {
        let cfg = AppConfig::from_toml(SAMPLE).unwrap();
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.logging.format, "json");
        assert_eq!(cfg.tariff.rates.len(), 2);
        assert_eq!(cfg.tariff.rates[0].month, None);

        let table = cfg.rate_table().unwrap();
        assert_eq!(table.base_rate(5, 2017).unwrap(), Decimal::new(2, 1));
        assert_eq!(table.base_rate(1, 2018).unwrap(), Decimal::new(25, 2));
        assert_eq!(table.tax_threshold(2017).unwrap(), Decimal::new(5, 1));
        assert!(table.tax_threshold(2018).is_err());
    }

    #[test]
    fn partial_logging_section_keeps_defaults() {
        let cfg = AppConfig::from_toml("[logging]\nlevel = \"warn\"\n").unwrap();
        assert_eq!(cfg.logging.level, "warn");
        assert_eq!(cfg.logging.format, "text");
    }

    #[test]
    fn duplicate_entries_fail_to_build() {
        let cfg = AppConfig::from_toml(
            r#"
[[tariff.rates]]
year = 2017
rate = "0.2"

[[tariff.rates]]
month = 3
year = 2017
rate = "0.3"
"#,
        )
        .unwrap();
        assert!(matches!(
            cfg.rate_table(),
            Err(AppError::Domain(DomainError::Validation(_)))
        ));
    }

    #[test]
    fn malformed_toml_is_an_infra_error() {
        let err = AppConfig::from_toml("[logging\nlevel = ").unwrap_err();
        assert!(matches!(err, AppError::Infra(_)));
    }

    #[test]
    fn serialized_config_reads_back() {
        let cfg = AppConfig::from_toml(SAMPLE).unwrap();
        let text = toml::to_string(&cfg).unwrap();
        assert_eq!(AppConfig::from_toml(&text).unwrap(), cfg);
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let cfg = AppConfig::load(file.path()).unwrap();
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().starts_with("I/O error"));
    }

    #[test]
    fn default_path_ends_with_file_name() {
        assert!(default_config_path().ends_with("config.toml"));
    }
}
