//! Process bootstrap shared by binaries: logging and configuration loading.

use std::path::Path;

use tracing::{error, info};

use crate::config::AppConfig;
use crate::support::AppError;

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup. `RUST_LOG` takes precedence over the
/// configured level.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Load the config at `path`, falling back to defaults on any error.
///
/// `level_override` replaces the configured log level in either case. The
/// load error, if any, is handed back for the caller to report once logging
/// is up.
pub fn resolve_config(
    path: &Path,
    level_override: Option<&str>,
) -> (AppConfig, Option<AppError>) {
    let (mut cfg, load_error) = match AppConfig::load(path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    if let Some(level) = level_override {
        cfg.logging.level = level.to_string();
    }
    (cfg, load_error)
}

/// Load the config at `path` and install logging.
///
/// A missing or invalid file is logged and replaced by defaults, so the
/// compiled-in rate table still applies.
pub fn load_config_or_default(path: &Path, level_override: Option<&str>) -> AppConfig {
    let (cfg, load_error) = resolve_config(path, level_override);
    init_tracing(&cfg);

    match load_error {
        None => info!("Configuration loaded from {}", path.display()),
        Some(e) => {
            error!("Failed to load config from {}: {}", path.display(), e);
            info!("Using default configuration.");
        }
    }
    cfg
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::domain::RateTable;

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (cfg, err) = resolve_config(&dir.path().join("absent.toml"), None);

        assert_eq!(cfg, AppConfig::default());
        assert!(matches!(err, Some(AppError::Infra(_))));
        assert_eq!(cfg.rate_table().unwrap(), RateTable::default());
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let file = config_file("[logging\nlevel = ");
        let (cfg, err) = resolve_config(file.path(), None);

        assert_eq!(cfg, AppConfig::default());
        assert!(err.is_some());
    }

    #[test]
    fn valid_file_is_used() {
        let file = config_file("[logging]\nlevel = \"debug\"\nformat = \"json\"\n");
        let (cfg, err) = resolve_config(file.path(), None);

        assert!(err.is_none());
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.logging.format, "json");
    }

    #[test]
    fn level_override_applies_to_loaded_config() {
        let file = config_file("[logging]\nlevel = \"debug\"\n");
        let (cfg, _) = resolve_config(file.path(), Some("warn"));
        assert_eq!(cfg.logging.level, "warn");
    }

    #[test]
    fn level_override_applies_to_fallback_config() {
        let dir = tempfile::tempdir().unwrap();
        let (cfg, err) = resolve_config(&dir.path().join("absent.toml"), Some("trace"));

        assert!(err.is_some());
        assert_eq!(cfg.logging.level, "trace");
        assert_eq!(cfg.logging.format, "text");
    }
}
