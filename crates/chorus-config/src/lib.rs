//! CHORUS frame cache configuration.
//!
//! Provides TOML-based configuration with live reload and full validation.
//! All config sections use sensible defaults so partial configs work out of
//! the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use chorus_config::load_config;
//!
//! let config = load_config().expect("failed to load config");
//! println!("cache capacity: {}", config.cache.capacity);
//! ```

pub mod reload;
pub mod schema;
pub mod toml_loader;
pub mod validation;
pub mod watcher;

pub use reload::ReloadManager;
pub use schema::{
    CacheConfig, ChorusConfig, LogLevel, LoggingConfig, OverflowPolicy, ReadinessConfig,
    ResolverConfig, WebAppConfig,
};
pub use watcher::ConfigWatcher;

use chorus_common::ConfigError;
use std::path::Path;

/// Load and validate config from the platform default path, creating a
/// default file if none exists.
pub fn load_config() -> Result<ChorusConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load and validate config from an explicit path.
pub fn load_config_from(path: &Path) -> Result<ChorusConfig, ConfigError> {
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_config_from_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[cache]\ncapacity = 0\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn load_config_from_accepts_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[readiness]\ntimeout_secs = 30\n").unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.readiness.timeout_secs, 30);
        assert_eq!(config.cache, CacheConfig::default());
    }
}
