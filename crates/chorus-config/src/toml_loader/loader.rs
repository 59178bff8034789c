//! Reading a config file, or the platform default one.

use crate::schema::ChorusConfig;
use chorus_common::ConfigError;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

use super::paths::{create_default_config, default_config_path};

/// Parse the TOML file at `path`. Missing keys and sections take defaults.
///
/// No validation happens here; [`crate::load_config_from`] and the reload
/// manager validate the parsed config.
pub fn load_from_path(path: &Path) -> Result<ChorusConfig, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ConfigError::FileNotFound(path.to_path_buf()))
        }
        Err(e) => {
            return Err(ConfigError::ParseError(format!(
                "cannot read {}: {e}",
                path.display()
            )))
        }
    };

    let config: ChorusConfig = toml::from_str(&content).map_err(|e| {
        ConfigError::ParseError(format!("invalid TOML in {}: {e}", path.display()))
    })?;

    debug!(path = %path.display(), "config parsed");
    Ok(config)
}

/// Load `<config_dir>/chorus/config.toml`, writing the commented default
/// template there first if the file does not exist yet.
pub fn load_default() -> Result<ChorusConfig, ConfigError> {
    let path = default_config_path()?;
    match load_from_path(&path) {
        Err(ConfigError::FileNotFound(_)) => {
            create_default_config(&path)?;
            info!(path = %path.display(), "wrote default config");
            Ok(ChorusConfig::default())
        }
        other => other,
    }
}
