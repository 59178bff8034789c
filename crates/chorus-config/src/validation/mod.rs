//! Full configuration validation.
//!
//! Each section has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod cache;
mod helpers;
mod resolver;
mod system;


use crate::schema::ChorusConfig;
use chorus_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &ChorusConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    cache::validate_cache(&mut errors, config);
    resolver::validate_resolver(&mut errors, config);
    resolver::validate_webapps(&mut errors, config);
    system::validate_readiness(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
