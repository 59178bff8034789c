//! Configuration schema types for the CHORUS frame cache.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod cache;
mod resolver;
mod system;

pub use cache::*;
pub use resolver::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Root configuration.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
#[derive(Default)]
pub struct ChorusConfig {
    pub cache: CacheConfig,
    pub resolver: ResolverConfig,
    pub webapps: Vec<WebAppConfig>,
    pub readiness: ReadinessConfig,
    pub logging: LoggingConfig,
}
