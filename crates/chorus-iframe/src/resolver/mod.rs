//! Frame metadata resolution.
//!
//! The cache never builds URLs itself; it asks an [`IframeResolver`] for the
//! display name and address of a session or webapp the first time it is
//! opened.

mod config_resolver;

use async_trait::async_trait;
use chorus_common::IframeId;

pub use config_resolver::ConfigResolver;

/// Display name and loadable address of a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFrame {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("invalid: {0}")]
    Invalid(String),
}

#[async_trait]
pub trait IframeResolver: Send + Sync {
    async fn resolve_session(
        &self,
        session_id: &IframeId,
        workspace_id: &str,
    ) -> Result<ResolvedFrame, ResolveError>;

    async fn resolve_webapp(&self, webapp_id: &IframeId) -> Result<ResolvedFrame, ResolveError>;
}
