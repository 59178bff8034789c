use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use chorus_common::IframeId;
use chorus_config::{ChorusConfig, WebAppConfig};
use tracing::debug;

use super::{IframeResolver, ResolveError, ResolvedFrame};

struct Tables {
    session_url_template: String,
    session_name_template: String,
    webapps: HashMap<String, WebAppConfig>,
}

impl Tables {
    fn from_config(config: &ChorusConfig) -> Self {
        Self {
            session_url_template: config.resolver.session_url_template.clone(),
            session_name_template: config.resolver.session_name_template.clone(),
            webapps: config
                .webapps
                .iter()
                .map(|app| (app.id.clone(), app.clone()))
                .collect(),
        }
    }
}

/// Resolves sessions from URL/name templates and webapps from the configured
/// `[[webapps]]` table. The tables can be swapped on config reload.
pub struct ConfigResolver {
    tables: RwLock<Tables>,
}

impl ConfigResolver {
    pub fn from_config(config: &ChorusConfig) -> Self {
        Self {
            tables: RwLock::new(Tables::from_config(config)),
        }
    }

    /// Replace templates and webapps. Frames already cached keep their URL.
    pub fn reload(&self, config: &ChorusConfig) {
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        *tables = Tables::from_config(config);
        debug!(webapps = tables.webapps.len(), "resolver tables reloaded");
    }

    pub fn webapp_ids(&self) -> Vec<String> {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        let mut ids: Vec<String> = tables.webapps.keys().cloned().collect();
        ids.sort();
        ids
    }
}

fn fill(template: &str, workspace_id: &str, session_id: &str) -> String {
    template
        .replace("{workspace}", workspace_id)
        .replace("{session}", session_id)
}

/// Ids are substituted into URLs, so anything that could break out of a path
/// segment is refused.
fn check_segment(what: &str, value: &str) -> Result<(), ResolveError> {
    if value.trim().is_empty() {
        return Err(ResolveError::Invalid(format!("{what} is empty")));
    }
    if value.contains(['/', '?', '#']) || value.chars().any(char::is_whitespace) {
        return Err(ResolveError::Invalid(format!(
            "{what} {value:?} is not a valid path segment"
        )));
    }
    Ok(())
}

#[async_trait]
impl IframeResolver for ConfigResolver {
    async fn resolve_session(
        &self,
        session_id: &IframeId,
        workspace_id: &str,
    ) -> Result<ResolvedFrame, ResolveError> {
        check_segment("session id", session_id.as_str())?;
        check_segment("workspace id", workspace_id)?;

        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        Ok(ResolvedFrame {
            name: fill(&tables.session_name_template, workspace_id, session_id.as_str()),
            url: fill(&tables.session_url_template, workspace_id, session_id.as_str()),
        })
    }

    async fn resolve_webapp(&self, webapp_id: &IframeId) -> Result<ResolvedFrame, ResolveError> {
        check_segment("webapp id", webapp_id.as_str())?;

        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        let app = tables
            .webapps
            .get(webapp_id.as_str())
            .ok_or_else(|| ResolveError::NotFound(format!("webapp {webapp_id}")))?;
        Ok(ResolvedFrame {
            name: app.name.clone(),
            url: app.url.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ChorusConfig {
        let mut config = ChorusConfig::default();
        config.resolver.session_url_template =
            "https://chorus.example.org/ws/{workspace}/s/{session}".into();
        config.resolver.session_name_template = "{workspace}/{session}".into();
        config.webapps = vec![WebAppConfig {
            id: "jupyter".into(),
            name: "JupyterLab".into(),
            url: "https://jupyter.example.org/lab".into(),
        }];
        config
    }

    #[tokio::test]
    async fn session_url_fills_template() {
        let resolver = ConfigResolver::from_config(&config());
        let frame = resolver
            .resolve_session(&IframeId::from("42"), "ws-1")
            .await
            .unwrap();
        assert_eq!(frame.url, "https://chorus.example.org/ws/ws-1/s/42");
        assert_eq!(frame.name, "ws-1/42");
    }

    #[tokio::test]
    async fn session_with_empty_workspace_is_invalid() {
        let resolver = ConfigResolver::from_config(&config());
        let err = resolver
            .resolve_session(&IframeId::from("42"), "")
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::Invalid(_)));
    }

    #[tokio::test]
    async fn session_id_with_slash_is_invalid() {
        let resolver = ConfigResolver::from_config(&config());
        let err = resolver
            .resolve_session(&IframeId::from("../admin"), "ws-1")
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::Invalid(_)));
    }

    #[tokio::test]
    async fn known_webapp_resolves() {
        let resolver = ConfigResolver::from_config(&config());
        let frame = resolver
            .resolve_webapp(&IframeId::from("jupyter"))
            .await
            .unwrap();
        assert_eq!(frame.name, "JupyterLab");
        assert_eq!(frame.url, "https://jupyter.example.org/lab");
    }

    #[tokio::test]
    async fn unknown_webapp_is_not_found() {
        let resolver = ConfigResolver::from_config(&config());
        let err = resolver
            .resolve_webapp(&IframeId::from("rstudio"))
            .await
            .unwrap_err();
        assert_eq!(err, ResolveError::NotFound("webapp rstudio".into()));
    }

    #[tokio::test]
    async fn reload_swaps_webapp_table() {
        let resolver = ConfigResolver::from_config(&config());
        let mut next = config();
        next.webapps[0].id = "rstudio".into();
        resolver.reload(&next);

        assert_eq!(resolver.webapp_ids(), vec!["rstudio".to_string()]);
        assert!(resolver
            .resolve_webapp(&IframeId::from("jupyter"))
            .await
            .is_err());
    }
}
