//! Session and webapp resolution settings.

use serde::{Deserialize, Serialize};

/// How session ids are turned into a frame URL and display name.
///
/// `{workspace}` and `{session}` are substituted in both templates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ResolverConfig {
    pub session_url_template: String,
    pub session_name_template: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            session_url_template:
                "https://chorus.localhost/workspaces/{workspace}/sessions/{session}".to_string(),
            session_name_template: "Session {session}".to_string(),
        }
    }
}

/// An externally hosted web application that can be embedded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct WebAppConfig {
    pub id: String,
    pub name: String,
    pub url: String,
}
