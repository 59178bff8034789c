use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Short hex id used to correlate log lines of a single operation.
pub fn new_correlation_id() -> String {
    let uuid = uuid::Uuid::new_v4();
    let bytes = uuid.as_bytes();
    format!(
        "{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3]
    )
}

/// Identifier of a cached frame: a workbench session id or a webapp id.
///
/// Ids come from the router, so unlike most ids in the workspace they are
/// never generated locally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IframeId(String);

impl IframeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for IframeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for IframeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for IframeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for IframeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correlation_id_is_short_hex() {
        let cid = new_correlation_id();
        assert_eq!(cid.len(), 8);
        assert!(cid.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn correlation_id_is_unique() {
        assert_ne!(new_correlation_id(), new_correlation_id());
    }

    #[test]
    fn iframe_id_display_matches_str() {
        let id = IframeId::new("session-42");
        assert_eq!(id.to_string(), "session-42");
        assert_eq!(id.as_str(), "session-42");
    }

    #[test]
    fn blank_iframe_id_is_empty() {
        assert!(IframeId::new("").is_empty());
        assert!(IframeId::new("   ").is_empty());
        assert!(!IframeId::new("jupyter").is_empty());
    }

    #[test]
    fn iframe_id_serializes_as_plain_string() {
        let id = IframeId::from("ws-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"ws-1\"");
        let back: IframeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn iframe_id_map_lookup_by_str() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(IframeId::from("a"), 1);
        assert_eq!(map.get("a"), Some(&1));
    }
}
