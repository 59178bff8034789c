//! Cached frame entries.

use chorus_common::{FrameKindTag, IframeId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a frame embeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum IframeKind {
    /// A workbench session running inside a workspace.
    Session { workspace_id: String },
    /// An externally configured web application.
    Webapp,
}

impl IframeKind {
    pub fn tag(&self) -> FrameKindTag {
        match self {
            Self::Session { .. } => FrameKindTag::Session,
            Self::Webapp => FrameKindTag::Webapp,
        }
    }
}

/// One tracked embedded frame.
///
/// `url` has no setter: retargeting a frame means closing and reopening it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedIframe {
    pub(crate) id: IframeId,
    pub(crate) kind: IframeKind,
    pub(crate) url: String,
    pub(crate) name: String,
    pub(crate) last_accessed: DateTime<Utc>,
}

impl CachedIframe {
    pub fn id(&self) -> &IframeId {
        &self.id
    }

    pub fn kind(&self) -> &IframeKind {
        &self.kind
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Workspace of a session frame, for breadcrumbs. `None` for webapps.
    pub fn workspace_id(&self) -> Option<&str> {
        match &self.kind {
            IframeKind::Session { workspace_id } => Some(workspace_id),
            IframeKind::Webapp => None,
        }
    }

    pub fn last_accessed(&self) -> DateTime<Utc> {
        self.last_accessed
    }
}

/// A live frame as the renderer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameView {
    #[serde(flatten)]
    pub frame: CachedIframe,
    pub visible: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(kind: IframeKind) -> CachedIframe {
        CachedIframe {
            id: IframeId::from("f-1"),
            kind,
            url: "https://chorus.localhost/f-1".into(),
            name: "Frame".into(),
            last_accessed: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    #[test]
    fn session_exposes_workspace() {
        let f = frame(IframeKind::Session {
            workspace_id: "ws-7".into(),
        });
        assert_eq!(f.workspace_id(), Some("ws-7"));
        assert_eq!(f.kind().tag(), FrameKindTag::Session);
    }

    #[test]
    fn webapp_has_no_workspace() {
        let f = frame(IframeKind::Webapp);
        assert_eq!(f.workspace_id(), None);
        assert_eq!(f.kind().tag(), FrameKindTag::Webapp);
    }

    #[test]
    fn frame_view_serializes_flat() {
        let view = FrameView {
            frame: frame(IframeKind::Webapp),
            visible: true,
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["id"], "f-1");
        assert_eq!(json["kind"]["type"], "webapp");
        assert_eq!(json["visible"], true);
    }
}
