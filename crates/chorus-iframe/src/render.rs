//! DOM reconciliation plan.
//!
//! The cache never touches the DOM. The host keeps the list of frame ids it
//! has mounted, and after each cache operation asks for a [`RenderPlan`] that
//! brings its nodes in line with [`IframeSessionCache::frames`].
//!
//! [`IframeSessionCache::frames`]: crate::IframeSessionCache::frames

use std::collections::HashSet;

use chorus_common::IframeId;
use serde::Serialize;

use crate::entry::{CachedIframe, FrameView};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderPlan {
    /// Frames to create, in cache insertion order.
    pub mount: Vec<CachedIframe>,
    /// Mounted nodes whose frame is gone.
    pub unmount: Vec<IframeId>,
    /// The single frame to show; every other mounted node is hidden.
    pub visible: Option<IframeId>,
}

impl RenderPlan {
    pub fn reconcile(mounted: &[IframeId], frames: &[FrameView]) -> Self {
        let live: HashSet<&IframeId> = frames.iter().map(|v| v.frame.id()).collect();
        let already: HashSet<&IframeId> = mounted.iter().collect();

        Self {
            mount: frames
                .iter()
                .filter(|v| !already.contains(v.frame.id()))
                .map(|v| v.frame.clone())
                .collect(),
            unmount: mounted
                .iter()
                .filter(|id| !live.contains(id))
                .cloned()
                .collect(),
            visible: frames
                .iter()
                .find(|v| v.visible)
                .map(|v| v.frame.id().clone()),
        }
    }

    /// Apply the plan to the host's list of mounted ids.
    pub fn apply(&self, mounted: &mut Vec<IframeId>) {
        mounted.retain(|id| !self.unmount.contains(id));
        mounted.extend(self.mount.iter().map(|f| f.id().clone()));
    }

    pub fn is_noop(&self) -> bool {
        self.mount.is_empty() && self.unmount.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::IframeKind;
    use chrono::{DateTime, Utc};

    fn view(id: &str, visible: bool) -> FrameView {
        FrameView {
            frame: CachedIframe {
                id: IframeId::from(id),
                kind: IframeKind::Webapp,
                url: format!("https://apps.test/{id}"),
                name: id.into(),
                last_accessed: DateTime::<Utc>::UNIX_EPOCH,
            },
            visible,
        }
    }

    fn ids(list: &[&str]) -> Vec<IframeId> {
        list.iter().map(|s| IframeId::from(*s)).collect()
    }

    #[test]
    fn first_render_mounts_everything() {
        let plan = RenderPlan::reconcile(&[], &[view("a", false), view("b", true)]);
        let mounted: Vec<&str> = plan.mount.iter().map(|f| f.id().as_str()).collect();
        assert_eq!(mounted, vec!["a", "b"]);
        assert!(plan.unmount.is_empty());
        assert_eq!(plan.visible, Some(IframeId::from("b")));
    }

    #[test]
    fn evicted_frames_are_unmounted() {
        let plan = RenderPlan::reconcile(&ids(&["a", "b"]), &[view("b", true), view("c", false)]);
        assert_eq!(plan.unmount, ids(&["a"]));
        assert_eq!(plan.mount.len(), 1);
        assert_eq!(plan.mount[0].id().as_str(), "c");
    }

    #[test]
    fn switching_visibility_is_not_a_remount() {
        let plan = RenderPlan::reconcile(&ids(&["a", "b"]), &[view("a", true), view("b", false)]);
        assert!(plan.is_noop());
        assert_eq!(plan.visible, Some(IframeId::from("a")));
    }

    #[test]
    fn nothing_visible_without_active() {
        let plan = RenderPlan::reconcile(&ids(&["a"]), &[view("a", false)]);
        assert_eq!(plan.visible, None);
    }

    #[test]
    fn apply_tracks_mounted_ids() {
        let mut mounted = ids(&["a", "b"]);
        let plan = RenderPlan::reconcile(&mounted, &[view("b", false), view("c", true)]);
        plan.apply(&mut mounted);
        assert_eq!(mounted, ids(&["b", "c"]));
    }
}
