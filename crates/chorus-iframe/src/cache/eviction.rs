//! LRU victim selection.

use chorus_common::IframeId;

use super::state::Slot;

/// Pick the least recently accessed slot that is not `active`.
///
/// Equal `last_accessed` stamps fall back to insertion order, earliest first.
pub(crate) fn choose_victim<'a>(
    slots: impl IntoIterator<Item = &'a Slot>,
    active: Option<&IframeId>,
) -> Option<IframeId> {
    slots
        .into_iter()
        .filter(|slot| Some(&slot.frame.id) != active)
        .min_by_key(|slot| (slot.frame.last_accessed, slot.seq))
        .map(|slot| slot.frame.id.clone())
}
