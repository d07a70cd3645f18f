//! View-model snapshots derived from a running session.
mod map;

pub use map::{MapView, TileView, UnitView};

use runtime::SessionHandle;

use crate::config::OverlayConfig;
use crate::message::{MessageEntry, MessageLog};

/// High-level snapshot of the session used by presentation layers.
#[derive(Clone, Debug)]
pub struct UiFrame {
    pub version: u64,
    pub map: MapView,
    pub selected: Option<UnitView>,
    pub pending: usize,
    pub messages: Vec<MessageEntry>,
}

impl UiFrame {
    pub fn from_session(
        handle: &SessionHandle,
        overlay: &OverlayConfig,
        messages: &MessageLog,
        message_limit: usize,
    ) -> Self {
        let snapshot = handle.snapshot();
        let units = handle.units();
        let highlighted = handle.highlighted();

        let selected = handle
            .current_selection()
            .and_then(|id| units.unit_by_id(id))
            .map(UnitView::from);

        Self {
            version: snapshot.version,
            map: MapView::build(&snapshot, &units, &highlighted, overlay),
            selected,
            pending: handle.pending_units().len(),
            messages: collect_messages(messages, message_limit),
        }
    }
}

/// Newest `limit` messages in chronological order.
fn collect_messages(log: &MessageLog, limit: usize) -> Vec<MessageEntry> {
    let mut recent: Vec<_> = log.recent(limit).cloned().collect();
    recent.reverse();
    recent
}
