//! Event types for different topics.

use client_blockchain_core::IntentReceipt;
use game_core::{Intent, UnitId};
use serde::{Deserialize, Serialize};

/// Lifecycle of a dispatched intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntentEvent {
    /// The dispatch worker picked the intent up and is submitting it.
    Dispatched { intent: Intent },

    /// The ledger accepted the intent.
    ///
    /// Published after the follow-up refresh. The actor stays pending if
    /// that refresh did not reach `receipt.version`.
    Confirmed {
        intent: Intent,
        receipt: IntentReceipt,
    },

    /// The ledger refused the intent or could not be reached.
    ///
    /// Published after the follow-up refresh. The actor stays pending if
    /// the transport failed and that refresh failed too.
    Failed { intent: Intent, error: String },
}

impl IntentEvent {
    pub fn intent(&self) -> &Intent {
        match self {
            IntentEvent::Dispatched { intent }
            | IntentEvent::Confirmed { intent, .. }
            | IntentEvent::Failed { intent, .. } => intent,
        }
    }

    pub fn actor(&self) -> UnitId {
        self.intent().actor()
    }

    /// True for `Confirmed` and `Failed`.
    pub fn is_settled(&self) -> bool {
        !matches!(self, IntentEvent::Dispatched { .. })
    }
}

/// Snapshot replacement outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapshotEvent {
    /// A fetched snapshot replaced the current one.
    Refreshed {
        version: u64,
        /// Selection cleared because its unit disappeared or became an NPC.
        dropped_selection: Option<UnitId>,
    },

    /// A fetched snapshot was older than the current one and was dropped.
    Discarded { received: u64, current: u64 },

    RefreshFailed { error: String },
}
