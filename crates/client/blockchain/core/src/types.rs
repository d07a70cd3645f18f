//! Common types for ledger interactions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ledger-assigned transaction identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub u64);

impl TransactionId {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tx-{:06}", self.0)
    }
}

/// Result of an accepted intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentReceipt {
    /// Transaction ID on the ledger
    pub transaction_id: TransactionId,

    /// Snapshot version the ledger published after applying the intent
    pub version: u64,
}
