//! Ledger abstraction traits.
//!
//! This module defines a layered ledger abstraction:
//! - Layer 1: SnapshotSource, IntentSubmitter (game domain)
//! - Layer 2: GameLedger (composite trait)
//!
//! The ledger is the authority. The client never mutates its own snapshot;
//! it submits intents and re-fetches.

use async_trait::async_trait;
use game_core::{AttackIntent, Intent, IntentError, MoveIntent, Position, Snapshot, UnitId};

use crate::types::IntentReceipt;

// ============================================================================
// Error Types
// ============================================================================

/// Transport layer errors.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Ledger unavailable: {0}")]
    Unavailable(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Backend-specific error: {0}")]
    BackendError(String),
}

/// Snapshot fetch errors.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Transport error: {0}")]
    TransportError(#[from] TransportError),

    #[error("Invalid snapshot data: {0}")]
    InvalidData(String),
}

/// Intent submission errors.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The authority re-validated the intent and refused it.
    #[error("Intent {intent} refused: {source}")]
    Refused {
        intent: Intent,
        #[source]
        source: IntentError,
    },

    #[error("Transport error: {0}")]
    TransportError(#[from] TransportError),
}

// ============================================================================
// Layer 1: Game Domain Traits
// ============================================================================

/// Read side of the ledger.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch the latest authoritative snapshot.
    async fn fetch_snapshot(&self) -> Result<Snapshot, SnapshotError>;
}

/// Write side of the ledger.
#[async_trait]
pub trait IntentSubmitter: Send + Sync {
    /// Submit a move. Returns once the ledger has accepted or refused it.
    async fn submit_move(&self, unit: UnitId, to: Position) -> Result<IntentReceipt, SubmitError>;

    /// Submit an attack.
    async fn submit_attack(
        &self,
        attacker: UnitId,
        defender: UnitId,
    ) -> Result<IntentReceipt, SubmitError>;

    /// Submit any intent (default: dispatch to the typed methods).
    async fn submit_intent(&self, intent: Intent) -> Result<IntentReceipt, SubmitError> {
        match intent {
            Intent::Move(MoveIntent { unit, to }) => self.submit_move(unit, to).await,
            Intent::Attack(AttackIntent { attacker, defender }) => {
                self.submit_attack(attacker, defender).await
            }
        }
    }
}

// ============================================================================
// Layer 2: Composite Trait
// ============================================================================

/// Complete ledger interface consumed by the runtime.
pub trait GameLedger: SnapshotSource + IntentSubmitter + Send + Sync {
    /// Get the ledger backend name (e.g., "InMemory").
    fn name(&self) -> &str;

    /// Get the network name (e.g., "local", "testnet").
    fn network(&self) -> &str;
}
