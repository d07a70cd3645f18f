//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and the ledger so clients can
//! bubble them up with consistent context. Rule-based refusals are not
//! errors; they come back as `Decision::Rejected`.
use thiserror::Error;
use tokio::sync::oneshot;

use client_blockchain_core::{SnapshotError, SubmitError};
use game_core::SelectionError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("session requires a ledger to be configured before building")]
    MissingLedger,

    #[error("dispatch worker command channel closed")]
    CommandChannelClosed,

    #[error("dispatch worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("dispatch worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("snapshot refresh failed")]
    Snapshot(#[from] SnapshotError),

    #[error("intent submission failed")]
    Submit(#[from] SubmitError),

    #[error(transparent)]
    Selection(#[from] SelectionError),
}
