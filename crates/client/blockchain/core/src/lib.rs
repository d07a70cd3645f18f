//! Ledger abstraction layer for the strategy client.
//!
//! The ledger is the authority over game state. The client reads snapshots
//! from it and submits intents to it; it never applies intents locally.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: GameLedger (composite trait)
//!          ├── SnapshotSource
//!          └── IntentSubmitter
//!
//! Layer 1: Domain Traits (snapshots, intents)
//! ```
//!
//! [`InMemoryLedger`] implements both layers in-process and is seeded from a
//! JSON [`Scenario`].
//!
//! # Usage
//!
//! ```ignore
//! use client_blockchain_core::{GameLedger, InMemoryLedger, Scenario};
//!
//! let ledger = InMemoryLedger::new(Scenario::demo().into_snapshot()?);
//! let snapshot = ledger.fetch_snapshot().await?;
//! let receipt = ledger.submit_move(unit, to).await?;
//! ```

pub mod config;
pub mod memory;
pub mod scenario;
pub mod traits;
pub mod types;

pub use config::MemoryLedgerConfig;
pub use memory::InMemoryLedger;
pub use scenario::{Scenario, ScenarioError};

// Re-export all traits
pub use traits::{
    GameLedger, IntentSubmitter, SnapshotError, SnapshotSource, SubmitError, TransportError,
};

// Re-export all types
pub use types::{IntentReceipt, TransactionId};
