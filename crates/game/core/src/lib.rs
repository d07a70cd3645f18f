//! Deterministic rules for the strategy client, shared across crates.
//!
//! `game-core` defines the snapshot data model (grid, units), the intents a
//! player may dispatch, and the engine that turns a click into a
//! [`Decision`]. Nothing here performs I/O; runtime layers own the snapshot
//! and hand it to the engine by reference.
pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod state;

pub use action::{
    ATTACK_CAPABLE, AttackError, AttackIntent, Intent, IntentError, IntentTransition, MoveError,
    MoveIntent, attack_power,
};
pub use config::GameConfig;
pub use engine::{
    ActionResolver, Decision, PendingIntents, RangeCalculator, RejectReason, SelectionError,
    SelectionState,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    GridModel, MapDimensions, Position, RegistryError, ResourceKind, Snapshot, Tile, TileKind,
    Unit, UnitId, UnitKind, UnitRegistry,
};
