//! Session orchestration for the strategy client.
//!
//! This crate wires the rules engine, the ledger, and a background dispatch
//! worker into a session API. Consumers build a [`Session`], resolve clicks
//! through [`SessionHandle`], and subscribe to events by topic.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod events;
pub mod session;

mod state;
mod workers;

pub use api::{Notifier, Result, RuntimeError, SessionHandle, Severity, TracingNotifier};
pub use events::{Event, EventBus, IntentEvent, SnapshotEvent, Topic};
pub use session::{Session, SessionBuilder, SessionConfig};
