//! Cloneable façade over a running session.
//!
//! [`SessionHandle`] resolves clicks synchronously against the current
//! snapshot and hands intents to the dispatch worker without waiting on the
//! ledger. Queries read the shared state under a short lock.
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::warn;

use game_core::{
    Decision, Position, RangeCalculator, RejectReason, Snapshot, UnitId, UnitRegistry,
};

use super::errors::{Result, RuntimeError};
use super::notify::Severity;
use crate::events::{Event, EventBus, Topic};
use crate::state::SessionContext;
use crate::workers::Command;

/// Client-facing handle to interact with the session
#[derive(Clone)]
pub struct SessionHandle {
    context: Arc<SessionContext>,
    command_tx: mpsc::Sender<Command>,
}

impl SessionHandle {
    pub(crate) fn new(context: Arc<SessionContext>, command_tx: mpsc::Sender<Command>) -> Self {
        Self {
            context,
            command_tx,
        }
    }

    /// Resolve a click on tile `(x, y)`.
    ///
    /// `Move` and `Attack` decisions are dispatched before returning: the
    /// actor is marked pending and the selection is cleared. If the worker
    /// cannot take the intent, local state is rolled back and the click
    /// resolves to `Rejected { DispatchUnavailable }`.
    pub fn resolve(&self, x: i32, y: i32) -> Decision {
        self.resolve_position(Position::new(x, y))
    }

    pub fn resolve_position(&self, click: Position) -> Decision {
        let decision = {
            let mut state = self.context.lock();
            let decision = state.resolve(click);

            match decision.intent() {
                Some(intent) => {
                    let previous = state.selection;
                    state.pending.mark(intent.actor());
                    state.selection.apply(&decision);

                    match self.command_tx.try_send(Command::Dispatch { intent }) {
                        Ok(()) => decision,
                        Err(error) => {
                            warn!(%intent, %error, "dispatch worker unavailable");
                            state.pending.release(intent.actor());
                            state.selection = previous;
                            Decision::rejected(RejectReason::DispatchUnavailable)
                        }
                    }
                }
                None => {
                    state.selection.apply(&decision);
                    decision
                }
            }
        };

        if let Decision::Rejected { reason } = decision {
            self.context
                .notifier
                .notify(&reason.to_string(), Severity::Warning);
        }
        decision
    }

    /// Select `unit` directly, bypassing click resolution.
    ///
    /// Follows the same toggle rules as clicking the unit's tile.
    pub fn select(&self, unit: UnitId) -> Result<Option<UnitId>> {
        let mut state = self.context.lock();
        let snapshot = Arc::clone(&state.snapshot);
        state.selection.select(unit, &snapshot)?;
        Ok(state.selection.current())
    }

    /// Tiles `unit` could move to, ignoring occupancy. Empty for unknown units.
    pub fn reachable_from(&self, unit: UnitId) -> BTreeSet<Position> {
        let snapshot = self.snapshot();
        snapshot
            .unit_by_id(unit)
            .map(|unit| RangeCalculator::reachable_from(unit, &snapshot))
            .unwrap_or_default()
    }

    /// Reachable tiles of the selected unit, for highlighting.
    pub fn highlighted(&self) -> BTreeSet<Position> {
        self.current_selection()
            .map(|unit| self.reachable_from(unit))
            .unwrap_or_default()
    }

    pub fn current_selection(&self) -> Option<UnitId> {
        self.context.lock().selection.current()
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.context.lock().snapshot)
    }

    /// Units with `is_selected` flags projected from the selection state.
    pub fn units(&self) -> UnitRegistry {
        let state = self.context.lock();
        state.selection.project(&state.snapshot.units)
    }

    pub fn is_pending(&self, unit: UnitId) -> bool {
        self.context.lock().pending.contains(unit)
    }

    pub fn pending_units(&self) -> Vec<UnitId> {
        self.context.lock().pending.iter().collect()
    }

    /// Re-fetch the ledger snapshot. Returns the version in effect afterwards.
    pub async fn refresh(&self) -> Result<u64> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Refresh { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Intent` - Intent dispatch, confirmation, and failure
    /// - `Topic::Snapshot` - Snapshot refreshes
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut intents = handle.subscribe(Topic::Intent);
    /// while let Ok(event) = intents.recv().await {
    ///     // Handle intent events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.context.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.context.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.context.event_bus
    }

    /// Ledger backend and network, e.g. `("InMemory", "local")`.
    pub fn ledger_info(&self) -> (String, String) {
        (
            self.context.ledger.name().to_string(),
            self.context.ledger.network().to_string(),
        )
    }
}
