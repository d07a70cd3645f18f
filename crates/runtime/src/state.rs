//! Client-side session state shared by the handle and the dispatch worker.
//!
//! The lock is a `std::sync::Mutex` and is never held across an `.await`.
//! Snapshots are replaced whole; nothing mutates one in place.
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use client_blockchain_core::GameLedger;
use game_core::{ActionResolver, Decision, PendingIntents, Position, SelectionState, Snapshot};
use tracing::{debug, warn};

use crate::api::{Notifier, Result, Severity};
use crate::events::{EventBus, SnapshotEvent};

#[derive(Debug)]
pub(crate) struct SessionState {
    pub(crate) snapshot: Arc<Snapshot>,
    pub(crate) selection: SelectionState,
    pub(crate) pending: PendingIntents,
}

impl SessionState {
    pub(crate) fn new(snapshot: Snapshot) -> Self {
        let mut selection = SelectionState::default();
        if let Some(id) = snapshot.units.flagged_selection() {
            selection = SelectionState::Selected(id);
        }
        selection.reconcile(&snapshot);

        Self {
            snapshot: Arc::new(snapshot),
            selection,
            pending: PendingIntents::new(),
        }
    }

    pub(crate) fn resolve(&self, click: Position) -> Decision {
        ActionResolver::new(&self.snapshot, &self.selection, &self.pending).resolve(click)
    }

    /// Replaces the snapshot unless `incoming` is older than the current one.
    ///
    /// Units whose confirmed intent the new snapshot covers stop being
    /// pending.
    pub(crate) fn install(&mut self, incoming: Snapshot) -> SnapshotEvent {
        let current = self.snapshot.version;
        if !incoming.supersedes(&self.snapshot) {
            return SnapshotEvent::Discarded {
                received: incoming.version,
                current,
            };
        }

        let dropped_selection = self.selection.reconcile(&incoming);
        let version = incoming.version;
        self.snapshot = Arc::new(incoming);

        for unit in self.pending.release_covered(version) {
            debug!(%unit, version, "pending intent covered by snapshot");
        }

        SnapshotEvent::Refreshed {
            version,
            dropped_selection,
        }
    }
}

/// Everything a session task needs, shared behind one `Arc`.
pub(crate) struct SessionContext {
    state: Mutex<SessionState>,
    pub(crate) ledger: Arc<dyn GameLedger>,
    pub(crate) event_bus: EventBus,
    pub(crate) notifier: Arc<dyn Notifier>,
}

impl SessionContext {
    pub(crate) fn new(
        snapshot: Snapshot,
        ledger: Arc<dyn GameLedger>,
        event_bus: EventBus,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            state: Mutex::new(SessionState::new(snapshot)),
            ledger,
            event_bus,
            notifier,
        }
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetches the ledger snapshot and installs it.
    ///
    /// Returns the version in effect afterwards, which is the current one if
    /// the fetched snapshot was stale.
    pub(crate) async fn refresh(&self) -> Result<u64> {
        let fetched = match self.ledger.fetch_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(error) => {
                warn!(%error, "snapshot refresh failed");
                self.notifier
                    .notify(&format!("refresh failed: {error}"), Severity::Error);
                self.event_bus.publish(SnapshotEvent::RefreshFailed {
                    error: error.to_string(),
                });
                return Err(error.into());
            }
        };

        let (event, version) = {
            let mut state = self.lock();
            let event = state.install(fetched);
            (event, state.snapshot.version)
        };

        match &event {
            SnapshotEvent::Refreshed {
                dropped_selection: Some(unit),
                ..
            } => debug!(%unit, version, "selection dropped by refresh"),
            SnapshotEvent::Discarded { received, current } => {
                debug!(received, current, "discarded stale snapshot")
            }
            _ => debug!(version, "snapshot refreshed"),
        }
        self.event_bus.publish(event);

        Ok(version)
    }
}
