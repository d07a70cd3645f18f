//! Session orchestrator.
//!
//! The session owns the dispatch worker, wires up the command channel and
//! the event bus, and exposes a builder-based API for clients.

use std::env;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use client_blockchain_core::GameLedger;
use game_core::Snapshot;

use crate::api::{Notifier, Result, RuntimeError, SessionHandle, TracingNotifier};
use crate::events::EventBus;
use crate::state::SessionContext;
use crate::workers::{Command, DispatchWorker};

/// Session configuration shared across the orchestrator and worker.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub command_buffer_size: usize,
    pub event_buffer_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            command_buffer_size: 32,
            event_buffer_size: 100,
        }
    }
}

impl SessionConfig {
    /// Construct configuration from process environment variables.
    ///
    /// - `SESSION_COMMAND_BUFFER` - Dispatch queue size (default: 32)
    /// - `SESSION_EVENT_BUFFER` - Per-topic event capacity (default: 100)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(size) = read_env::<usize>("SESSION_COMMAND_BUFFER") {
            config.command_buffer_size = size.max(1);
        }
        if let Some(size) = read_env::<usize>("SESSION_EVENT_BUFFER") {
            config.event_buffer_size = size.max(1);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// A running client session
///
/// Design: Session owns the worker and coordinates shutdown.
/// [`SessionHandle`] provides a cloneable façade for clients.
pub struct Session {
    handle: SessionHandle,
    worker_handle: JoinHandle<()>,
}

impl Session {
    /// Create a new session builder
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Get a cloneable handle to this session
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// Shutdown the session gracefully
    ///
    /// Waits for in-flight intents to settle. Outstanding handle clones keep
    /// the worker alive until they are dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Session`] with flexible configuration.
pub struct SessionBuilder {
    config: SessionConfig,
    ledger: Option<Arc<dyn GameLedger>>,
    notifier: Option<Arc<dyn Notifier>>,
    snapshot: Option<Snapshot>,
}

impl SessionBuilder {
    fn new() -> Self {
        Self {
            config: SessionConfig::default(),
            ledger: None,
            notifier: None,
            snapshot: None,
        }
    }

    /// Override session configuration
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the required ledger
    pub fn ledger(mut self, ledger: impl GameLedger + 'static) -> Self {
        self.ledger = Some(Arc::new(ledger));
        self
    }

    /// Set the required ledger from an existing shared instance
    pub fn shared_ledger(mut self, ledger: Arc<dyn GameLedger>) -> Self {
        self.ledger = Some(ledger);
        self
    }

    /// Set the notifier (default: [`TracingNotifier`])
    pub fn notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Some(Arc::new(notifier));
        self
    }

    /// Start from this snapshot instead of fetching one from the ledger
    pub fn initial_snapshot(mut self, snapshot: Snapshot) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    /// Build the session and spawn its worker
    pub async fn build(self) -> Result<Session> {
        let ledger = self.ledger.ok_or(RuntimeError::MissingLedger)?;

        let snapshot = match self.snapshot {
            Some(snapshot) => snapshot,
            None => ledger.fetch_snapshot().await?,
        };
        tracing::info!(
            ledger = ledger.name(),
            network = ledger.network(),
            version = snapshot.version,
            units = snapshot.units.len(),
            "session starting"
        );

        let notifier = self
            .notifier
            .unwrap_or_else(|| Arc::new(TracingNotifier) as Arc<dyn Notifier>);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let context = Arc::new(SessionContext::new(snapshot, ledger, event_bus, notifier));

        let (command_tx, command_rx) =
            mpsc::channel::<Command>(self.config.command_buffer_size.max(1));
        let handle = SessionHandle::new(Arc::clone(&context), command_tx);

        let worker = DispatchWorker::new(context, command_rx);
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Session {
            handle,
            worker_handle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_buffers() {
        let config = SessionConfig::default();
        assert_eq!(config.command_buffer_size, 32);
        assert_eq!(config.event_buffer_size, 100);
    }

    #[tokio::test]
    async fn build_requires_ledger() {
        let result = Session::builder().build().await;
        assert!(matches!(result, Err(RuntimeError::MissingLedger)));
    }
}
