//! Dispatch worker that submits intents to the ledger.
//!
//! Receives commands from [`SessionHandle`](crate::SessionHandle), runs each
//! submission in its own task so intents for different units proceed
//! concurrently, and settles every intent with a snapshot refresh. A unit is
//! released only once the local snapshot reflects the outcome of its intent.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;

use client_blockchain_core::SubmitError;
use game_core::Intent;
use tracing::{debug, error, info, warn};

use crate::api::{Result, Severity};
use crate::events::IntentEvent;
use crate::state::SessionContext;

/// Commands that can be sent to the dispatch worker
pub(crate) enum Command {
    /// Submit an intent. The actor is already marked pending.
    Dispatch { intent: Intent },
    /// Re-fetch the snapshot. Replies with the version in effect afterwards.
    Refresh { reply: oneshot::Sender<Result<u64>> },
}

/// Background task that processes dispatch commands.
pub(crate) struct DispatchWorker {
    context: Arc<SessionContext>,
    command_rx: mpsc::Receiver<Command>,
    tasks: JoinSet<()>,
}

impl DispatchWorker {
    pub(crate) fn new(context: Arc<SessionContext>, command_rx: mpsc::Receiver<Command>) -> Self {
        Self {
            context,
            command_rx,
            tasks: JoinSet::new(),
        }
    }

    /// Main worker loop. Exits once every handle is dropped and in-flight
    /// intents have settled.
    pub(crate) async fn run(mut self) {
        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                Some(joined) = self.tasks.join_next(), if !self.tasks.is_empty() => {
                    Self::log_join(joined);
                }
            }
        }

        while let Some(joined) = self.tasks.join_next().await {
            Self::log_join(joined);
        }
        debug!("dispatch worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Dispatch { intent } => {
                info!(%intent, "dispatching intent");
                self.context
                    .event_bus
                    .publish(IntentEvent::Dispatched { intent });
                self.tasks.spawn(settle(Arc::clone(&self.context), intent));
            }
            Command::Refresh { reply } => {
                let context = Arc::clone(&self.context);
                self.tasks.spawn(async move {
                    let result = context.refresh().await;
                    if reply.send(result).is_err() {
                        debug!("Refresh reply channel closed (caller dropped)");
                    }
                });
            }
        }
    }

    fn log_join(joined: std::result::Result<(), tokio::task::JoinError>) {
        if let Err(join_error) = joined {
            error!(%join_error, "dispatch task aborted");
        }
    }
}

/// Submits one intent, refreshes, then frees the actor if the refresh
/// caught up with the ledger.
///
/// The refresh runs whether or not the submission succeeded. When it fails
/// or returns a snapshot older than the receipt, the actor stays pending
/// until a later refresh installs a covering snapshot.
async fn settle(context: Arc<SessionContext>, intent: Intent) {
    let actor = intent.actor();
    let submitted = context.ledger.submit_intent(intent).await;

    if let Err(error) = &submitted {
        warn!(%intent, %error, "intent failed");
        context
            .notifier
            .notify(&format!("{intent} failed: {error}"), Severity::Error);
    }

    // Refresh failures are reported by the refresh itself.
    let refreshed = context.refresh().await.is_ok();

    {
        let mut state = context.lock();
        let installed = state.snapshot.version;
        let wait_for = match &submitted {
            Ok(receipt) if receipt.version > installed => Some(receipt.version),
            // Outcome unknown; any snapshot installed from here on settles it.
            Err(SubmitError::TransportError(_)) if !refreshed => Some(installed),
            _ => None,
        };

        match wait_for {
            Some(version) => {
                warn!(%actor, version, installed, "unit stays pending until a refresh catches up");
                state.pending.await_version(actor, version);
            }
            None => {
                state.pending.release(actor);
            }
        }
    }

    let event = match submitted {
        Ok(receipt) => {
            info!(%intent, transaction = %receipt.transaction_id, version = receipt.version, "intent confirmed");
            IntentEvent::Confirmed { intent, receipt }
        }
        Err(error) => IntentEvent::Failed {
            intent,
            error: error.to_string(),
        },
    };
    context.event_bus.publish(event);
}
