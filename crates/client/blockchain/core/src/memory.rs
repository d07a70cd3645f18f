//! In-process ledger for local play and tests.
//!
//! Holds the authoritative snapshot, re-validates every intent with the same
//! rules the client uses, and publishes a new snapshot version per accepted
//! intent.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use game_core::{Intent, Position, Snapshot, UnitId};

use crate::config::MemoryLedgerConfig;
use crate::scenario::{Scenario, ScenarioError};
use crate::traits::{
    GameLedger, IntentSubmitter, SnapshotError, SnapshotSource, SubmitError, TransportError,
};
use crate::types::{IntentReceipt, TransactionId};

#[derive(Debug)]
struct LedgerState {
    snapshot: Snapshot,
    last_transaction: TransactionId,
    history: Vec<(TransactionId, Intent)>,
    reject_submissions: bool,
    offline: bool,
}

/// Authoritative ledger held in memory.
///
/// Cloning shares the underlying state.
#[derive(Clone, Debug)]
pub struct InMemoryLedger {
    state: Arc<Mutex<LedgerState>>,
    config: MemoryLedgerConfig,
}

impl InMemoryLedger {
    pub fn new(snapshot: Snapshot) -> Self {
        Self::with_config(snapshot, MemoryLedgerConfig::default())
    }

    pub fn with_config(snapshot: Snapshot, config: MemoryLedgerConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(LedgerState {
                snapshot,
                last_transaction: TransactionId(0),
                history: Vec::new(),
                reject_submissions: false,
                offline: false,
            })),
            config,
        }
    }

    /// Seeds the ledger from `config.scenario_path`, or the demo scenario.
    pub fn from_config(config: MemoryLedgerConfig) -> Result<Self, ScenarioError> {
        let scenario = match &config.scenario_path {
            Some(path) => Scenario::load(path)?,
            None => Scenario::demo(),
        };
        tracing::info!(
            scenario = %scenario.name,
            network = %config.network,
            latency_ms = config.latency.as_millis() as u64,
            "seeding in-memory ledger"
        );
        Ok(Self::with_config(scenario.into_snapshot()?, config))
    }

    /// While set, every submission fails with a transport error.
    pub fn set_reject_submissions(&self, reject: bool) {
        self.lock().reject_submissions = reject;
    }

    /// While set, snapshot fetches fail with a transport error.
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    /// Replaces the authoritative snapshot, e.g. to simulate another player.
    pub fn publish(&self, snapshot: Snapshot) {
        self.lock().snapshot = snapshot;
    }

    pub fn current(&self) -> Snapshot {
        self.lock().snapshot.clone()
    }

    /// Accepted intents in order of acceptance.
    pub fn history(&self) -> Vec<(TransactionId, Intent)> {
        self.lock().history.clone()
    }

    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn simulate_latency(&self) {
        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }
    }

    async fn apply(&self, intent: Intent) -> Result<IntentReceipt, SubmitError> {
        self.simulate_latency().await;

        let mut state = self.lock();
        if state.reject_submissions {
            tracing::warn!(%intent, "ledger refusing submissions");
            return Err(TransportError::Unavailable("submissions disabled".to_string()).into());
        }

        let next = intent
            .transition(&state.snapshot)
            .map_err(|source| SubmitError::Refused { intent, source })?;

        let transaction_id = state.last_transaction.next();
        state.last_transaction = transaction_id;
        state.history.push((transaction_id, intent));
        state.snapshot = next;

        tracing::debug!(%intent, %transaction_id, version = state.snapshot.version, "intent applied");
        Ok(IntentReceipt {
            transaction_id,
            version: state.snapshot.version,
        })
    }
}

#[async_trait]
impl SnapshotSource for InMemoryLedger {
    async fn fetch_snapshot(&self) -> Result<Snapshot, SnapshotError> {
        self.simulate_latency().await;

        let state = self.lock();
        if state.offline {
            return Err(TransportError::NetworkError("ledger offline".to_string()).into());
        }
        Ok(state.snapshot.clone())
    }
}

#[async_trait]
impl IntentSubmitter for InMemoryLedger {
    async fn submit_move(&self, unit: UnitId, to: Position) -> Result<IntentReceipt, SubmitError> {
        self.apply(game_core::MoveIntent::new(unit, to).into()).await
    }

    async fn submit_attack(
        &self,
        attacker: UnitId,
        defender: UnitId,
    ) -> Result<IntentReceipt, SubmitError> {
        self.apply(game_core::AttackIntent::new(attacker, defender).into())
            .await
    }
}

impl GameLedger for InMemoryLedger {
    fn name(&self) -> &str {
        "InMemory"
    }

    fn network(&self) -> &str {
        &self.config.network
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use game_core::{GridModel, IntentError, MoveError, Unit, UnitKind, UnitRegistry};

    use super::*;

    fn ledger() -> InMemoryLedger {
        let units = UnitRegistry::new([
            Unit::new(UnitId(1), Position::new(2, 2), UnitKind::Warrior).with_movement_range(3),
            Unit::npc(UnitId(9), Position::new(3, 2), UnitKind::Barbarian).with_health(20),
        ])
        .unwrap();
        InMemoryLedger::new(Snapshot::new(0, GridModel::default(), units))
    }

    #[tokio::test]
    async fn accepted_move_publishes_next_version() {
        let ledger = ledger();

        let receipt = ledger.submit_move(UnitId(1), Position::new(2, 4)).await.unwrap();
        assert_eq!(receipt.transaction_id, TransactionId(1));
        assert_eq!(receipt.version, 1);

        let snapshot = ledger.fetch_snapshot().await.unwrap();
        let unit = snapshot.unit_by_id(UnitId(1)).unwrap();
        assert_eq!(unit.position(), Position::new(2, 4));
        assert_eq!(unit.movement_range, 1);
        assert_eq!(ledger.history().len(), 1);
    }

    #[tokio::test]
    async fn out_of_range_move_is_refused() {
        let ledger = ledger();

        let err = ledger.submit_move(UnitId(1), Position::new(9, 9)).await.unwrap_err();
        assert!(matches!(
            err,
            SubmitError::Refused {
                source: IntentError::Move(MoveError::OutOfRange { .. }),
                ..
            }
        ));
        assert_eq!(ledger.current().version, 0);
        assert!(ledger.history().is_empty());
    }

    #[tokio::test]
    async fn lethal_attack_removes_defender() {
        let ledger = ledger();

        let receipt = ledger
            .submit_intent(game_core::AttackIntent::new(UnitId(1), UnitId(9)).into())
            .await
            .unwrap();

        let snapshot = ledger.fetch_snapshot().await.unwrap();
        assert_eq!(snapshot.version, receipt.version);
        assert!(snapshot.unit_by_id(UnitId(9)).is_none());
        assert_eq!(snapshot.unit_by_id(UnitId(1)).unwrap().movement_range, 0);
    }

    #[tokio::test]
    async fn fault_switches() {
        let ledger = ledger();

        ledger.set_reject_submissions(true);
        let err = ledger.submit_move(UnitId(1), Position::new(2, 3)).await.unwrap_err();
        assert!(matches!(err, SubmitError::TransportError(_)));

        ledger.set_offline(true);
        assert!(ledger.fetch_snapshot().await.is_err());

        ledger.set_offline(false);
        ledger.set_reject_submissions(false);
        assert!(ledger.submit_move(UnitId(1), Position::new(2, 3)).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn latency_delays_calls() {
        let ledger = InMemoryLedger::with_config(
            ledger().current(),
            MemoryLedgerConfig::default().with_latency(Duration::from_millis(250)),
        );

        let start = tokio::time::Instant::now();
        ledger.fetch_snapshot().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(250));
    }

    #[test]
    fn seeds_from_demo_by_default() {
        let ledger = InMemoryLedger::from_config(MemoryLedgerConfig::default()).unwrap();
        assert_eq!(ledger.name(), "InMemory");
        assert_eq!(ledger.network(), "local");
        assert!(!ledger.current().units.is_empty());
    }
}
