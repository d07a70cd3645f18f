//! Aggregated configuration for the client binary.
use std::env;

use client_blockchain_core::MemoryLedgerConfig;
use client_frontend_core::FrontendConfig;
use runtime::SessionConfig;

/// Everything the binary needs, loaded from the environment in one place.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    /// Log directory name; a timestamp is used when unset.
    pub session_id: Option<String>,
    pub ledger: MemoryLedgerConfig,
    pub session: SessionConfig,
    pub frontend: FrontendConfig,
}

impl ClientConfig {
    /// Environment variables:
    /// - `GAME_SESSION_ID` - session identifier used for the log directory
    ///
    /// Nested configs read their own variables.
    pub fn from_env() -> Self {
        Self {
            session_id: env::var("GAME_SESSION_ID")
                .ok()
                .filter(|id| !id.trim().is_empty()),
            ledger: MemoryLedgerConfig::from_env(),
            session: SessionConfig::from_env(),
            frontend: FrontendConfig::from_env(),
        }
    }
}
