//! Realm client binary.
//!
//! Composition root: loads configuration, seeds the in-memory ledger,
//! starts a session, and hands control to the line frontend.
//!
//! ```bash
//! SCENARIO_PATH=scenario.json LEDGER_LATENCY_MS=150 cargo run -p realm-client
//! ```
use anyhow::{Context, Result};
use client_blockchain_core::InMemoryLedger;
use client_frontend_core::MessageLogNotifier;
use realm_client::{Client, ClientConfig, LineFrontend, logging};
use runtime::Session;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env();
    let session_id = logging::resolve_session_id(config.session_id.as_deref());
    let _log_guard = logging::setup_logging(&session_id)?;

    tracing::info!(%session_id, "starting realm client");

    let ledger = InMemoryLedger::from_config(config.ledger.clone())
        .context("failed to load scenario")?;
    let notifier = MessageLogNotifier::new(&config.frontend.messages);

    let session = Session::builder()
        .config(config.session.clone())
        .ledger(ledger)
        .notifier(notifier.clone())
        .build()
        .await
        .context("failed to start session")?;
    tracing::info!("session started");

    let frontend = LineFrontend::stdio(config.frontend, notifier);

    Client::builder()
        .session(session)
        .frontend(frontend)
        .build()?
        .run()
        .await?;

    tracing::info!("client shutdown complete");
    Ok(())
}
