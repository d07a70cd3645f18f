//! Top-level client wiring a session to a front-end.
//!
//! ```text
//! Client
//!   ├─→ Session (rules engine, ledger, dispatch worker)
//!   └─→ Frontend (input and rendering, talks to the session via SessionHandle)
//! ```
//!
//! The binary builds both layers from environment configuration and hands
//! them to [`Client`], which runs the frontend to completion and then shuts
//! the session down.
mod builder;

pub mod app;
pub mod config;
pub mod input;
pub mod logging;

pub use app::LineFrontend;
pub use builder::ClientBuilder;
pub use client_frontend_core::Frontend;
pub use config::ClientConfig;
pub use input::{InputCommand, InputError};

use anyhow::{Context, Result};
use runtime::Session;

/// Composition root owning the session and the frontend.
pub struct Client {
    session: Session,
    frontend: Box<dyn Frontend>,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Run the frontend until the player quits, then wait for in-flight
    /// intents to settle.
    pub async fn run(self) -> Result<()> {
        let handle = self.session.handle();

        let mut frontend = self.frontend;
        let frontend_result = frontend.run(handle).await;

        self.session
            .shutdown()
            .await
            .context("session worker did not shut down cleanly")?;

        frontend_result
    }
}
