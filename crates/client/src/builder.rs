//! Client builder with dependency injection.
use anyhow::{Context, Result};
use runtime::Session;

use crate::{Client, Frontend};

/// Both layers are required; `build` fails fast when one is missing.
#[derive(Default)]
pub struct ClientBuilder {
    session: Option<Session>,
    frontend: Option<Box<dyn Frontend>>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the session (required).
    ///
    /// Build it with [`Session::builder`]; its worker is already running.
    pub fn session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Set the frontend (required).
    pub fn frontend(mut self, frontend: impl Frontend + 'static) -> Self {
        self.frontend = Some(Box::new(frontend));
        self
    }

    pub fn build(self) -> Result<Client> {
        let session = self
            .session
            .context("Session is required. Use .session() to set it.")?;

        let frontend = self
            .frontend
            .context("Frontend is required. Use .frontend() to set it.")?;

        Ok(Client { session, frontend })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_session_is_reported() {
        let error = ClientBuilder::new().build().err().unwrap();
        assert!(error.to_string().contains("Session is required"));
    }
}
