//! Trait describing a runnable client front-end.
use anyhow::Result;
use async_trait::async_trait;
use runtime::SessionHandle;

/// Frontend abstraction for UI layers.
///
/// Frontends communicate with the game via SessionHandle:
/// - Resolve clicks
/// - Subscribe to events (Intent, Snapshot)
/// - Query the current snapshot and selection
///
/// Frontends do NOT own the Session - they receive a handle for communication only.
///
/// # Example Implementation
///
/// ```no_run
/// use async_trait::async_trait;
/// use client_frontend_core::Frontend;
/// use runtime::SessionHandle;
/// use anyhow::Result;
///
/// struct MyFrontend;
///
/// #[async_trait]
/// impl Frontend for MyFrontend {
///     async fn run(&mut self, handle: SessionHandle) -> Result<()> {
///         let mut events = handle.subscribe(runtime::Topic::Intent);
///
///         while let Ok(_event) = events.recv().await {
///             // Render UI, handle input, etc.
///         }
///
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Frontend: Send {
    /// Run the frontend event loop until the user quits.
    async fn run(&mut self, handle: SessionHandle) -> Result<()>;
}
