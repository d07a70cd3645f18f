//! Cross-frontend primitives for presenting the game.
//!
//! Houses message logging, event handling, formatting, and view-model types
//! that both the line-oriented client and future graphical clients can reuse.
pub mod config;
pub mod event;
pub mod format;
pub mod frontend;
pub mod message;
pub mod notifier;
pub mod view_model;

pub use config::{FrontendConfig, MessageConfig, OverlayConfig};
pub use event::{EventConsumer, EventImpact, SessionEventLog};
pub use frontend::Frontend;
pub use message::{MessageEntry, MessageLevel, MessageLog};
pub use notifier::MessageLogNotifier;
pub use view_model::{MapView, TileView, UiFrame, UnitView};
