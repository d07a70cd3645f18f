//! Frontend configuration structures and loaders.
//!
//! This module contains UI-specific configuration that is shared across
//! different frontend implementations (CLI, GUI, etc.).

use std::env;

/// Frontend-specific configuration.
#[derive(Clone, Debug, Default)]
pub struct FrontendConfig {
    pub messages: MessageConfig,
    pub overlay: OverlayConfig,
}

impl FrontendConfig {
    pub const fn new(messages: MessageConfig, overlay: OverlayConfig) -> Self {
        Self { messages, overlay }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CLI_MESSAGE_CAPACITY` - Message log capacity (default: 64)
    /// - `SHOW_REJECTIONS` - Log rejected clicks (default: true)
    /// - `SHOW_RESOURCE_OVERLAY` - Mark resource tiles on the map (default: true)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(capacity) = read_env::<usize>("CLI_MESSAGE_CAPACITY") {
            config.messages.capacity = capacity.max(1);
        }
        if let Some(show) = read_env_bool("SHOW_REJECTIONS") {
            config.messages.show_rejections = show;
        }
        if let Some(show) = read_env_bool("SHOW_RESOURCE_OVERLAY") {
            config.overlay.show_resources = show;
        }

        config
    }
}

#[derive(Clone, Debug)]
pub struct MessageConfig {
    pub capacity: usize,
    /// Rejections arrive as warnings; when false they are not logged.
    pub show_rejections: bool,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            capacity: 64,
            show_rejections: true,
        }
    }
}

/// Informational map overlays. None of these affect rules.
#[derive(Clone, Debug)]
pub struct OverlayConfig {
    pub show_resources: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            show_resources: true,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
