//! Frontend configuration structures and loaders.
//!
//! UI-specific settings shared across frontend implementations.

use std::env;

pub const DEFAULT_TITLE: &str = "Kamigotchi Gallery";

#[derive(Clone, Debug)]
pub struct FrontendConfig {
    pub title: String,
    pub messages: MessageConfig,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_owned(),
            messages: MessageConfig::default(),
        }
    }
}

impl FrontendConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `GALLERY_TITLE` - Banner shown by the frontend (default: Kamigotchi Gallery)
    /// - `GALLERY_MESSAGE_CAPACITY` - Message log capacity (default: 64)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(title) = lookup("GALLERY_TITLE").filter(|title| !title.trim().is_empty()) {
            config.title = title;
        }
        if let Some(capacity) =
            lookup("GALLERY_MESSAGE_CAPACITY").and_then(|raw| raw.trim().parse::<usize>().ok())
        {
            config.messages.capacity = capacity.max(1);
        }

        config
    }
}

#[derive(Clone, Debug)]
pub struct MessageConfig {
    pub capacity: usize,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self { capacity: 64 }
    }
}
