//! CLI-specific configuration for the terminal frontend.
use std::env;

/// Terminal frontend configuration, separate from cross-frontend settings.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub ui: UiConfig,
}

impl CliConfig {
    /// Construct CLI configuration from environment variables.
    ///
    /// Environment variables:
    /// - `GALLERY_CLI_MESSAGE_LINES` - Messages printed after each command (default: 5)
    /// - `GALLERY_CLI_SHOW_IMAGES` - Print image URLs on cards (default: true)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(lines) = read_env::<usize>("GALLERY_CLI_MESSAGE_LINES") {
            config.ui.message_lines = lines.max(1);
        }
        if let Some(show) = read_env_bool("GALLERY_CLI_SHOW_IMAGES") {
            config.ui.show_images = show;
        }

        config
    }
}

/// Output layout settings.
#[derive(Clone, Debug)]
pub struct UiConfig {
    pub message_lines: usize,
    pub show_images: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            message_lines: 5,
            show_images: true,
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
