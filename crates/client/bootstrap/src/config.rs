//! Client runtime configuration structures and loaders.
use std::env;
use std::path::PathBuf;

/// Name of the gallery configuration file looked up in the data directory
/// when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "gallery.toml";

/// Configuration required to bootstrap a client runtime.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub data_dir: PathBuf,
    pub config_path: Option<PathBuf>,
    pub session_id: Option<String>,
    pub log_dir: Option<PathBuf>,
    /// Overrides `[view] page_size` from the gallery config.
    pub page_size: Option<usize>,
    pub channels: ChannelConfig,
    /// Path component used when rendering locations.
    pub path: String,
    /// Deep-link query restored after the first load.
    pub initial_query: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            config_path: None,
            session_id: None,
            log_dir: None,
            page_size: None,
            channels: ChannelConfig::default(),
            path: "/".to_owned(),
            initial_query: None,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `GALLERY_DATA_DIR` - Directory holding the collection files (default: `data`)
    /// - `GALLERY_CONFIG` - Gallery TOML config (default: `<data dir>/gallery.toml`)
    /// - `GALLERY_SESSION_ID` - Session identifier used for log file names
    /// - `GALLERY_LOG_DIR` - Log directory (default: platform-specific)
    /// - `GALLERY_PAGE_SIZE` - Items per page, overrides the config file
    /// - `GALLERY_EVENT_CAPACITY` - Event bus capacity per topic (default: 100)
    /// - `GALLERY_COMMAND_BUFFER` - Worker command queue size (default: 32)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(dir) = read("GALLERY_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        config.config_path = read("GALLERY_CONFIG").map(PathBuf::from);
        config.session_id = read("GALLERY_SESSION_ID");
        config.log_dir = read("GALLERY_LOG_DIR").map(PathBuf::from);
        config.page_size = read("GALLERY_PAGE_SIZE")
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .map(|size| size.max(1));

        if let Some(capacity) = read("GALLERY_EVENT_CAPACITY").and_then(|raw| raw.trim().parse::<usize>().ok()) {
            config.channels.event_capacity = capacity.max(1);
        }
        if let Some(capacity) = read("GALLERY_COMMAND_BUFFER").and_then(|raw| raw.trim().parse::<usize>().ok()) {
            config.channels.command_buffer = capacity.max(1);
        }

        config
    }

    /// Explicit config path, or the default file inside the data directory.
    pub fn resolved_config_path(&self) -> PathBuf {
        self.config_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join(DEFAULT_CONFIG_FILE))
    }

    /// Initial location for the runtime, built from the path and query.
    pub fn initial_location(&self) -> Option<String> {
        let query = self.initial_query.as_deref()?.trim();
        let query = query.strip_prefix('?').unwrap_or(query);
        if query.is_empty() {
            return None;
        }
        Some(format!("{}?{}", self.path, query))
    }
}

#[derive(Clone, Debug)]
pub struct ChannelConfig {
    pub event_capacity: usize,
    pub command_buffer: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            event_capacity: 100,
            command_buffer: 32,
        }
    }
}
