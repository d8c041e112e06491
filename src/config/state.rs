// Application state module
// Shared, read-only state handed to every connection and request

use super::types::Config;
use crate::logger::LogFormat;
use crate::storage::FileStore;

/// Application state
pub struct AppState {
    pub config: Config,
    pub store: FileStore,
    /// Parsed access log format, `None` when access logging is off
    pub access_log_format: Option<LogFormat>,
}

impl AppState {
    /// Build state from loaded configuration, rooting the store at `storage.path`
    pub fn new(config: Config) -> Self {
        let store = FileStore::new(&config.storage.path);
        let access_log_format = config
            .logging
            .access_log
            .then(|| LogFormat::parse(&config.logging.access_log_format));

        Self {
            config,
            store,
            access_log_format,
        }
    }
}
