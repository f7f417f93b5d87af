//! Application state for the web layer.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::domain::Language;
use crate::irail::LiveboardParser;
use crate::snapshot::LatestSnapshot;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The board currently on display
    pub snapshot: LatestSnapshot,

    /// Parser applied to every update
    pub parser: LiveboardParser,

    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create a new app state with no board yet.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            snapshot: LatestSnapshot::new(),
            parser: config.parser(),
            config: Arc::new(config),
        }
    }

    /// Language for a request: the requested code if given, else the default.
    pub fn language(&self, requested: Option<&str>) -> Language {
        requested.map_or(self.config.language, Language::from_code_or_default)
    }
}
