//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::session::SessionManager;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    sessions: SessionManager,
}

impl AppState {
    /// Create the application state, wiring the session manager to the
    /// configured seed labels and idle timeout.
    pub fn new(config: Config) -> Self {
        let sessions = SessionManager::new(
            config.annotator.seed_labels.clone(),
            config.annotator.session_ttl_minutes,
        );

        Self {
            inner: Arc::new(AppStateInner { config, sessions }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the session manager
    pub fn sessions(&self) -> &SessionManager {
        &self.inner.sessions
    }
}
