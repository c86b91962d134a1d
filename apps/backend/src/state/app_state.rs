use std::sync::Arc;

use crate::directory::UserDirectory;
use crate::state::security_config::SecurityConfig;

/// Application state containing shared resources.
#[derive(Clone)]
pub struct AppState {
    /// The user directory seam; the only I/O the auth core performs.
    pub directory: Arc<dyn UserDirectory>,
    /// Immutable security configuration.
    pub security: SecurityConfig,
}

impl AppState {
    pub fn new(directory: Arc<dyn UserDirectory>, security: SecurityConfig) -> Self {
        Self {
            directory,
            security,
        }
    }
}
