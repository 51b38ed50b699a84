use std::sync::Arc;

use forum_core::services::{AuthService, SessionService};
use forum_shared::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionService>,
    pub auth: Arc<AuthService>,
    pub config: AppConfig,
}
