pub mod config;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use services::notice::ErrorNotice;
use services::store::DashboardStore;
use services::upstream::DashboardSource;

/// Shared application state passed to all Axum handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: config::AppConfig,
    pub source: Arc<dyn DashboardSource>,
    pub dashboard: Arc<DashboardStore>,
    pub notice: ErrorNotice,
}

impl AppState {
    pub fn new(config: config::AppConfig, source: Arc<dyn DashboardSource>) -> Self {
        let notice = ErrorNotice::new(Duration::from_millis(config.error_display_ms));
        Self {
            config,
            source,
            dashboard: Arc::new(DashboardStore::new()),
            notice,
        }
    }
}
