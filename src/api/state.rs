use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::calculate::BadgeTable;
use crate::fetch::GameApi;

#[derive(Clone)]
pub struct AppState {
    pub game_api: Arc<dyn GameApi>,
    pub badges: Arc<BadgeTable>,
    /// Allowed CORS origin, `*` for any
    pub cors_origin: String,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(game_api: Arc<dyn GameApi>, badges: BadgeTable) -> Self {
        Self {
            game_api,
            badges: Arc::new(badges),
            cors_origin: "*".to_string(),
            started_at: Utc::now(),
        }
    }

    pub fn with_cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_origin = origin.into();
        self
    }
}
