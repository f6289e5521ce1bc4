use sqlx::PgPool;

use crate::config::AppConfig;

/// Shared application state available to all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(db: PgPool, config: AppConfig) -> Self {
        Self { db, config }
    }
}
