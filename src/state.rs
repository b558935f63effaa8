//! Shared application state for all routes. The panel is immutable after startup.

use crate::panel::Panel;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub panel: Arc<Panel>,
}
