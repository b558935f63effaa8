use crate::response::success_many;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

/// Navigation entries of every registered resource.
pub async fn navigation(State(state): State<AppState>) -> impl IntoResponse {
    success_many(state.panel.navigation())
}
