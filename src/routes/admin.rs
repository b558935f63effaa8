//! Admin routes built from the panel. Parameterized by slug; handlers resolve the resource.

use crate::handlers::{bulk_delete, create, list, navigation, read, schema, update};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn admin_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(navigation))
        .route("/:slug", get(list).post(create))
        .route("/:slug/schema", get(schema))
        .route("/:slug/bulk-delete", post(bulk_delete))
        .route("/:slug/:id", get(read).patch(update))
        .with_state(state)
}
