//! Router assembly: common routes at the root, admin routes under the panel path.

mod admin;
mod common;

pub use admin::admin_routes;
pub use common::common_routes;

use crate::state::AppState;
use axum::Router;

/// The full application router.
pub fn app(state: AppState) -> Router {
    let admin_path = state.panel.path().to_string();
    let router = Router::new().merge(common_routes(state.clone()));
    if admin_path == "/" {
        router.merge(admin_routes(state))
    } else {
        router.nest(&admin_path, admin_routes(state))
    }
}
