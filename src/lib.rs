//! Todo admin: a declarative admin-panel resource for todos, served over HTTP with PostgreSQL storage.

pub mod case;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod panel;
pub mod resource;
pub mod response;
pub mod routes;
pub mod service;
pub mod settings;
pub mod sql;
pub mod state;
pub mod store;
pub mod todo;

pub use error::{AppError, ConfigError};
pub use model::{Model, ModelDefinition};
pub use panel::Panel;
pub use resource::Resource;
pub use routes::{admin_routes, app, common_routes};
pub use settings::Settings;
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_tables};
pub use todo::{Todo, TodoResource};
