//! Todo admin server: reads settings from the environment, ensures the database and tables exist,
//! registers the todo resource and serves the panel.
//!
//! Run from repo root: `cargo run -p todo-admin-server`

use std::sync::Arc;
use todo_admin::{app, ensure_database_exists, ensure_tables, AppState, Panel, Settings, TodoResource};
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

const MAX_BODY_BYTES: usize = 1024 * 1024;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("todo_admin=info,todo_admin_server=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    ensure_database_exists(&settings.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(settings.db_max_connections)
        .connect(&settings.database_url)
        .await?;

    let panel = Panel::new(&settings.admin_path)?.register(TodoResource)?;
    ensure_tables(&pool, &panel).await?;

    let state = AppState {
        pool,
        panel: Arc::new(panel),
    };
    let router = app(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!(
        "todo admin listening on http://{}{}",
        listener.local_addr()?,
        settings.admin_path
    );
    axum::serve(listener, router).await?;
    Ok(())
}
