//! Database bootstrap: create the database if missing and the tables of every registered model.

use crate::error::AppError;
use crate::model::ModelDefinition;
use crate::panel::Panel;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// Connect to the server's `postgres` database and create the target database if it does not exist.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Create the table of every resource registered on the panel. Idempotent.
pub async fn ensure_tables(pool: &PgPool, panel: &Panel) -> Result<(), AppError> {
    for resource in panel.resources() {
        let def = resource.model();
        sqlx::query(&create_table_sql(&def)).execute(pool).await?;
        tracing::info!(table = def.table, "table ready");
    }
    Ok(())
}

/// CREATE TABLE IF NOT EXISTS for a model definition.
pub fn create_table_sql(def: &ModelDefinition) -> String {
    let mut cols: Vec<String> = def
        .columns
        .iter()
        .map(|c| {
            let mut line = format!("{} {}", quote_ident(c.name), c.sql_type.ddl());
            if !c.nullable {
                line.push_str(" NOT NULL");
            }
            if let Some(d) = c.default {
                line.push_str(" DEFAULT ");
                line.push_str(d);
            }
            line
        })
        .collect();
    cols.push(format!("PRIMARY KEY ({})", quote_ident(def.primary_key)));
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quote_ident(def.table),
        cols.join(", ")
    )
}

/// Split a connection URL into the URL of the server's `postgres` database and the target
/// database name. The name is read from the path after the authority, so a URL without a path
/// (`postgres://localhost:5432`) yields an empty name. The query string is kept.
fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let scheme_end = url
        .find("://")
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: missing scheme".into()))?
        + 3;
    let (scheme, rest) = url.split_at(scheme_end);
    let (before_query, query) = match rest.split_once('?') {
        Some((head, q)) => (head, Some(q)),
        None => (rest, None),
    };
    let (authority, path) = match before_query.split_once('/') {
        Some((auth, p)) => (auth, p),
        None => (before_query, ""),
    };
    let db_name = path.trim_matches('/').trim().to_string();
    let mut admin_url = format!("{}{}/postgres", scheme, authority);
    if let Some(q) = query {
        admin_url.push('?');
        admin_url.push_str(q);
    }
    Ok((admin_url, db_name))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;
    use crate::todo::Todo;

    #[test]
    fn todo_table_ddl() {
        assert_eq!(
            create_table_sql(&Todo::definition()),
            concat!(
                r#"CREATE TABLE IF NOT EXISTS "todos" ("#,
                r#""id" BIGSERIAL NOT NULL, "#,
                r#""title" TEXT NOT NULL, "#,
                r#""description" TEXT, "#,
                r#""is_done" BOOLEAN NOT NULL DEFAULT FALSE, "#,
                r#""created_at" TIMESTAMPTZ NOT NULL DEFAULT NOW(), "#,
                r#""updated_at" TIMESTAMPTZ NOT NULL DEFAULT NOW(), "#,
                r#"PRIMARY KEY ("id"))"#
            )
        );
    }

    #[test]
    fn admin_url_targets_postgres_db() {
        let (admin, name) = parse_db_name_from_url("postgres://u:p@localhost:5432/todo_admin?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://u:p@localhost:5432/postgres?sslmode=disable");
        assert_eq!(name, "todo_admin");
    }

    #[test]
    fn url_without_path_has_no_database_name() {
        let (admin, name) = parse_db_name_from_url("postgres://localhost").unwrap();
        assert_eq!(admin, "postgres://localhost/postgres");
        assert_eq!(name, "");

        let (admin, name) = parse_db_name_from_url("postgres://localhost:5432").unwrap();
        assert_eq!(admin, "postgres://localhost:5432/postgres");
        assert_eq!(name, "");

        let (admin, name) = parse_db_name_from_url("postgres://localhost:5432/?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://localhost:5432/postgres?sslmode=disable");
        assert_eq!(name, "");
    }

    #[test]
    fn query_without_path_is_not_a_database_name() {
        let (admin, name) = parse_db_name_from_url("postgres://localhost?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://localhost/postgres?sslmode=disable");
        assert_eq!(name, "");
    }

    #[test]
    fn url_without_scheme_is_rejected() {
        assert!(matches!(
            parse_db_name_from_url("localhost/todo_admin"),
            Err(AppError::BadRequest(_))
        ));
    }
}
