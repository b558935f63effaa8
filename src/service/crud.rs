//! CRUD execution for a model against PostgreSQL.

use crate::error::AppError;
use crate::model::{ColumnDef, ModelDefinition, SqlType};
use crate::resource::Pagination;
use crate::sql::{count, delete_many, insert, select_by_id, select_page, update, ListCriteria, PgBindValue, QueryBuf};
use serde_json::{Map, Value};
use sqlx::postgres::PgRow;
use sqlx::PgPool;

/// Largest selection the delete bulk action accepts.
pub const BULK_LIMIT: usize = 100;

#[derive(Debug)]
pub struct ListPage {
    pub rows: Vec<Value>,
    pub total: u64,
}

pub struct CrudService;

impl CrudService {
    /// One page of rows plus the total number of matching rows.
    pub async fn list(
        pool: &PgPool,
        def: &ModelDefinition,
        criteria: &ListCriteria<'_>,
        pagination: Pagination,
    ) -> Result<ListPage, AppError> {
        let total_q = count(def, criteria);
        tracing::debug!(sql = %total_q.sql, params = ?total_q.params, "query");
        let mut total_query = sqlx::query_scalar::<_, i64>(&total_q.sql);
        for p in &total_q.params {
            total_query = total_query.bind(PgBindValue::from_json(p));
        }
        let total = total_query.fetch_one(pool).await?;

        let q = select_page(def, criteria, pagination.per_page, pagination.offset());
        let rows = Self::query_many(pool, def, &q).await?;
        Ok(ListPage {
            rows,
            total: u64::try_from(total).unwrap_or(0),
        })
    }

    /// Fetch one row by primary key.
    pub async fn read(pool: &PgPool, def: &ModelDefinition, id: i64) -> Result<Option<Value>, AppError> {
        let q = select_by_id(def, &Value::from(id));
        Self::query_optional(pool, def, &q).await
    }

    /// Insert one validated row. Returns the created row.
    pub async fn create(pool: &PgPool, def: &ModelDefinition, body: &Map<String, Value>) -> Result<Value, AppError> {
        let q = insert(def, body);
        Self::query_optional(pool, def, &q)
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    /// Update one row by id. Returns the updated row, or None when the id does not exist.
    pub async fn update(
        pool: &PgPool,
        def: &ModelDefinition,
        id: i64,
        body: &Map<String, Value>,
    ) -> Result<Option<Value>, AppError> {
        let q = update(def, &Value::from(id), body);
        Self::query_optional(pool, def, &q).await
    }

    /// Delete the selected rows in one transaction. Returns the ids that existed and were deleted.
    pub async fn bulk_delete(pool: &PgPool, def: &ModelDefinition, ids: &[i64]) -> Result<Vec<i64>, AppError> {
        if ids.is_empty() {
            return Err(AppError::BadRequest("no records selected".into()));
        }
        if ids.len() > BULK_LIMIT {
            return Err(AppError::BadRequest(format!(
                "bulk delete limited to {} records",
                BULK_LIMIT
            )));
        }
        let q = delete_many(def, ids);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query (tx)");
        let mut tx = pool.begin().await?;
        let mut query = sqlx::query_scalar::<_, i64>(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p));
        }
        let deleted = query.fetch_all(&mut *tx).await?;
        tx.commit().await?;
        Ok(deleted)
    }

    async fn query_many(pool: &PgPool, def: &ModelDefinition, q: &QueryBuf) -> Result<Vec<Value>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p));
        }
        let rows = query.fetch_all(pool).await?;
        rows.iter().map(|r| row_to_json(r, def)).collect()
    }

    async fn query_optional(pool: &PgPool, def: &ModelDefinition, q: &QueryBuf) -> Result<Option<Value>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p));
        }
        let row = query.fetch_optional(pool).await?;
        row.map(|r| row_to_json(&r, def)).transpose()
    }
}

fn row_to_json(row: &PgRow, def: &ModelDefinition) -> Result<Value, AppError> {
    let mut map = Map::new();
    for col in &def.columns {
        map.insert(col.name.to_string(), cell_to_value(row, col)?);
    }
    Ok(Value::Object(map))
}

fn cell_to_value(row: &PgRow, col: &ColumnDef) -> Result<Value, AppError> {
    use sqlx::Row;
    let v = match col.sql_type {
        SqlType::BigSerial => row.try_get::<Option<i64>, _>(col.name)?.map(Value::from),
        SqlType::Text => row.try_get::<Option<String>, _>(col.name)?.map(Value::String),
        SqlType::Boolean => row.try_get::<Option<bool>, _>(col.name)?.map(Value::Bool),
        SqlType::TimestampTz => row
            .try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(col.name)?
            .map(|d| Value::String(d.to_rfc3339())),
    };
    Ok(v.unwrap_or(Value::Null))
}
