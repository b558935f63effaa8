//! Builds parameterized SELECT, INSERT, UPDATE, DELETE from a model definition.

use crate::model::{ColumnDef, ModelDefinition, UPDATED_AT};
use serde_json::{Map, Value};

/// Quote identifier for PostgreSQL (safe: only from model definitions).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: Value) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// Which rows a list page shows: free-text search over some columns plus exact-match filters.
#[derive(Debug, Default)]
pub struct ListCriteria<'a> {
    pub search: Option<&'a str>,
    pub search_columns: &'a [&'a str],
    pub filters: &'a [(String, Value)],
}

fn placeholder(n: usize, col: &ColumnDef) -> String {
    format!("${}::{}", n, col.sql_type.cast())
}

fn select_column_list(def: &ModelDefinition) -> String {
    def.columns
        .iter()
        .map(|c| quoted(c.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Escape LIKE wildcards so the term matches literally.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// WHERE clause for list criteria; unknown columns are skipped. Params are appended to `q`.
fn where_clause(q: &mut QueryBuf, def: &ModelDefinition, criteria: &ListCriteria<'_>) -> String {
    let mut parts = Vec::new();

    let term = criteria.search.map(str::trim).filter(|t| !t.is_empty());
    let columns: Vec<&str> = criteria
        .search_columns
        .iter()
        .copied()
        .filter(|c| def.has_column(c))
        .collect();
    if let (Some(term), false) = (term, columns.is_empty()) {
        let n = q.push_param(Value::String(like_pattern(term)));
        let ors: Vec<String> = columns
            .iter()
            .map(|c| format!("{}::text ILIKE ${}", quoted(c), n))
            .collect();
        parts.push(format!("({})", ors.join(" OR ")));
    }

    for (name, val) in criteria.filters {
        let Some(col) = def.column(name) else { continue };
        let n = q.push_param(val.clone());
        parts.push(format!("{} = {}", quoted(col.name), placeholder(n, col)));
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", parts.join(" AND "))
    }
}

/// One page of rows ordered by primary key.
pub fn select_page(def: &ModelDefinition, criteria: &ListCriteria<'_>, limit: u32, offset: u64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_sql = where_clause(&mut q, def, criteria);
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY {} LIMIT {} OFFSET {}",
        select_column_list(def),
        quoted(def.table),
        where_sql,
        quoted(def.primary_key),
        limit,
        offset
    );
    q
}

/// Total rows matching the criteria, for pagination.
pub fn count(def: &ModelDefinition, criteria: &ListCriteria<'_>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let where_sql = where_clause(&mut q, def, criteria);
    q.sql = format!("SELECT COUNT(*) FROM {}{}", quoted(def.table), where_sql);
    q
}

/// SELECT by primary key.
pub fn select_by_id(def: &ModelDefinition, id: &Value) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.params.push(id.clone());
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = $1",
        select_column_list(def),
        quoted(def.table),
        quoted(def.primary_key)
    );
    q
}

/// INSERT the writable columns present in body; everything else falls back to column defaults.
pub fn insert(def: &ModelDefinition, body: &Map<String, Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for c in &def.columns {
        if def.is_managed(c.name) {
            continue;
        }
        let Some(val) = body.get(c.name) else { continue };
        let n = q.push_param(val.clone());
        cols.push(quoted(c.name));
        placeholders.push(placeholder(n, c));
    }
    let returning = select_column_list(def);
    q.sql = if cols.is_empty() {
        format!("INSERT INTO {} DEFAULT VALUES RETURNING {}", quoted(def.table), returning)
    } else {
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            quoted(def.table),
            cols.join(", "),
            placeholders.join(", "),
            returning
        )
    };
    q
}

/// UPDATE by id: SET only writable columns present in body, and bump `updated_at`.
pub fn update(def: &ModelDefinition, id: &Value, body: &Map<String, Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for c in &def.columns {
        if def.is_managed(c.name) {
            continue;
        }
        let Some(val) = body.get(c.name) else { continue };
        let n = q.push_param(val.clone());
        sets.push(format!("{} = {}", quoted(c.name), placeholder(n, c)));
    }
    if def.timestamps {
        sets.push(format!("{} = NOW()", quoted(UPDATED_AT)));
    }
    if sets.is_empty() {
        return select_by_id(def, id);
    }
    let id_param = q.push_param(id.clone());
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
        quoted(def.table),
        sets.join(", "),
        quoted(def.primary_key),
        id_param,
        select_column_list(def)
    );
    q
}

/// DELETE all rows whose primary key is in the bound id array. Returns deleted keys.
pub fn delete_many(def: &ModelDefinition, ids: &[i64]) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.params.push(Value::Array(ids.iter().map(|id| Value::from(*id)).collect()));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ANY($1) RETURNING {}",
        quoted(def.table),
        quoted(def.primary_key),
        quoted(def.primary_key)
    );
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;
    use crate::todo::Todo;
    use serde_json::json;

    const COLS: &str = r#""id", "title", "description", "is_done", "created_at", "updated_at""#;

    fn map(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn page_without_criteria() {
        let q = select_page(&Todo::definition(), &ListCriteria::default(), 10, 20);
        assert_eq!(
            q.sql,
            format!(r#"SELECT {} FROM "todos" ORDER BY "id" LIMIT 10 OFFSET 20"#, COLS)
        );
        assert!(q.params.is_empty());
    }

    #[test]
    fn search_is_escaped_and_shared_across_columns() {
        let criteria = ListCriteria {
            search: Some(" 50%_off "),
            search_columns: &["title", "description"],
            filters: &[],
        };
        let q = count(&Todo::definition(), &criteria);
        assert_eq!(
            q.sql,
            r#"SELECT COUNT(*) FROM "todos" WHERE ("title"::text ILIKE $1 OR "description"::text ILIKE $1)"#
        );
        assert_eq!(q.params, vec![json!("%50\\%\\_off%")]);
    }

    #[test]
    fn blank_search_and_unknown_filters_ignored() {
        let filters = vec![("nope".to_string(), json!(1)), ("is_done".to_string(), json!(true))];
        let criteria = ListCriteria {
            search: Some("   "),
            search_columns: &["title"],
            filters: &filters,
        };
        let q = count(&Todo::definition(), &criteria);
        assert_eq!(q.sql, r#"SELECT COUNT(*) FROM "todos" WHERE "is_done" = $1::boolean"#);
        assert_eq!(q.params, vec![json!(true)]);
    }

    #[test]
    fn insert_skips_managed_columns() {
        let body = map(json!({
            "title": "Write report",
            "description": null,
            "is_done": false,
            "created_at": "2020-01-01T00:00:00Z",
        }));
        let q = insert(&Todo::definition(), &body);
        assert_eq!(
            q.sql,
            format!(
                r#"INSERT INTO "todos" ("title", "description", "is_done") VALUES ($1::text, $2::text, $3::boolean) RETURNING {}"#,
                COLS
            )
        );
        assert_eq!(q.params, vec![json!("Write report"), Value::Null, json!(false)]);
    }

    #[test]
    fn update_bumps_updated_at_and_binds_id_last() {
        let q = update(&Todo::definition(), &json!(5), &map(json!({ "is_done": true })));
        assert_eq!(
            q.sql,
            format!(
                r#"UPDATE "todos" SET "is_done" = $1::boolean, "updated_at" = NOW() WHERE "id" = $2 RETURNING {}"#,
                COLS
            )
        );
        assert_eq!(q.params, vec![json!(true), json!(5)]);
    }

    #[test]
    fn delete_many_binds_array() {
        let q = delete_many(&Todo::definition(), &[3, 4]);
        assert_eq!(q.sql, r#"DELETE FROM "todos" WHERE "id" = ANY($1) RETURNING "id""#);
        assert_eq!(q.params, vec![json!([3, 4])]);
    }
}
