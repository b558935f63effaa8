//! Resource handlers: list page, create header action, edit row action, delete bulk action, schema.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::resource::{BulkAction, PageKind, Pagination, Resource, ResourceSchema, RowAction};
use crate::response::{success_one, success_one_ok, success_page, PageMeta};
use crate::service::{CrudService, RequestValidator};
use crate::sql::ListCriteria;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

fn resolve(state: &AppState, slug: &str) -> Result<Arc<dyn Resource>, AppError> {
    state
        .panel
        .resource(slug)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("resource '{}'", slug)))
}

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str.parse().map_err(|_| AppError::BadRequest("invalid id".into()))
}

fn body_to_map(value: Value) -> Result<Map<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

fn require_list_page(resource: &dyn Resource) -> Result<(), AppError> {
    if resource.pages().iter().any(|p| p.kind == PageKind::List) {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("list page of '{}'", resource.slug())))
    }
}

fn require_row_action(resource: &dyn Resource, action: RowAction) -> Result<(), AppError> {
    if resource.table().has_action(action) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!("{:?} not allowed", action).to_lowercase()))
    }
}

pub async fn schema(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let resource = resolve(&state, &slug)?;
    Ok(success_one_ok(ResourceSchema::of(resource.as_ref())))
}

/// The list page: `search`, `page`, `per_page`, plus one query key per declared filter.
pub async fn list(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let resource = resolve(&state, &slug)?;
    require_list_page(resource.as_ref())?;
    let def = resource.model();
    let table = resource.table();

    let pagination = Pagination::from_query(
        params.get("page").map(String::as_str),
        params.get("per_page").map(String::as_str),
    );
    let search = params
        .get("search")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty());
    let filters: Vec<(String, Value)> = table
        .filter_list()
        .iter()
        .filter_map(|f| {
            let raw = params.get(&f.name)?;
            f.parse(raw).map(|v| (f.name.clone(), v))
        })
        .collect();
    let search_columns = table.searchable_columns();
    let criteria = ListCriteria {
        search,
        search_columns: &search_columns,
        filters: &filters,
    };

    let page = CrudService::list(&state.pool, &def, &criteria, pagination).await?;
    let rows: Vec<_> = page
        .rows
        .iter()
        .map(|r| table.render_row(def.primary_key, r))
        .collect();
    let meta = PageMeta {
        total: page.total,
        page: pagination.page,
        per_page: pagination.per_page,
        last_page: pagination.last_page(page.total),
        search: search.map(str::to_string),
    };
    Ok(success_page(rows, meta))
}

/// Create from the list page's header action, validated by the form.
pub async fn create(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    JsonBody(body): JsonBody<Value>,
) -> Result<impl IntoResponse, AppError> {
    let resource = resolve(&state, &slug)?;
    require_list_page(resource.as_ref())?;
    let data = RequestValidator::validate(body_to_map(body)?, &resource.form())?;
    let row = CrudService::create(&state.pool, &resource.model(), &data).await?;
    Ok(success_one(row))
}

/// Current record state, used to fill the edit action's form.
pub async fn read(
    State(state): State<AppState>,
    Path((slug, id_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let resource = resolve(&state, &slug)?;
    require_row_action(resource.as_ref(), RowAction::Edit)?;
    let id = parse_id(&id_str)?;
    let row = CrudService::read(&state.pool, &resource.model(), id)
        .await?
        .ok_or_else(|| AppError::NotFound(id_str))?;
    Ok(success_one_ok(row))
}

/// The edit row action: partial update validated by the form.
pub async fn update(
    State(state): State<AppState>,
    Path((slug, id_str)): Path<(String, String)>,
    JsonBody(body): JsonBody<Value>,
) -> Result<impl IntoResponse, AppError> {
    let resource = resolve(&state, &slug)?;
    require_row_action(resource.as_ref(), RowAction::Edit)?;
    let id = parse_id(&id_str)?;
    let data = RequestValidator::validate_partial(body_to_map(body)?, &resource.form())?;
    let row = CrudService::update(&state.pool, &resource.model(), id, &data)
        .await?
        .ok_or_else(|| AppError::NotFound(id_str))?;
    Ok(success_one_ok(row))
}

#[derive(Debug, Deserialize)]
pub struct BulkDeleteRequest {
    pub ids: Vec<i64>,
}

/// The delete bulk action over the selected record ids.
pub async fn bulk_delete(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    JsonBody(body): JsonBody<BulkDeleteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let resource = resolve(&state, &slug)?;
    if !resource.table().has_bulk_action(BulkAction::Delete) {
        return Err(AppError::BadRequest("delete not allowed".into()));
    }
    let deleted = CrudService::bulk_delete(&state.pool, &resource.model(), &body.ids).await?;
    tracing::info!(resource = %slug, selected = body.ids.len(), deleted = deleted.len(), "bulk delete");
    Ok(success_one_ok(json!({ "deleted": deleted.len(), "ids": deleted })))
}
