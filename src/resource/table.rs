//! Table schema: display columns, filters, row actions and bulk actions of a list page.
//! Rendering turns a stored record into display cells; the list query itself lives in `sql`.

use crate::case::headline;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Rendered like `Jan 5, 2026 14:03:09`.
pub const DATE_TIME_FORMAT: &str = "%b %-d, %Y %H:%M:%S";
pub const TRUE_ICON: &str = "heroicon-o-check-circle";
pub const FALSE_ICON: &str = "heroicon-o-x-circle";
pub const PER_PAGE_OPTIONS: [u32; 4] = [5, 10, 25, 50];
pub const DEFAULT_PER_PAGE: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Text,
    Icon,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
    pub label: String,
    pub searchable: bool,
    /// Maximum display width (wide characters count as two) shown before truncating with `...`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    pub date_time: bool,
    pub boolean: bool,
}

impl Column {
    fn new(name: &str, kind: ColumnKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            label: headline(name),
            searchable: false,
            limit: None,
            date_time: false,
            boolean: false,
        }
    }

    pub fn text(name: &str) -> Self {
        Self::new(name, ColumnKind::Text)
    }

    pub fn icon(name: &str) -> Self {
        Self::new(name, ColumnKind::Icon)
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub fn limit(mut self, chars: usize) -> Self {
        self.limit = Some(chars);
        self
    }

    pub fn date_time(mut self) -> Self {
        self.date_time = true;
        self
    }

    pub fn boolean(mut self) -> Self {
        self.boolean = true;
        self
    }

    /// Display value for a cell. Null stays null; unparseable states pass through unchanged.
    pub fn format(&self, state: &Value) -> Value {
        if state.is_null() {
            return Value::Null;
        }
        match self.kind {
            ColumnKind::Icon if self.boolean => {
                if is_truthy(state) {
                    json!({ "icon": TRUE_ICON, "color": "success" })
                } else {
                    json!({ "icon": FALSE_ICON, "color": "danger" })
                }
            }
            ColumnKind::Icon => state.clone(),
            ColumnKind::Text => {
                let Some(text) = state.as_str() else {
                    return state.clone();
                };
                if self.date_time {
                    return parse_timestamp(text)
                        .map(|ts| Value::String(ts.format(DATE_TIME_FORMAT).to_string()))
                        .unwrap_or_else(|| state.clone());
                }
                match self.limit {
                    Some(n) => Value::String(truncate(text, n)),
                    None => state.clone(),
                }
            }
        }
    }
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => matches!(s.as_str(), "1" | "true" | "t"),
        _ => false,
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// Keep the longest prefix whose display width fits in `limit` columns, trim trailing
/// whitespace and append `...` when cut. Wide (CJK, emoji) characters take two columns.
pub fn truncate(text: &str, limit: usize) -> String {
    if text.width() <= limit {
        return text.to_string();
    }
    let mut used = 0;
    let mut end = 0;
    for (idx, c) in text.char_indices() {
        let w = c.width().unwrap_or(0);
        if used + w > limit {
            break;
        }
        used += w;
        end = idx + c.len_utf8();
    }
    format!("{}...", text[..end].trim_end())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// true / false / any, for boolean columns.
    Ternary,
    /// Exact match on the raw value.
    Select,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Filter {
    pub name: String,
    pub kind: FilterKind,
    pub label: String,
}

impl Filter {
    pub fn ternary(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: FilterKind::Ternary,
            label: headline(name),
        }
    }

    pub fn select(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: FilterKind::Select,
            label: headline(name),
        }
    }

    /// Query value for a raw query-string input. None means the filter is inactive.
    pub fn parse(&self, raw: &str) -> Option<Value> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match self.kind {
            FilterKind::Ternary => match raw.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => Some(Value::Bool(true)),
                "0" | "false" | "no" => Some(Value::Bool(false)),
                _ => None,
            },
            FilterKind::Select => Some(Value::String(raw.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowAction {
    Edit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkAction {
    Delete,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TableSchema {
    columns: Vec<Column>,
    filters: Vec<Filter>,
    actions: Vec<RowAction>,
    bulk_actions: Vec<BulkAction>,
}

impl TableSchema {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    pub fn filters(mut self, filters: Vec<Filter>) -> Self {
        self.filters = filters;
        self
    }

    pub fn actions(mut self, actions: Vec<RowAction>) -> Self {
        self.actions = actions;
        self
    }

    pub fn bulk_actions(mut self, bulk_actions: Vec<BulkAction>) -> Self {
        self.bulk_actions = bulk_actions;
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn filter_list(&self) -> &[Filter] {
        &self.filters
    }

    pub fn row_actions(&self) -> &[RowAction] {
        &self.actions
    }

    pub fn bulk_action_list(&self) -> &[BulkAction] {
        &self.bulk_actions
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn filter(&self, name: &str) -> Option<&Filter> {
        self.filters.iter().find(|f| f.name == name)
    }

    pub fn has_action(&self, action: RowAction) -> bool {
        self.actions.contains(&action)
    }

    pub fn has_bulk_action(&self, action: BulkAction) -> bool {
        self.bulk_actions.contains(&action)
    }

    pub fn searchable_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.searchable)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// One cell per column, in column order. Missing record keys render as null.
    pub fn render_row(&self, primary_key: &str, record: &Value) -> RenderedRow {
        let cells = self
            .columns
            .iter()
            .map(|c| {
                let state = record.get(&c.name).cloned().unwrap_or(Value::Null);
                Cell {
                    column: c.name.clone(),
                    formatted: c.format(&state),
                    state,
                }
            })
            .collect();
        RenderedRow {
            key: record.get(primary_key).cloned().unwrap_or(Value::Null),
            cells,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Cell {
    pub column: String,
    pub state: Value,
    pub formatted: Value,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderedRow {
    pub key: Value,
    pub cells: Vec<Cell>,
}

/// Page window of a list request. Out-of-range input falls back to the first page
/// and the default page size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Pagination {
    pub fn from_query(page: Option<&str>, per_page: Option<&str>) -> Self {
        let page = page
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);
        let per_page = per_page
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|p| PER_PAGE_OPTIONS.contains(p))
            .unwrap_or(DEFAULT_PER_PAGE);
        Self { page, per_page }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }

    pub fn last_page(&self, total: u64) -> u64 {
        total.div_ceil(u64::from(self.per_page)).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_appends_ellipsis_only_when_cut() {
        assert_eq!(truncate("short", 30), "short");
        let exact = "a".repeat(30);
        assert_eq!(truncate(&exact, 30), exact);
        assert_eq!(truncate("Buy milk and eggs on the way home", 10), "Buy milk a...");
        assert_eq!(truncate("Buy milk  and eggs", 9), "Buy milk...");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("héllo wörld", 5), "héllo...");
    }

    #[test]
    fn truncate_measures_display_width() {
        // each ideograph is two columns wide
        assert_eq!(truncate("日本語のタスク", 6), "日本語...");
        assert_eq!(truncate("日本語のタスク", 7), "日本語...");
        assert_eq!(truncate("日本語", 6), "日本語");
        assert_eq!(truncate("ab日本", 3), "ab...");
    }

    #[test]
    fn boolean_icon_column() {
        let col = Column::icon("is_done").boolean();
        assert_eq!(col.format(&json!(true))["icon"], TRUE_ICON);
        assert_eq!(col.format(&json!(true))["color"], "success");
        assert_eq!(col.format(&json!(false))["icon"], FALSE_ICON);
        assert_eq!(col.format(&json!(false))["color"], "danger");
        assert_eq!(col.format(&Value::Null), Value::Null);
    }

    #[test]
    fn date_time_column() {
        let col = Column::text("created_at").date_time();
        assert_eq!(
            col.format(&json!("2026-01-05T14:03:09.123+00:00")),
            json!("Jan 5, 2026 14:03:09")
        );
        assert_eq!(
            col.format(&json!("2026-10-19T23:30:00+02:00")),
            json!("Oct 19, 2026 21:30:00")
        );
        assert_eq!(col.format(&json!("not a date")), json!("not a date"));
    }

    #[test]
    fn select_filter_matches_raw_value() {
        let filter = Filter::select("priority");
        assert_eq!(filter.kind, FilterKind::Select);
        assert_eq!(filter.label, "Priority");
        assert_eq!(filter.parse(" high "), Some(json!("high")));
        assert_eq!(filter.parse("  "), None);

        let table = TableSchema::new(vec![Column::text("title")]).filters(vec![filter]);
        assert_eq!(table.filter("priority").map(|f| f.kind), Some(FilterKind::Select));
        assert!(table.filter("title").is_none());
    }

    #[test]
    fn column_label_overrides_headline_only() {
        let col = Column::icon("is_done").boolean().label("Selesai?");
        assert_eq!(col.name, "is_done");
        assert_eq!(col.label, "Selesai?");
        assert_eq!(Column::text("created_at").label, "Created at");
    }

    #[test]
    fn ternary_filter_parsing() {
        let filter = Filter::ternary("is_done");
        assert_eq!(filter.parse("true"), Some(Value::Bool(true)));
        assert_eq!(filter.parse("0"), Some(Value::Bool(false)));
        assert_eq!(filter.parse(""), None);
        assert_eq!(filter.parse("maybe"), None);
    }

    #[test]
    fn pagination_defaults_and_bounds() {
        assert_eq!(Pagination::from_query(None, None), Pagination::default());
        let p = Pagination::from_query(Some("3"), Some("25"));
        assert_eq!(p.offset(), 50);
        assert_eq!(Pagination::from_query(Some("0"), Some("7")), Pagination::default());
        assert_eq!(Pagination::from_query(Some("x"), Some("50")).per_page, 50);
    }

    #[test]
    fn last_page_never_below_one() {
        let p = Pagination::default();
        assert_eq!(p.last_page(0), 1);
        assert_eq!(p.last_page(10), 1);
        assert_eq!(p.last_page(11), 2);
    }

    #[test]
    fn render_row_follows_column_order() {
        let table = TableSchema::new(vec![
            Column::text("title").searchable(),
            Column::text("note").limit(4),
        ]);
        let row = table.render_row("id", &json!({ "id": 7, "note": "abcdefgh", "title": "t" }));
        assert_eq!(row.key, json!(7));
        assert_eq!(row.cells[0].column, "title");
        assert_eq!(row.cells[1].state, json!("abcdefgh"));
        assert_eq!(row.cells[1].formatted, json!("abcd..."));
        assert_eq!(table.searchable_columns(), vec!["title"]);
    }
}
