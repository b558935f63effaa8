//! Backing entity definitions: table, primary key and typed columns a resource reads and writes.

use serde::Serialize;

/// PostgreSQL column type, used for DDL, placeholder casts and row decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SqlType {
    BigSerial,
    Text,
    Boolean,
    TimestampTz,
}

impl SqlType {
    /// DDL type name.
    pub fn ddl(self) -> &'static str {
        match self {
            SqlType::BigSerial => "BIGSERIAL",
            SqlType::Text => "TEXT",
            SqlType::Boolean => "BOOLEAN",
            SqlType::TimestampTz => "TIMESTAMPTZ",
        }
    }

    /// Cast suffix for bound parameters.
    pub fn cast(self) -> &'static str {
        match self {
            SqlType::BigSerial => "bigint",
            SqlType::Text => "text",
            SqlType::Boolean => "boolean",
            SqlType::TimestampTz => "timestamptz",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: SqlType,
    pub nullable: bool,
    /// SQL default expression, e.g. `FALSE` or `NOW()`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
}

impl ColumnDef {
    pub const fn new(name: &'static str, sql_type: SqlType) -> Self {
        Self {
            name,
            sql_type,
            nullable: false,
            default: None,
        }
    }

    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub const fn default(mut self, expression: &'static str) -> Self {
        self.default = Some(expression);
        self
    }
}

/// Column names maintained by the store when `timestamps` is set.
pub const CREATED_AT: &str = "created_at";
pub const UPDATED_AT: &str = "updated_at";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ModelDefinition {
    pub table: &'static str,
    pub primary_key: &'static str,
    pub columns: Vec<ColumnDef>,
    /// `created_at` is set on insert and `updated_at` refreshed on every update.
    pub timestamps: bool,
}

impl ModelDefinition {
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Columns the store manages itself and never accepts from a form.
    pub fn is_managed(&self, name: &str) -> bool {
        name == self.primary_key || (self.timestamps && (name == CREATED_AT || name == UPDATED_AT))
    }
}

/// A persisted entity type that a resource can be bound to.
pub trait Model {
    fn definition() -> ModelDefinition;
}
