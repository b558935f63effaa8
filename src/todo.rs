//! The Todo model and its admin resource.

use crate::model::{ColumnDef, Model, ModelDefinition, SqlType, CREATED_AT, UPDATED_AT};
use crate::resource::{BulkAction, Column, FormField, FormSchema, PageRoute, Resource, RowAction, TableSchema};

pub struct Todo;

impl Model for Todo {
    fn definition() -> ModelDefinition {
        ModelDefinition {
            table: "todos",
            primary_key: "id",
            columns: vec![
                ColumnDef::new("id", SqlType::BigSerial),
                ColumnDef::new("title", SqlType::Text),
                ColumnDef::new("description", SqlType::Text).nullable(),
                ColumnDef::new("is_done", SqlType::Boolean).default("FALSE"),
                ColumnDef::new(CREATED_AT, SqlType::TimestampTz).default("NOW()"),
                ColumnDef::new(UPDATED_AT, SqlType::TimestampTz).default("NOW()"),
            ],
            timestamps: true,
        }
    }
}

pub struct TodoResource;

impl Resource for TodoResource {
    fn model_label(&self) -> &str {
        "Todo"
    }

    fn model(&self) -> ModelDefinition {
        Todo::definition()
    }

    fn navigation_icon(&self) -> Option<&str> {
        Some("heroicon-o-check-circle")
    }

    fn form(&self) -> FormSchema {
        FormSchema::new(vec![
            FormField::text_input("title").required(),
            FormField::textarea("description"),
            FormField::toggle("is_done").label("Selesai?"),
        ])
    }

    fn table(&self) -> TableSchema {
        TableSchema::new(vec![
            Column::text("title").searchable(),
            Column::text("description").limit(30),
            Column::icon("is_done").boolean(),
            Column::text("created_at").date_time(),
        ])
        .filters(vec![])
        .actions(vec![RowAction::Edit])
        .bulk_actions(vec![BulkAction::Delete])
    }

    fn pages(&self) -> Vec<PageRoute> {
        vec![PageRoute::list("/")]
    }
}
