//! Resource descriptors: a declarative binding between a model and its admin form, table and pages.

pub mod form;
pub mod pages;
pub mod table;

pub use form::*;
pub use pages::*;
pub use table::*;

use crate::case::plural_slug;
use crate::model::ModelDefinition;
use serde::Serialize;

/// Describes how one model is administered. Implementors only declare; the panel executes.
pub trait Resource: Send + Sync {
    /// Singular display name of the model, e.g. `Todo`.
    fn model_label(&self) -> &str;

    fn model(&self) -> ModelDefinition;

    fn navigation_icon(&self) -> Option<&str> {
        None
    }

    /// URL segment under the panel path. Defaults to the pluralized kebab-case model label.
    fn slug(&self) -> String {
        plural_slug(self.model_label())
    }

    fn form(&self) -> FormSchema;

    fn table(&self) -> TableSchema;

    fn pages(&self) -> Vec<PageRoute>;
}

/// Everything a front end needs to render a resource, as served by the schema endpoint.
#[derive(Debug, Serialize)]
pub struct ResourceSchema {
    pub slug: String,
    pub model_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation_icon: Option<String>,
    pub primary_key: String,
    pub form: FormSchema,
    pub table: TableSchema,
    pub pages: Vec<PageRoute>,
}

impl ResourceSchema {
    pub fn of(resource: &dyn Resource) -> Self {
        Self {
            slug: resource.slug(),
            model_label: resource.model_label().to_string(),
            navigation_icon: resource.navigation_icon().map(str::to_string),
            primary_key: resource.model().primary_key.to_string(),
            form: resource.form(),
            table: resource.table(),
            pages: resource.pages(),
        }
    }
}
