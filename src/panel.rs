//! Admin panel: the set of resources mounted under one path, looked up by slug.

use crate::error::ConfigError;
use crate::resource::{PageKind, Resource};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavigationItem {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub url: String,
}

pub struct Panel {
    path: String,
    resources: Vec<Arc<dyn Resource>>,
    by_slug: HashMap<String, usize>,
}

impl Panel {
    /// `path` must start with `/`; a trailing slash is dropped.
    pub fn new(path: &str) -> Result<Self, ConfigError> {
        if !path.starts_with('/') {
            return Err(ConfigError::Invalid {
                key: "ADMIN_PATH",
                message: format!("'{}' must start with '/'", path),
            });
        }
        let trimmed = path.trim_end_matches('/');
        Ok(Self {
            path: if trimmed.is_empty() { "/".into() } else { trimmed.to_string() },
            resources: Vec::new(),
            by_slug: HashMap::new(),
        })
    }

    pub fn register(mut self, resource: impl Resource + 'static) -> Result<Self, ConfigError> {
        let slug = resource.slug();
        if self.by_slug.contains_key(&slug) {
            return Err(ConfigError::DuplicateSlug(slug));
        }
        self.by_slug.insert(slug, self.resources.len());
        self.resources.push(Arc::new(resource));
        Ok(self)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn resource(&self, slug: &str) -> Option<&Arc<dyn Resource>> {
        self.by_slug.get(slug).map(|i| &self.resources[*i])
    }

    pub fn resources(&self) -> impl Iterator<Item = &Arc<dyn Resource>> {
        self.resources.iter()
    }

    /// One entry per resource with a list page, in registration order.
    pub fn navigation(&self) -> Vec<NavigationItem> {
        self.resources
            .iter()
            .filter_map(|r| {
                let slug = r.slug();
                let index = r.pages().into_iter().find(|p| p.kind == PageKind::List)?;
                Some(NavigationItem {
                    label: crate::case::plural_label(r.model_label()),
                    icon: r.navigation_icon().map(str::to_string),
                    url: index.url(&self.path, &slug),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todo::TodoResource;

    #[test]
    fn rejects_relative_path() {
        assert!(matches!(Panel::new("admin"), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn registers_and_looks_up_by_slug() {
        let panel = Panel::new("/admin/").unwrap().register(TodoResource).unwrap();
        assert_eq!(panel.path(), "/admin");
        assert!(panel.resource("todos").is_some());
        assert!(panel.resource("todo").is_none());
    }

    #[test]
    fn duplicate_slug_is_rejected() {
        let result = Panel::new("/admin")
            .unwrap()
            .register(TodoResource)
            .unwrap()
            .register(TodoResource);
        assert!(matches!(result, Err(ConfigError::DuplicateSlug(s)) if s == "todos"));
    }

    #[test]
    fn navigation_lists_index_pages() {
        let panel = Panel::new("/admin").unwrap().register(TodoResource).unwrap();
        let nav = panel.navigation();
        assert_eq!(
            nav,
            vec![NavigationItem {
                label: "Todos".into(),
                icon: Some("heroicon-o-check-circle".into()),
                url: "/admin/todos".into(),
            }]
        );
    }
}
