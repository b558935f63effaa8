//! Page routes a resource registers under its slug.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    List,
    Create,
    Edit,
    View,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageRoute {
    /// Route name, e.g. `index`.
    pub name: String,
    /// Path relative to the resource slug; `/` is the slug itself.
    pub path: String,
    pub kind: PageKind,
}

impl PageRoute {
    pub fn new(name: &str, path: &str, kind: PageKind) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            kind,
        }
    }

    pub fn list(path: &str) -> Self {
        Self::new("index", path, PageKind::List)
    }

    /// Absolute URL under `{panel_path}/{slug}`.
    pub fn url(&self, panel_path: &str, slug: &str) -> String {
        let base = format!("{}/{}", panel_path.trim_end_matches('/'), slug);
        match self.path.trim_matches('/') {
            "" => base,
            rest => format!("{}/{}", base, rest),
        }
    }
}
