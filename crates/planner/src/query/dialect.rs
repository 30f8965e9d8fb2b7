//! Defines the `Dialect` trait for store-specific query syntax.

pub trait Dialect: Send + Sync {
    /// Returns the projection and source every compiled query starts with,
    /// without any predicate.
    ///
    /// - DocumentDB SQL uses `SELECT * FROM root r`
    fn base_query(&self) -> String;

    /// Renders a reference to a document field.
    ///
    /// - DocumentDB SQL prefixes the root alias: `r.name`
    fn field_ref(&self, field: &str) -> String;

    /// Returns the name of the dialect (e.g., "DocumentDB SQL").
    fn name(&self) -> String;

    /// Wraps a predicate into a full query, or returns the base query when the
    /// predicate is empty.
    fn select_where(&self, predicate: &str) -> String {
        if predicate.is_empty() {
            self.base_query()
        } else {
            format!("{} WHERE {}", self.base_query(), predicate)
        }
    }
}

#[derive(Debug, Clone)]
pub struct DocumentDb {
    root: String,
    alias: String,
}

impl DocumentDb {
    pub fn new(root: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            alias: alias.into(),
        }
    }
}

impl Default for DocumentDb {
    fn default() -> Self {
        Self::new("root", "r")
    }
}

impl Dialect for DocumentDb {
    fn base_query(&self) -> String {
        format!("SELECT * FROM {} {}", self.root, self.alias)
    }

    fn field_ref(&self, field: &str) -> String {
        format!("{}.{field}", self.alias)
    }

    fn name(&self) -> String {
        "DocumentDB SQL".into()
    }
}
