use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};

/// Self-link of a document-store resource, e.g. `dbs/b5NCAA==/colls/b5NCAIu9NwA=/`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceLink(Arc<str>);

impl ResourceLink {
    pub fn new(link: impl Into<String>) -> Self {
        Self(Arc::from(link.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ResourceLink {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ResourceLink {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for ResourceLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parent scope that queries run against and that functions are registered in.
///
/// The caller states which kind of resource it holds; nothing is inferred from
/// the shape of the link.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerRef {
    Database(ResourceLink),
    Collection(ResourceLink),
}

impl ContainerRef {
    pub fn database(link: impl Into<ResourceLink>) -> Self {
        ContainerRef::Database(link.into())
    }

    pub fn collection(link: impl Into<ResourceLink>) -> Self {
        ContainerRef::Collection(link.into())
    }

    pub fn link(&self) -> &ResourceLink {
        match self {
            ContainerRef::Database(link) | ContainerRef::Collection(link) => link,
        }
    }

    /// Only collections carry a user-defined function catalog.
    pub fn hosts_functions(&self) -> bool {
        matches!(self, ContainerRef::Collection(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ContainerRef::Database(_) => "database",
            ContainerRef::Collection(_) => "collection",
        }
    }
}

impl fmt::Display for ContainerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.kind(), self.link())
    }
}
