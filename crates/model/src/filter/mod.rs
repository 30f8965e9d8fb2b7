//! Declarative filter expressions accepted by the query compiler.
//!
//! A filter is either a raw predicate string, passed through untouched, or a
//! [`Document`] of field and logical-keyword entries. Documents can be built in
//! Rust or converted from JSON; JSON objects keep their key order.

use serde::Deserialize;

pub mod document;
pub mod error;

pub use document::{Document, Node};
pub use error::FilterError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub enum Filter {
    Raw(String),
    Document(Document),
}

impl Filter {
    pub fn raw(predicate: impl Into<String>) -> Self {
        Filter::Raw(predicate.into())
    }

    /// True when the filter selects every document.
    pub fn is_empty(&self) -> bool {
        match self {
            Filter::Raw(s) => s.is_empty(),
            Filter::Document(doc) => doc.is_empty(),
        }
    }
}

impl Default for Filter {
    fn default() -> Self {
        Filter::Document(Document::new())
    }
}

impl From<Document> for Filter {
    fn from(doc: Document) -> Self {
        Filter::Document(doc)
    }
}

impl From<Option<Filter>> for Filter {
    fn from(filter: Option<Filter>) -> Self {
        filter.unwrap_or_default()
    }
}

impl TryFrom<serde_json::Value> for Filter {
    type Error = FilterError;

    fn try_from(json: serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value as Json;
        match json {
            Json::Null => Ok(Filter::default()),
            Json::String(s) => Ok(Filter::Raw(s)),
            Json::Object(map) => Ok(Filter::Document(document_from_map(map))),
            Json::Bool(_) => Err(FilterError::UnexpectedRoot("boolean")),
            Json::Number(_) => Err(FilterError::UnexpectedRoot("number")),
            Json::Array(_) => Err(FilterError::UnexpectedRoot("array")),
        }
    }
}

impl From<serde_json::Value> for Node {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match json {
            Json::Object(map) => Node::Document(document_from_map(map)),
            Json::Array(items) => Node::List(items.into_iter().map(Node::from).collect()),
            scalar => Node::Value(scalar.into()),
        }
    }
}

fn document_from_map(map: serde_json::Map<String, serde_json::Value>) -> Document {
    map.into_iter().map(|(k, v)| (k, Node::from(v))).collect()
}
