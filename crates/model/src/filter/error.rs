use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// A filter must be an object, a raw predicate string, or null.
    #[error("filter root must be an object, a string or null, found {0}")]
    UnexpectedRoot(&'static str),
}
