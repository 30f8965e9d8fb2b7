use model::core::identifiers::ContainerRef;
use thiserror::Error;

/// Errors returned by a function catalog backend.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A function with the same id is already registered in the container.
    #[error("Function `{id}` already exists in {container}")]
    Conflict { container: ContainerRef, id: String },

    /// The container or function does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The container kind has no function catalog.
    #[error("{0} cannot host user-defined functions")]
    UnsupportedContainer(ContainerRef),

    /// The request never got a definitive answer from the store.
    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The store refused the request, e.g. an invalid function body.
    #[error("Request rejected: {0}")]
    Rejected(String),
}

impl CatalogError {
    pub fn transport<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        CatalogError::Transport(err.into())
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, CatalogError::Conflict { .. })
    }
}
