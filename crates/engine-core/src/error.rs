use connectors::error::CatalogError;
use model::{core::identifiers::ContainerRef, filter::error::FilterError};
use planner::error::CompileError;
use thiserror::Error;

/// Failure to make a query's functions available in its container.
#[derive(Debug, Error)]
pub enum ProvisioningError {
    #[error("Failed to list functions in {container}: {source}")]
    List {
        container: ContainerRef,
        #[source]
        source: CatalogError,
    },

    #[error("Failed to create function `{id}` in {container}: {source}")]
    Create {
        container: ContainerRef,
        id: String,
        #[source]
        source: CatalogError,
    },

    #[error("Failed to delete function `{id}` in {container}: {source}")]
    Delete {
        container: ContainerRef,
        id: String,
        #[source]
        source: CatalogError,
    },

    /// Functions are required but the container has no catalog.
    #[error("{container} cannot host user-defined functions (required: {})", .missing.join(", "))]
    UnsupportedContainer {
        container: ContainerRef,
        missing: Vec<String>,
    },
}

#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Provisioning(#[from] ProvisioningError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Invalid value `{value}` for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}
