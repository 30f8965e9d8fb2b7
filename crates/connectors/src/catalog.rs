use crate::error::CatalogError;
use async_trait::async_trait;
use model::{
    core::identifiers::ContainerRef,
    records::udf::{FunctionRequirement, UdfRecord},
};

/// Remote registry of user-defined functions, one per container.
#[async_trait]
pub trait FunctionCatalog: Send + Sync {
    /// Every function currently registered in `container`.
    async fn list_functions(&self, container: &ContainerRef) -> Result<Vec<UdfRecord>, CatalogError>;

    /// Registers a function. Fails with [`CatalogError::Conflict`] when the id
    /// is already taken.
    async fn create_function(
        &self,
        container: &ContainerRef,
        function: &FunctionRequirement,
    ) -> Result<UdfRecord, CatalogError>;

    async fn delete_function(&self, container: &ContainerRef, id: &str) -> Result<(), CatalogError>;

    /// Short backend name used in logs.
    fn name(&self) -> &str;
}
