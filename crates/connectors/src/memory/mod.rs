//! In-process function catalog.
//!
//! Behaves like a document store's catalog: collections must exist before
//! functions can be registered in them, ids are unique per collection, and
//! databases carry no catalog at all.

pub mod stats;

use crate::{catalog::FunctionCatalog, error::CatalogError};
use async_trait::async_trait;
use model::{
    core::identifiers::{ContainerRef, ResourceLink},
    records::udf::{FunctionRequirement, UdfRecord},
};
use stats::{CallCounts, CallStats};
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Clone, Default)]
pub struct MemoryCatalog {
    collections: Arc<RwLock<HashMap<ResourceLink, Vec<UdfRecord>>>>,
    stats: Arc<CallStats>,
    latency: Option<Duration>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collections<I, L>(links: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<ResourceLink>,
    {
        let collections = links
            .into_iter()
            .map(|link| (link.into(), Vec::new()))
            .collect();

        Self {
            collections: Arc::new(RwLock::new(collections)),
            ..Self::default()
        }
    }

    /// Delays every request, to widen race windows in tests.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub async fn add_collection(&self, link: impl Into<ResourceLink>) {
        self.collections.write().await.entry(link.into()).or_default();
    }

    /// Registers a function directly, bypassing call statistics. Stands in
    /// for a function created by another client.
    pub async fn seed(
        &self,
        container: &ContainerRef,
        function: &FunctionRequirement,
    ) -> Result<UdfRecord, CatalogError> {
        self.insert(container, function).await
    }

    /// Functions registered in `link`, in creation order.
    pub async fn functions(&self, link: &ResourceLink) -> Vec<UdfRecord> {
        self.collections
            .read()
            .await
            .get(link)
            .cloned()
            .unwrap_or_default()
    }

    pub fn calls(&self) -> CallCounts {
        self.stats.snapshot()
    }

    async fn round_trip(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    async fn insert(
        &self,
        container: &ContainerRef,
        function: &FunctionRequirement,
    ) -> Result<UdfRecord, CatalogError> {
        let link = collection_link(container)?;
        let mut collections = self.collections.write().await;
        let functions = collections
            .get_mut(link)
            .ok_or_else(|| CatalogError::NotFound(container.to_string()))?;

        if functions.iter().any(|f| f.id == function.id) {
            return Err(CatalogError::Conflict {
                container: container.clone(),
                id: function.id.clone(),
            });
        }

        let record = UdfRecord {
            id: function.id.clone(),
            body: function.body.clone(),
            handle: function_handle(link, &function.id),
        };
        functions.push(record.clone());
        Ok(record)
    }
}

#[async_trait]
impl FunctionCatalog for MemoryCatalog {
    async fn list_functions(&self, container: &ContainerRef) -> Result<Vec<UdfRecord>, CatalogError> {
        self.stats.record_list();
        self.round_trip().await;

        let link = collection_link(container)?;
        let collections = self.collections.read().await;
        let functions = collections
            .get(link)
            .ok_or_else(|| CatalogError::NotFound(container.to_string()))?;

        debug!(container = %link, count = functions.len(), "Listed functions");
        Ok(functions.clone())
    }

    async fn create_function(
        &self,
        container: &ContainerRef,
        function: &FunctionRequirement,
    ) -> Result<UdfRecord, CatalogError> {
        self.stats.record_create();
        self.round_trip().await;

        let record = self.insert(container, function).await?;
        debug!(container = %container.link(), id = %record.id, "Created function");
        Ok(record)
    }

    async fn delete_function(&self, container: &ContainerRef, id: &str) -> Result<(), CatalogError> {
        self.stats.record_delete();
        self.round_trip().await;

        let link = collection_link(container)?;
        let mut collections = self.collections.write().await;
        let functions = collections
            .get_mut(link)
            .ok_or_else(|| CatalogError::NotFound(container.to_string()))?;

        let before = functions.len();
        functions.retain(|f| f.id != id);
        if functions.len() == before {
            return Err(CatalogError::NotFound(format!("function `{id}` in {container}")));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

fn collection_link(container: &ContainerRef) -> Result<&ResourceLink, CatalogError> {
    match container {
        ContainerRef::Collection(link) => Ok(link),
        ContainerRef::Database(_) => Err(CatalogError::UnsupportedContainer(container.clone())),
    }
}

fn function_handle(link: &ResourceLink, id: &str) -> String {
    format!("{}/udfs/{id}/", link.as_str().trim_end_matches('/'))
}
