//! Makes sure the functions a query calls exist in its container.
//!
//! A resolve first consults the cache. Only when something is unknown does it
//! list the container's catalog once, and then create whatever is still
//! missing. Creates for the same `(container, id)` are serialized, so
//! concurrent resolves register each function once.

use crate::{
    cache::ProvisioningCache,
    error::ProvisioningError,
    metrics::ProvisioningMetrics,
    retry::{RetryDisposition, RetryPolicy, log_retry},
    settings::ProvisionSettings,
};
use connectors::{catalog::FunctionCatalog, error::CatalogError};
use futures::{StreamExt, stream};
use model::{
    core::identifiers::ContainerRef,
    records::udf::{FunctionRequirement, UdfRecord, dedup_requirements},
};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};
use tracing::{debug, info, warn};

type CreateLock = Arc<tokio::sync::Mutex<()>>;

pub struct Provisioner<C: ?Sized> {
    catalog: Arc<C>,
    cache: Arc<ProvisioningCache>,
    settings: ProvisionSettings,
    retry: RetryPolicy,
    metrics: ProvisioningMetrics,
    creating: Mutex<HashMap<(ContainerRef, String), CreateLock>>,
}

impl<C: FunctionCatalog + ?Sized> Provisioner<C> {
    pub fn new(catalog: Arc<C>, cache: Arc<ProvisioningCache>, settings: ProvisionSettings) -> Self {
        let retry = settings.retry_policy();
        Self {
            catalog,
            cache,
            settings,
            retry,
            metrics: ProvisioningMetrics::new(),
            creating: Mutex::new(HashMap::new()),
        }
    }

    /// A provisioner with its own empty cache and default settings.
    pub fn with_catalog(catalog: Arc<C>) -> Self {
        Self::new(catalog, Arc::default(), ProvisionSettings::default())
    }

    pub fn cache(&self) -> &Arc<ProvisioningCache> {
        &self.cache
    }

    pub fn catalog(&self) -> &Arc<C> {
        &self.catalog
    }

    pub fn metrics(&self) -> &ProvisioningMetrics {
        &self.metrics
    }

    pub fn settings(&self) -> &ProvisionSettings {
        &self.settings
    }

    /// Ensures every requirement is registered in `container`.
    ///
    /// Returns once all needed creates have settled. Functions created before
    /// a failure stay cached.
    pub async fn resolve(
        &self,
        container: &ContainerRef,
        requirements: &[FunctionRequirement],
    ) -> Result<(), ProvisioningError> {
        let unknown = self
            .cache
            .missing(container, dedup_requirements(requirements.iter().cloned()));

        if unknown.is_empty() {
            self.metrics.record_fast_path();
            debug!(%container, functions = requirements.len(), "All functions cached");
            return Ok(());
        }

        if !container.hosts_functions() {
            self.metrics.record_failure();
            return Err(ProvisioningError::UnsupportedContainer {
                container: container.clone(),
                missing: unknown.into_iter().map(|req| req.id).collect(),
            });
        }

        self.refresh(container).await?;

        let still_missing = self.cache.missing(container, unknown);
        if still_missing.is_empty() {
            debug!(%container, "Functions found in catalog");
            return Ok(());
        }

        debug!(
            %container,
            missing = ?still_missing.iter().map(|req| req.id.as_str()).collect::<Vec<_>>(),
            "Creating functions"
        );

        let results: Vec<Result<(), ProvisioningError>> = stream::iter(still_missing)
            .map(|req| async move { self.ensure(container, &req).await })
            .buffered(self.settings.create_concurrency.max(1))
            .collect()
            .await;

        results.into_iter().collect()
    }

    /// Deletes a function from the catalog and drops it from the cache.
    pub async fn remove(&self, container: &ContainerRef, id: &str) -> Result<(), ProvisioningError> {
        let result = self
            .retry
            .run(
                || self.catalog.delete_function(container, id),
                |err| self.classify(err),
                |err, attempt| log_retry("delete_function", err, attempt),
            )
            .await
            .map_err(|err| err.into_inner());

        match result {
            Ok(()) | Err(CatalogError::NotFound(_)) => {
                self.cache.forget(container, id);
                info!(%container, id, "Removed function");
                Ok(())
            }
            Err(source) => {
                self.metrics.record_failure();
                Err(ProvisioningError::Delete {
                    container: container.clone(),
                    id: id.to_string(),
                    source,
                })
            }
        }
    }

    /// Lists the container's catalog and merges every record into the cache.
    async fn refresh(&self, container: &ContainerRef) -> Result<(), ProvisioningError> {
        let records = self
            .retry
            .run(
                || {
                    self.metrics.record_list_call();
                    self.catalog.list_functions(container)
                },
                |err| self.classify(err),
                |err, attempt| log_retry("list_functions", err, attempt),
            )
            .await
            .map_err(|err| {
                self.metrics.record_failure();
                ProvisioningError::List {
                    container: container.clone(),
                    source: err.into_inner(),
                }
            })?;

        debug!(%container, count = records.len(), catalog = self.catalog.name(), "Listed functions");
        self.cache.merge(container, records);
        Ok(())
    }

    async fn ensure(
        &self,
        container: &ContainerRef,
        requirement: &FunctionRequirement,
    ) -> Result<(), ProvisioningError> {
        let key = (container.clone(), requirement.id.clone());
        let lock = self.create_lock(&key);

        let result = {
            let _guard = lock.lock().await;
            self.ensure_locked(container, requirement).await
        };

        self.release_lock(&key, &lock);
        result
    }

    async fn ensure_locked(
        &self,
        container: &ContainerRef,
        requirement: &FunctionRequirement,
    ) -> Result<(), ProvisioningError> {
        if self.cache.has(container, &requirement.id) {
            debug!(%container, id = %requirement.id, "Function created by a concurrent resolve");
            return Ok(());
        }

        match self.create(container, requirement).await {
            Ok(record) => {
                info!(%container, id = %record.id, handle = %record.handle, "Created function");
                self.metrics.record_created();
                self.cache.put(container, record);
                Ok(())
            }
            Err(err) if err.is_conflict() && self.settings.recover_conflicts => {
                warn!(%container, id = %requirement.id, "Function already exists; refreshing catalog");
                self.refresh(container).await?;

                if self.cache.has(container, &requirement.id) {
                    self.metrics.record_conflict_recovered();
                    Ok(())
                } else {
                    self.create_failed(container, requirement, err)
                }
            }
            Err(err) => self.create_failed(container, requirement, err),
        }
    }

    async fn create(
        &self,
        container: &ContainerRef,
        requirement: &FunctionRequirement,
    ) -> Result<UdfRecord, CatalogError> {
        self.retry
            .run(
                || {
                    self.metrics.record_create_call();
                    self.catalog.create_function(container, requirement)
                },
                |err| self.classify(err),
                |err, attempt| log_retry("create_function", err, attempt),
            )
            .await
            .map_err(|err| err.into_inner())
    }

    fn create_failed(
        &self,
        container: &ContainerRef,
        requirement: &FunctionRequirement,
        source: CatalogError,
    ) -> Result<(), ProvisioningError> {
        warn!(%container, id = %requirement.id, error = %source, "Failed to create function");
        self.metrics.record_failure();
        Err(ProvisioningError::Create {
            container: container.clone(),
            id: requirement.id.clone(),
            source,
        })
    }

    fn classify(&self, err: &CatalogError) -> RetryDisposition {
        let disposition = RetryDisposition::for_catalog(err);
        if disposition == RetryDisposition::Retry {
            self.metrics.record_transient_failure();
        }
        disposition
    }

    fn create_lock(&self, key: &(ContainerRef, String)) -> CreateLock {
        let mut creating = self.creating.lock().unwrap_or_else(PoisonError::into_inner);
        creating.entry(key.clone()).or_default().clone()
    }

    /// Drops the lock entry once no other resolve is waiting on it.
    fn release_lock(&self, key: &(ContainerRef, String), lock: &CreateLock) {
        let mut creating = self.creating.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(current) = creating.get(key)
            && Arc::ptr_eq(current, lock)
            && Arc::strong_count(lock) == 2
        {
            creating.remove(key);
        }
    }

    #[cfg(test)]
    fn pending_locks(&self) -> usize {
        self.creating.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}
