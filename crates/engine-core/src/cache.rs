//! Process-local record of functions known to exist, per container.
//!
//! Entries are added as catalogs are listed or functions created, and are
//! only removed through `forget`, `reset_container` or `reset`.

use model::{
    core::identifiers::ContainerRef,
    records::udf::{FunctionRequirement, UdfRecord},
};
use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

/// Functions of a single container, by id.
#[derive(Debug, Clone, Default)]
pub struct UdfCache {
    entries: HashMap<String, UdfRecord>,
}

impl UdfCache {
    pub fn get(&self, id: &str) -> Option<&UdfRecord> {
        self.entries.get(id)
    }

    /// Stores or replaces the record under its id.
    pub fn put(&mut self, record: UdfRecord) {
        self.entries.insert(record.id.clone(), record);
    }

    pub fn has(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn forget(&mut self, id: &str) -> Option<UdfRecord> {
        self.entries.remove(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.entries.keys().cloned().collect();
        ids.sort();
        ids
    }
}

/// Shared cache for every container a provisioner touches.
///
/// Guards are never held across an `.await`.
#[derive(Debug, Default)]
pub struct ProvisioningCache {
    containers: RwLock<HashMap<ContainerRef, UdfCache>>,
}

impl ProvisioningCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, container: &ContainerRef, id: &str) -> Option<UdfRecord> {
        self.read()
            .get(container)
            .and_then(|cache| cache.get(id))
            .cloned()
    }

    pub fn has(&self, container: &ContainerRef, id: &str) -> bool {
        self.read()
            .get(container)
            .is_some_and(|cache| cache.has(id))
    }

    pub fn put(&self, container: &ContainerRef, record: UdfRecord) {
        self.write()
            .entry(container.clone())
            .or_default()
            .put(record);
    }

    /// Merges records into the container's entries.
    pub fn merge<I>(&self, container: &ContainerRef, records: I)
    where
        I: IntoIterator<Item = UdfRecord>,
    {
        let mut containers = self.write();
        let cache = containers.entry(container.clone()).or_default();
        for record in records {
            cache.put(record);
        }
    }

    /// Requirements whose ids are not cached for `container`, order preserved.
    pub fn missing<I>(&self, container: &ContainerRef, requirements: I) -> Vec<FunctionRequirement>
    where
        I: IntoIterator<Item = FunctionRequirement>,
    {
        let containers = self.read();
        let cache = containers.get(container);
        requirements
            .into_iter()
            .filter(|req| !cache.is_some_and(|c| c.has(&req.id)))
            .collect()
    }

    pub fn forget(&self, container: &ContainerRef, id: &str) -> Option<UdfRecord> {
        self.write()
            .get_mut(container)
            .and_then(|cache| cache.forget(id))
    }

    pub fn reset_container(&self, container: &ContainerRef) {
        self.write().remove(container);
    }

    pub fn reset(&self) {
        self.write().clear();
    }

    /// Number of functions cached for `container`.
    pub fn len(&self, container: &ContainerRef) -> usize {
        self.read().get(container).map_or(0, UdfCache::len)
    }

    /// Copy of the container's current entries.
    pub fn snapshot(&self, container: &ContainerRef) -> UdfCache {
        self.read().get(container).cloned().unwrap_or_default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<ContainerRef, UdfCache>> {
        self.containers.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<ContainerRef, UdfCache>> {
        self.containers.write().unwrap_or_else(PoisonError::into_inner)
    }
}
