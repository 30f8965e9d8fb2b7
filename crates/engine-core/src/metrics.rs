use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

#[derive(Debug, Default)]
struct InnerMetrics {
    fast_path_hits: AtomicU64,
    list_calls: AtomicU64,
    create_calls: AtomicU64,
    functions_created: AtomicU64,
    conflicts_recovered: AtomicU64,
    transient_failures: AtomicU64,
    failure_count: AtomicU64,
}

/// Counters for provisioning activity. Clones share the same counters.
#[derive(Debug, Clone, Default)]
pub struct ProvisioningMetrics {
    inner: Arc<InnerMetrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProvisioningSnapshot {
    /// Resolves answered from the cache alone.
    pub fast_path_hits: u64,
    pub list_calls: u64,
    pub create_calls: u64,
    pub functions_created: u64,
    pub conflicts_recovered: u64,
    /// Catalog errors that were retried.
    pub transient_failures: u64,
    pub failure_count: u64,
}

impl ProvisioningMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_fast_path(&self) {
        self.inner.fast_path_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_list_call(&self) {
        self.inner.list_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_create_call(&self) {
        self.inner.create_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_created(&self) {
        self.inner.functions_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_conflict_recovered(&self) {
        self.inner
            .conflicts_recovered
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_transient_failure(&self) {
        self.inner
            .transient_failures
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.inner.failure_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ProvisioningSnapshot {
        ProvisioningSnapshot {
            fast_path_hits: self.inner.fast_path_hits.load(Ordering::Relaxed),
            list_calls: self.inner.list_calls.load(Ordering::Relaxed),
            create_calls: self.inner.create_calls.load(Ordering::Relaxed),
            functions_created: self.inner.functions_created.load(Ordering::Relaxed),
            conflicts_recovered: self.inner.conflicts_recovered.load(Ordering::Relaxed),
            transient_failures: self.inner.transient_failures.load(Ordering::Relaxed),
            failure_count: self.inner.failure_count.load(Ordering::Relaxed),
        }
    }
}
