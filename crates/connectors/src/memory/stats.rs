use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub(crate) struct CallStats {
    lists: AtomicU64,
    creates: AtomicU64,
    deletes: AtomicU64,
}

impl CallStats {
    pub(crate) fn record_list(&self) {
        self.lists.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_create(&self) {
        self.creates.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> CallCounts {
        CallCounts {
            lists: self.lists.load(Ordering::Relaxed),
            creates: self.creates.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
        }
    }
}

/// Number of catalog requests served, including failed ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub lists: u64,
    pub creates: u64,
    pub deletes: u64,
}
