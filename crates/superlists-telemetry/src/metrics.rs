//! Activity counters for list traffic.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters for list activity since process start.
#[derive(Debug, Default)]
pub struct ListMetrics {
    lists_created: AtomicU64,
    items_added: AtomicU64,
    rejected_items: AtomicU64,
}

/// Point-in-time copy of [`ListMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    /// Lists started.
    pub lists_created: u64,
    /// Items stored, including the first item of each list.
    pub items_added: u64,
    /// Submissions refused because the item text was blank.
    pub rejected_items: u64,
}

impl ListMetrics {
    /// Creates zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new list together with its first item.
    pub fn record_list_created(&self) {
        self.lists_created.fetch_add(1, Ordering::Relaxed);
        self.items_added.fetch_add(1, Ordering::Relaxed);
    }

    /// Records an item appended to an existing list.
    pub fn record_item_added(&self) {
        self.items_added.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a rejected submission.
    pub fn record_rejected(&self) {
        self.rejected_items.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the current counter values.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            lists_created: self.lists_created.load(Ordering::Relaxed),
            items_added: self.items_added.load(Ordering::Relaxed),
            rejected_items: self.rejected_items.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_metrics() {
        let metrics = ListMetrics::new();
        metrics.record_list_created();
        metrics.record_item_added();
        metrics.record_item_added();
        metrics.record_rejected();

        assert_eq!(
            metrics.snapshot(),
            MetricsSnapshot {
                lists_created: 1,
                items_added: 3,
                rejected_items: 1,
            }
        );
    }
}
