//! Activity log adapter
//!
//! Implements the append-only `ActivityLogPort` over the shared in-memory
//! store. Records are kept in arrival order; reads walk the trail backwards.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use core_kernel::{ActivityLogPort, ActivityRecord, DomainPort, PortError};

use crate::memory::MemoryStore;

/// In-memory implementation of the activity log port
#[derive(Debug, Clone)]
pub struct MemoryActivityLog {
    store: Arc<MemoryStore>,
}

impl MemoryActivityLog {
    /// Creates a new adapter over the shared store
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

impl DomainPort for MemoryActivityLog {}

#[async_trait]
impl ActivityLogPort for MemoryActivityLog {
    async fn append(&self, record: ActivityRecord) -> Result<(), PortError> {
        debug!(action = ?record.action, "Appending activity record");
        let mut inner = self.store.inner.write().await;
        inner.activity.push(record);
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<ActivityRecord>, PortError> {
        let inner = self.store.inner.read().await;
        Ok(inner.activity.iter().rev().take(limit).cloned().collect())
    }
}
