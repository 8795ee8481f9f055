// Memory Service - append-only learning log use cases

use crate::application::constants::{DEFAULT_MEMORY_LIST_LIMIT, MAX_MEMORY_LIST_LIMIT};
use crate::domain::{MemoryEntry, MemoryKind, NewMemoryEntry};
use crate::error::Result;
use crate::port::{IdProvider, MemoryStore, TimeProvider};
use std::sync::Arc;
use tracing::info;

/// Memory Service with injected dependencies
pub struct MemoryService {
    store: Arc<dyn MemoryStore>,
    id_provider: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
}

impl MemoryService {
    pub fn new(
        store: Arc<dyn MemoryStore>,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            store,
            id_provider,
            time_provider,
        }
    }

    /// Validate and append an entry
    pub async fn record(&self, new_entry: NewMemoryEntry) -> Result<MemoryEntry> {
        new_entry.validate()?;

        let entry = new_entry.into_entry(
            self.id_provider.generate_id(),
            self.time_provider.now_millis(),
        );
        self.store.append(&entry).await?;

        info!(id = %entry.id, kind = %entry.kind, "Memory entry recorded");
        Ok(entry)
    }

    /// Newest entries first; `limit` defaults to 50 and is clamped to 1..=500
    pub async fn list(
        &self,
        limit: Option<usize>,
        kind: Option<MemoryKind>,
    ) -> Result<Vec<MemoryEntry>> {
        let limit = limit
            .unwrap_or(DEFAULT_MEMORY_LIST_LIMIT)
            .clamp(1, MAX_MEMORY_LIST_LIMIT);
        self.store.list(limit, kind).await
    }

    pub async fn count(&self) -> Result<i64> {
        self.store.count().await
    }
}
