// Memory Store Port
// Append-only persistence for the memory / learning log

use crate::domain::{MemoryEntry, MemoryKind};
use crate::error::Result;
use async_trait::async_trait;

/// Memory Store trait
///
/// Entries are only ever appended; there is no update or delete.
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// Append an entry
    async fn append(&self, entry: &MemoryEntry) -> Result<()>;

    /// Most recent entries first, optionally restricted to one kind
    async fn list(&self, limit: usize, kind: Option<MemoryKind>) -> Result<Vec<MemoryEntry>>;

    /// Total number of entries
    async fn count(&self) -> Result<i64>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::Mutex;

    /// Vec-backed store for tests
    #[derive(Default)]
    pub struct InMemoryMemoryStore {
        entries: Mutex<Vec<MemoryEntry>>,
    }

    impl InMemoryMemoryStore {
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl MemoryStore for InMemoryMemoryStore {
        async fn append(&self, entry: &MemoryEntry) -> Result<()> {
            self.entries.lock().unwrap().push(entry.clone());
            Ok(())
        }

        async fn list(&self, limit: usize, kind: Option<MemoryKind>) -> Result<Vec<MemoryEntry>> {
            let entries = self.entries.lock().unwrap();
            Ok(entries
                .iter()
                .rev()
                .filter(|e| kind.map_or(true, |k| e.kind == k))
                .take(limit)
                .cloned()
                .collect())
        }

        async fn count(&self) -> Result<i64> {
            Ok(self.entries.lock().unwrap().len() as i64)
        }
    }
}
