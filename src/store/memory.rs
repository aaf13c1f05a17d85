//! In-process record store.

use async_trait::async_trait;
use moka::future::Cache;

use super::RecordStore;
use crate::Result;
use crate::types::{AnalysisRecord, RecordKey};

/// Process-local [`RecordStore`].
///
/// Backed by an unbounded moka cache with no TTL: entries are never evicted
/// or expired, matching the write-once table it stands in for. Nothing is
/// persisted across restarts.
#[derive(Clone)]
pub struct MemoryStore {
    records: Cache<RecordKey, AnalysisRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: Cache::builder().build(),
        }
    }

    /// Number of stored records.
    ///
    /// Pending internal maintenance is flushed first so the count is exact.
    pub async fn len(&self) -> u64 {
        self.records.run_pending_tasks().await;
        self.records.entry_count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch(&self, key: &RecordKey) -> Result<Option<AnalysisRecord>> {
        Ok(self.records.get(key).await)
    }

    async fn put(&self, record: &AnalysisRecord) -> Result<()> {
        self.records.insert(record.key(), record.clone()).await;
        Ok(())
    }
}
