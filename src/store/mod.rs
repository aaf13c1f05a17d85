//! Record store gateway.
//!
//! A [`RecordStore`] is get/put access to a persistent table keyed by
//! [`RecordKey`]. Stores are injected into
//! [`TitleLanguageService`](crate::TitleLanguageService), so the service can
//! run against [`MemoryStore`] in tests and [`FileStore`] in deployments.
//!
//! # Semantics
//!
//! - `fetch` returns `Ok(None)` for an absent key; absence is not an error.
//! - `put` writes the full record unconditionally, replacing any value at the
//!   same key. No conditional-write or locking semantics.
//! - Backend failures surface as
//!   [`StoreUnavailable`](crate::TitleLangError::StoreUnavailable) carrying the
//!   underlying message.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::Result;
use crate::types::{AnalysisRecord, RecordKey};

/// Persistent key-value access for analysis records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Backend name for logging/metrics.
    fn name(&self) -> &str;

    /// Look up a record by composite key.
    async fn fetch(&self, key: &RecordKey) -> Result<Option<AnalysisRecord>>;

    /// Write a record, overwriting whatever is stored at its key.
    async fn put(&self, record: &AnalysisRecord) -> Result<()>;
}
