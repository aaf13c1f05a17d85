//! Durable JSON-file record store.
//!
//! The whole table lives in one versioned JSON document:
//!
//! ```json
//! { "version": 1, "records": [ { "RecordID": "7", "Title": "...", ... } ] }
//! ```
//!
//! Writes go to a temp file that is then renamed over the table, so readers
//! never observe a partial document. Writers within one process are
//! serialized by an async mutex; separate processes sharing a file get
//! last-writer-wins.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use super::RecordStore;
use crate::types::{AnalysisRecord, RecordKey};
use crate::{Result, TitleLangError};

/// Default table file name.
pub const DEFAULT_TABLE_NAME: &str = "TitleLanguageData.json";

/// Current on-disk format version.
const TABLE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct TableFile {
    version: u32,
    records: Vec<AnalysisRecord>,
}

/// [`RecordStore`] persisted to a single JSON file.
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open (lazily) the table at `path`. The file is created on first `put`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Default table location: `<data dir>/titlelang/TitleLanguageData.json`.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join("titlelang")
            .join(DEFAULT_TABLE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record. A missing file is an empty table; anything
    /// unreadable is an error so the table is never silently replaced.
    async fn load(&self) -> Result<Vec<AnalysisRecord>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(TitleLangError::StoreUnavailable(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )));
            }
        };
        parse_table(&content).map_err(|e| {
            TitleLangError::StoreUnavailable(format!("{}: {e}", self.path.display()))
        })
    }

    async fn save(&self, records: Vec<AnalysisRecord>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                TitleLangError::StoreUnavailable(format!(
                    "failed to create table dir {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let table = TableFile {
            version: TABLE_VERSION,
            records,
        };
        let json = serde_json::to_string_pretty(&table).map_err(|e| {
            TitleLangError::StoreUnavailable(format!("failed to serialize table: {e}"))
        })?;

        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json).await.map_err(|e| {
            TitleLangError::StoreUnavailable(format!(
                "failed to write {}: {e}",
                tmp_path.display()
            ))
        })?;
        tokio::fs::rename(&tmp_path, &self.path).await.map_err(|e| {
            TitleLangError::StoreUnavailable(format!(
                "failed to rename {} → {}: {e}",
                tmp_path.display(),
                self.path.display()
            ))
        })
    }
}

fn parse_table(json: &str) -> std::result::Result<Vec<AnalysisRecord>, String> {
    let table: TableFile =
        serde_json::from_str(json).map_err(|e| format!("corrupt table: {e}"))?;
    if table.version > TABLE_VERSION {
        return Err(format!(
            "unsupported table version {} (max supported: {TABLE_VERSION})",
            table.version
        ));
    }
    Ok(table.records)
}

#[async_trait]
impl RecordStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch(&self, key: &RecordKey) -> Result<Option<AnalysisRecord>> {
        let records = self.load().await?;
        Ok(records
            .into_iter()
            .find(|r| r.record_id == key.record_id && r.title == key.title))
    }

    async fn put(&self, record: &AnalysisRecord) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.load().await?;
        match records
            .iter_mut()
            .find(|r| r.record_id == record.record_id && r.title == record.title)
        {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        let count = records.len();
        self.save(records).await?;

        debug!(path = %self.path.display(), records = count, "table written");
        Ok(())
    }
}
