//! Lookup-or-compute orchestrator.
//!
//! [`TitleLanguageService`] is a read-through cache over a [`RecordStore`]
//! with a [`LanguageAnalyzer`] as the fallback source:
//!
//! 1. validate the request (`RecordID` and `Title` non-empty)
//! 2. fetch by composite key, returning a hit unchanged
//! 3. on a miss, analyze the title
//! 4. persist the new record, then return it
//!
//! Each invocation is independent and strictly sequential. Concurrent misses
//! on the same key are not coordinated: both analyze and both write the same
//! record.
//!
//! A record is only returned once durably stored. If the write after a
//! successful analysis fails, the analysis result is dropped and the store
//! error is returned.

mod builder;

pub use builder::ServiceBuilder;

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::analysis::LanguageAnalyzer;
use crate::store::RecordStore;
use crate::types::{AnalysisRecord, AnalysisRequest, InvocationResponse, RecordKey};
use crate::{Result, telemetry};

/// Outcome of a successful invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// The record was already stored.
    Found(AnalysisRecord),
    /// The record was computed and stored by this invocation.
    Computed(AnalysisRecord),
}

impl Lookup {
    pub fn record(&self) -> &AnalysisRecord {
        match self {
            Lookup::Found(r) | Lookup::Computed(r) => r,
        }
    }

    pub fn into_record(self) -> AnalysisRecord {
        match self {
            Lookup::Found(r) | Lookup::Computed(r) => r,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

/// Read-through cache of title language analyses.
#[derive(Clone)]
pub struct TitleLanguageService {
    store: Arc<dyn RecordStore>,
    analyzer: Arc<dyn LanguageAnalyzer>,
}

impl TitleLanguageService {
    pub fn new(store: Arc<dyn RecordStore>, analyzer: Arc<dyn LanguageAnalyzer>) -> Self {
        Self { store, analyzer }
    }

    /// Create a new builder for configuring the service.
    pub fn builder() -> ServiceBuilder {
        ServiceBuilder::new()
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    pub fn analyzer(&self) -> &Arc<dyn LanguageAnalyzer> {
        &self.analyzer
    }

    /// Return the stored record for the request's key, computing and storing
    /// it first on a miss.
    #[instrument(
        skip(self, request),
        fields(record_id = ?request.record_id, title = ?request.title)
    )]
    pub async fn lookup_or_compute(&self, request: &AnalysisRequest) -> Result<Lookup> {
        let result = self.run(request).await;

        let outcome = match &result {
            Ok(Lookup::Found(_)) => "hit",
            Ok(Lookup::Computed(_)) => "miss",
            Err(_) => "error",
        };
        metrics::counter!(telemetry::LOOKUPS_TOTAL, "outcome" => outcome).increment(1);

        result
    }

    /// Outermost boundary: every outcome becomes an [`InvocationResponse`].
    pub async fn handle(&self, request: AnalysisRequest) -> InvocationResponse {
        match self.lookup_or_compute(&request).await {
            Ok(Lookup::Found(record)) => InvocationResponse::found(record),
            Ok(Lookup::Computed(record)) => InvocationResponse::stored(record),
            Err(e) => {
                warn!(error = %e, kind = e.kind(), "invocation failed");
                InvocationResponse::failure(&e)
            }
        }
    }

    async fn run(&self, request: &AnalysisRequest) -> Result<Lookup> {
        let key = request.validate()?;

        if let Some(record) = self.fetch(&key).await? {
            debug!(%key, "record found");
            return Ok(Lookup::Found(record));
        }

        debug!(%key, analyzer = self.analyzer.name(), "record missing, analyzing");
        let analysis = self.analyzer.analyze(&key.title).await?;

        let record = AnalysisRecord::new(key, request.original_language.clone(), analysis);
        self.put(&record).await?;

        info!(
            key = %record.key(),
            language = %record.detected_language,
            confidence = %record.confidence,
            "record processed and stored"
        );
        Ok(Lookup::Computed(record))
    }

    async fn fetch(&self, key: &RecordKey) -> Result<Option<AnalysisRecord>> {
        let result = self.store.fetch(key).await;
        self.record_store_op("fetch", result.is_ok());
        result
    }

    async fn put(&self, record: &AnalysisRecord) -> Result<()> {
        let result = self.store.put(record).await;
        self.record_store_op("put", result.is_ok());
        result
    }

    fn record_store_op(&self, operation: &'static str, ok: bool) {
        let status = if ok { "ok" } else { "error" };
        metrics::counter!(
            telemetry::STORE_OPERATIONS_TOTAL,
            "backend" => self.store.name().to_string(),
            "operation" => operation,
            "status" => status
        )
        .increment(1);
    }
}
