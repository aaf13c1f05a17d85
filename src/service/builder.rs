//! Builder for configuring service instances

use std::sync::Arc;

use super::TitleLanguageService;
use crate::analysis::LanguageAnalyzer;
use crate::store::RecordStore;
use crate::{Result, TitleLangError};

/// Builder for [`TitleLanguageService`].
///
/// ```rust
/// # use std::sync::Arc;
/// # use titlelang::{MemoryStore, OpenAiAnalyzer, TitleLanguageService};
/// let service = TitleLanguageService::builder()
///     .store(Arc::new(MemoryStore::new()))
///     .analyzer(Arc::new(OpenAiAnalyzer::new("sk-test")))
///     .build()
///     .unwrap();
/// assert_eq!(service.store().name(), "memory");
/// ```
#[derive(Default)]
pub struct ServiceBuilder {
    store: Option<Arc<dyn RecordStore>>,
    analyzer: Option<Arc<dyn LanguageAnalyzer>>,
}

impl ServiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the record store.
    pub fn store(mut self, store: Arc<dyn RecordStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the language analyzer used on cache misses.
    pub fn analyzer(mut self, analyzer: Arc<dyn LanguageAnalyzer>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    /// Build the service. Both a store and an analyzer are required.
    pub fn build(self) -> Result<TitleLanguageService> {
        let store = self
            .store
            .ok_or_else(|| TitleLangError::Configuration("no record store configured".into()))?;
        let analyzer = self
            .analyzer
            .ok_or_else(|| TitleLangError::Configuration("no analyzer configured".into()))?;
        Ok(TitleLanguageService::new(store, analyzer))
    }
}
