//! titlelang - read-through cache of language analysis for media titles
//!
//! Given a record ID and a title, [`TitleLanguageService`] returns the stored
//! [`AnalysisRecord`] if there is one. Otherwise it asks a language model to
//! detect the title's language, transliterate it and translate it, stores the
//! result, and returns it. Records are written once and never updated.
//!
//! The store and the analyzer are injected, so the service runs the same
//! against [`MemoryStore`] in tests and [`FileStore`] in deployments.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use titlelang::{AnalysisRequest, FileStore, OpenAiAnalyzer, TitleLanguageService};
//!
//! #[tokio::main]
//! async fn main() -> titlelang::Result<()> {
//!     let service = TitleLanguageService::builder()
//!         .store(Arc::new(FileStore::new("TitleLanguageData.json")))
//!         .analyzer(Arc::new(OpenAiAnalyzer::new("sk-your-key")))
//!         .build()?;
//!
//!     let request = AnalysisRequest::new("7", "La Vita è Bella").original_language("Italian");
//!     let lookup = service.lookup_or_compute(&request).await?;
//!
//!     println!("{}", lookup.record().translation);
//!     Ok(())
//! }
//! ```

pub mod analysis;
#[cfg(feature = "cli")]
pub mod config;
pub mod error;
pub mod service;
pub mod store;
pub mod telemetry;
pub mod types;

// Re-export main types at crate root
pub use analysis::{LanguageAnalyzer, OpenAiAnalyzer};
pub use error::{Result, TitleLangError};
pub use service::{Lookup, ServiceBuilder, TitleLanguageService};
pub use store::{FileStore, MemoryStore, RecordStore};
pub use types::{
    AnalysisRecord, AnalysisRequest, AnalysisResult, Confidence, InvocationResponse, RecordKey,
    ResponseBody, Status,
};

/// Crate version.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
