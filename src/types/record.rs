//! Persisted analysis records and their composite key.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Confidence;

/// Composite key of a record: unique only as a `(record_id, title)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey {
    pub record_id: String,
    pub title: String,
}

impl RecordKey {
    pub fn new(record_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
            title: title.into(),
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.record_id, self.title)
    }
}

/// Parsed output of a single language-analysis call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    /// Human-readable language name, e.g. "Italian".
    pub detected_language: String,
    /// ISO 639 code, e.g. "it".
    pub language_code: String,
    pub confidence: Confidence,
    /// Latin-1 representable transliteration of the title.
    pub transliteration: String,
    /// English translation of the title.
    pub translation: String,
}

/// The cached entity: one analysis per composite key, written once.
///
/// Serialized with the table's attribute names (`RecordID`, `Title`,
/// `DetectedCode`, ...). `Confidence` is written as a decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnalysisRecord {
    #[serde(rename = "RecordID")]
    pub record_id: String,
    pub title: String,
    /// Caller-supplied and stored as given; never validated.
    #[serde(default)]
    pub original_language: Option<String>,
    pub detected_language: String,
    pub detected_code: String,
    pub confidence: Confidence,
    pub transliteration: String,
    pub translation: String,
}

impl AnalysisRecord {
    /// Build the record persisted after a cache miss.
    pub fn new(key: RecordKey, original_language: Option<String>, result: AnalysisResult) -> Self {
        Self {
            record_id: key.record_id,
            title: key.title,
            original_language,
            detected_language: result.detected_language,
            detected_code: result.language_code,
            confidence: result.confidence,
            transliteration: result.transliteration,
            translation: result.translation,
        }
    }

    /// The composite key this record is stored under.
    pub fn key(&self) -> RecordKey {
        RecordKey::new(&self.record_id, &self.title)
    }
}
