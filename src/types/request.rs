//! Invocation input.

use serde::{Deserialize, Serialize};

use super::RecordKey;
use crate::{Result, TitleLangError};

/// Input of one lookup-or-compute invocation.
///
/// Fields are optional on the wire so that a missing `RecordID` or `Title`
/// is reported as invalid input rather than a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(rename = "RecordID", default)]
    pub record_id: Option<String>,
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    /// Advisory only: stored with the record, never used for lookup.
    #[serde(rename = "OriginalLanguage", default)]
    pub original_language: Option<String>,
}

impl AnalysisRequest {
    pub fn new(record_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            record_id: Some(record_id.into()),
            title: Some(title.into()),
            original_language: None,
        }
    }

    pub fn original_language(mut self, language: impl Into<String>) -> Self {
        self.original_language = Some(language.into());
        self
    }

    /// Check that both key fields are present and non-empty.
    pub fn validate(&self) -> Result<RecordKey> {
        match (self.record_id.as_deref(), self.title.as_deref()) {
            (Some(id), Some(title)) if !id.is_empty() && !title.is_empty() => {
                Ok(RecordKey::new(id, title))
            }
            _ => Err(TitleLangError::InvalidInput(
                "RecordID and Title are required.".to_string(),
            )),
        }
    }
}
