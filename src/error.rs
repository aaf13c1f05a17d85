//! titlelang error types

use crate::types::Status;

/// titlelang error types
#[derive(Debug, thiserror::Error)]
pub enum TitleLangError {
    /// Missing or empty `RecordID`/`Title` on the invocation.
    #[error("{0}")]
    InvalidInput(String),

    // Persistence errors
    #[error("store error: {0}")]
    StoreUnavailable(String),

    // Analysis service errors
    #[error("analysis service error: {0}")]
    AnalysisService(String),

    /// The service answered, but the payload is not the expected JSON object.
    /// Never partially used.
    #[error("failed to parse analysis response: {0}")]
    MalformedResponse(String),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl TitleLangError {
    /// Outward status tier for this error.
    ///
    /// Only input validation is a client error; everything else falls into
    /// the catch-all tier.
    pub fn status(&self) -> Status {
        match self {
            TitleLangError::InvalidInput(_) => Status::ClientError,
            _ => Status::Error,
        }
    }

    /// Short label used for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            TitleLangError::InvalidInput(_) => "invalid_input",
            TitleLangError::StoreUnavailable(_) => "store_unavailable",
            TitleLangError::AnalysisService(_) => "analysis_service",
            TitleLangError::MalformedResponse(_) => "malformed_response",
            TitleLangError::Configuration(_) => "configuration",
        }
    }
}

/// Result type alias for titlelang operations
pub type Result<T> = std::result::Result<T, TitleLangError>;
