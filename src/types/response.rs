//! Invocation output.

use serde::{Serialize, Serializer};

use super::AnalysisRecord;
use crate::TitleLangError;

/// Body message when the record was already stored.
pub const MESSAGE_FOUND: &str = "Record found.";

/// Body message when the record was computed and stored by this invocation.
pub const MESSAGE_STORED: &str = "Record processed and stored.";

/// Outward status classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    /// Missing or empty input.
    ClientError,
    /// Every other failure.
    Error,
}

impl Status {
    /// HTTP-style status code: 200, 400, or the catch-all 501.
    pub fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::ClientError => 400,
            Status::Error => 501,
        }
    }

    pub fn is_ok(self) -> bool {
        self == Status::Ok
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.code())
    }
}

/// Response body: a message with the record, or an error string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Success {
        message: String,
        data: AnalysisRecord,
    },
    Failure {
        error: String,
    },
}

/// Result of one invocation, serialized as `{"statusCode": .., "body": {..}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationResponse {
    #[serde(rename = "statusCode")]
    pub status: Status,
    pub body: ResponseBody,
}

impl InvocationResponse {
    /// Cache hit.
    pub fn found(record: AnalysisRecord) -> Self {
        Self::success(MESSAGE_FOUND, record)
    }

    /// Cache miss that was computed and persisted.
    pub fn stored(record: AnalysisRecord) -> Self {
        Self::success(MESSAGE_STORED, record)
    }

    pub fn failure(err: &TitleLangError) -> Self {
        Self {
            status: err.status(),
            body: ResponseBody::Failure {
                error: err.to_string(),
            },
        }
    }

    fn success(message: &str, data: AnalysisRecord) -> Self {
        Self {
            status: Status::Ok,
            body: ResponseBody::Success {
                message: message.to_string(),
                data,
            },
        }
    }

    /// The record carried by a success body.
    pub fn record(&self) -> Option<&AnalysisRecord> {
        match &self.body {
            ResponseBody::Success { data, .. } => Some(data),
            ResponseBody::Failure { .. } => None,
        }
    }
}
