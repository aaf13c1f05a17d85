//! Public types for the titlelang API.

mod confidence;
mod record;
mod request;
mod response;

pub use confidence::Confidence;
pub use record::{AnalysisRecord, AnalysisResult, RecordKey};
pub use request::AnalysisRequest;
pub use response::{InvocationResponse, MESSAGE_FOUND, MESSAGE_STORED, ResponseBody, Status};
