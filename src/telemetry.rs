//! Telemetry metric name constants.
//!
//! Consumers install their own `metrics` recorder (e.g. prometheus, statsd);
//! without a recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `titlelang_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `outcome` — lookup result: "hit", "miss" or "error"
//! - `status` — outcome of a single call: "ok" or "error"
//! - `backend` — store backend name (e.g. "memory", "file")
//! - `operation` — store operation: "fetch" or "put"

/// Total lookup-or-compute invocations.
///
/// Labels: `outcome` ("hit" | "miss" | "error").
pub const LOOKUPS_TOTAL: &str = "titlelang_lookups_total";

/// Total calls made to the analysis service.
///
/// Labels: `analyzer`, `status` ("ok" | "error").
pub const ANALYSIS_REQUESTS_TOTAL: &str = "titlelang_analysis_requests_total";

/// Analysis call duration in seconds.
///
/// Labels: `analyzer`.
pub const ANALYSIS_DURATION_SECONDS: &str = "titlelang_analysis_duration_seconds";

/// Total store operations.
///
/// Labels: `backend`, `operation` ("fetch" | "put"), `status` ("ok" | "error").
pub const STORE_OPERATIONS_TOTAL: &str = "titlelang_store_operations_total";
