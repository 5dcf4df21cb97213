//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Non-fatal conditions
//! (the flash-message warnings of the original flows) travel in an optional
//! `warning` field instead of an error status.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": T, "warning": ... }` envelope for requests that succeed with a
/// caveat, e.g. a duplicate review submission that left state unchanged.
#[derive(Debug, Serialize)]
pub struct WarningResponse<T: Serialize> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}
