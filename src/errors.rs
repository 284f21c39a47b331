//! Error classification

use serde::Serialize;

/// Caller-visible classification for failures surfaced by the store.
///
/// Client classes map to bad input, missing entities, and business-rule
/// rejections; everything else is surfaced as [`ErrorClass::Unexpected`]
/// without internal detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    /// Malformed or out-of-range input (non-positive quantity, missing id,
    /// negative cart total).
    InvalidArgument,

    /// Unknown product or order id.
    NotFound,

    /// An expected, recoverable rejection (used code, empty cart).
    BusinessRule,

    /// Anything else; logged and surfaced as a generic failure.
    Unexpected,
}

impl ErrorClass {
    /// True when the failure is the caller's fault rather than the store's.
    #[must_use]
    pub fn is_client_error(self) -> bool {
        !matches!(self, ErrorClass::Unexpected)
    }
}
