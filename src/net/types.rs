//! Wire types shared by the HTTP layer and the resource services.
//!
//! ERROR HANDLING
//! ==============
//! Every failure that leaves the HTTP layer is an [`ApiError`]. Status errors
//! carry the server-provided `message` when the body has one, so callers can
//! put it straight into a toast.

use serde::{Deserialize, Serialize};

use crate::router::permissions::PermissionId;

// =============================================================================
// ERROR
// =============================================================================

/// Normalized error produced by every API call.
///
/// `Clone` because a single refresh failure is delivered to every request
/// queued behind it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The per-request transport timeout elapsed.
    #[error("request timed out")]
    Timeout,

    /// Connection-level failure (DNS, refused, reset, TLS).
    #[error("network error: {0}")]
    Transport(String),

    /// The response body did not match the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The configured base URL or request path could not form a URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),

    /// The refresh this request was queued behind never settled.
    #[error("token refresh abandoned")]
    RefreshAbandoned,
}

impl ApiError {
    /// HTTP status for [`ApiError::Status`], `None` otherwise.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Error body returned by the API: `{ "message": "..." }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// AUTH PAYLOADS
// =============================================================================

/// `POST /v1/auth/sign-in` body. Tokens come back as cookies, never in the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

impl SignInRequest {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }
}

/// `GET /v1/auth/me` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeResponse {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub permissions: Vec<PermissionId>,
}

// =============================================================================
// LIST ENVELOPE
// =============================================================================

/// Pagination metadata attached to every list response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev_cursor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,
}

/// `{ data, meta }` envelope returned by `/gen/v1/<resource>` list calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: Meta,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
