//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map each
//! [`ErrorCode`] to a protocol status; the domain never sees one.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::TraceId;

/// Header carrying the request trace identifier on every response.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Stable machine-readable failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The `Authorization` header is absent or not a bearer credential.
    MalformedCredential,
    /// The token failed signature or structural checks.
    InvalidToken,
    /// The token expiry lies in the past.
    ExpiredToken,
    /// The token no longer matches the live session for its user.
    RevokedSession,
    /// The presented password does not match the stored digest.
    InvalidCredential,
    /// A request field failed a length or format constraint.
    ValidationFailed,
    /// The package weight exceeds the hard ceiling.
    OversizeReject,
    /// The declared package size disagrees with the catalog tier.
    SizeMismatch,
    /// The requested record does not exist or is inactive.
    NotFound,
    /// The requested status is not reachable from the current one.
    InvalidTransition,
    /// The order is in a state that forbids cancellation.
    TerminalState,
    /// A refunded cancellation was requested after the refund window.
    RefundWindowExpired,
    /// The order or user store could not serve the request.
    StorageUnavailable,
    /// The session store could not serve the request.
    SessionStoreUnavailable,
    /// An unexpected failure inside the service.
    InternalError,
}

/// Domain error payload.
///
/// Construction captures the trace identifier in scope, so errors raised
/// while serving a request correlate with its logs without extra plumbing.
///
/// # Examples
/// ```
/// use delivery_service::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("order 7 does not exist");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.message(), "order 7 does not exist");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    #[schema(example = "invalid_transition")]
    code: ErrorCode,
    #[schema(example = "to make this change the order status must be collected")]
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Create an error, capturing the current trace identifier if any.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Correlation identifier captured at construction.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Structured details for adapters.
    #[must_use]
    pub const fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach a trace identifier explicitly.
    #[must_use]
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details.
    ///
    /// # Examples
    /// ```
    /// use delivery_service::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::validation_failed("sender.email is not a valid email")
    ///     .with_details(json!({ "field": "sender.email", "code": "invalid_email" }));
    /// assert!(err.details().is_some());
    /// ```
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::MalformedCredential`].
    pub fn malformed_credential(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MalformedCredential, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidToken`].
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidToken, message)
    }

    /// Convenience constructor for [`ErrorCode::ExpiredToken`].
    pub fn expired_token(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExpiredToken, message)
    }

    /// Convenience constructor for [`ErrorCode::RevokedSession`].
    pub fn revoked_session(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::RevokedSession, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidCredential`].
    pub fn invalid_credential(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidCredential, message)
    }

    /// Convenience constructor for [`ErrorCode::ValidationFailed`].
    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    /// Convenience constructor for [`ErrorCode::OversizeReject`].
    pub fn oversize_reject(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::OversizeReject, message)
    }

    /// Convenience constructor for [`ErrorCode::SizeMismatch`].
    pub fn size_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SizeMismatch, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidTransition`].
    pub fn invalid_transition(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidTransition, message)
    }

    /// Convenience constructor for [`ErrorCode::TerminalState`].
    pub fn terminal_state(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::TerminalState, message)
    }

    /// Convenience constructor for [`ErrorCode::RefundWindowExpired`].
    pub fn refund_window_expired(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::RefundWindowExpired, message)
    }

    /// Convenience constructor for [`ErrorCode::StorageUnavailable`].
    pub fn storage_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::SessionStoreUnavailable`].
    pub fn session_store_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SessionStoreUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests;
