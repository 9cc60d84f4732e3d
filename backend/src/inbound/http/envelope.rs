//! Success envelope shared by every JSON endpoint.
//!
//! ```text
//! {"status":"success","message":"order obtained successfully","data":{...}}
//! ```
//!
//! Failures never use the envelope; they serialise the domain error as-is.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;
use utoipa::ToSchema;

/// Outcome marker on successful responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EnvelopeStatus {
    /// The operation completed.
    Success,
}

/// Successful response body.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    status: EnvelopeStatus,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    /// Wrap `data` with a human-readable `message`.
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Render the envelope as a JSON response with `status`.
    pub fn respond(self, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(self)
    }
}

impl Envelope<()> {
    /// Envelope without a payload.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            message: message.into(),
            data: None,
        }
    }
}
