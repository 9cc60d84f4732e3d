//! Request extraction failures and the unknown-route fallback.
//!
//! Actix rejects unreadable bodies, paths and query strings before a handler
//! runs. These hooks turn those rejections into the domain error payload so
//! clients see one error schema across the API.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::json;

use crate::domain::Error;
use crate::inbound::http::ApiResult;

fn invalid(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::validation_failed(message).with_details(json!({ "field": field, "code": code }))
}

fn map_json_error(err: &JsonPayloadError) -> Error {
    match err {
        JsonPayloadError::ContentType => invalid(
            "body",
            "unsupported_content_type",
            "request body must be application/json",
        ),
        JsonPayloadError::Deserialize(source) => invalid(
            "body",
            "invalid_json",
            format!("request body is invalid: {source}"),
        ),
        JsonPayloadError::Overflow { limit } | JsonPayloadError::OverflowKnownLength { limit, .. } => {
            invalid(
                "body",
                "payload_too_large",
                format!("request body exceeds {limit} bytes"),
            )
        }
        other => invalid(
            "body",
            "unreadable_body",
            format!("request body could not be read: {other}"),
        ),
    }
}

/// JSON extractor settings mapping body errors to `validation_failed`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| map_json_error(&err).into())
}

/// Path extractor settings mapping unparsable identifiers to
/// `validation_failed`.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err: PathError, _req| {
        invalid(
            "id",
            "invalid_id",
            format!("please specify a valid order id: {err}"),
        )
        .into()
    })
}

/// Query extractor settings mapping malformed flags to `validation_failed`.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req| {
        invalid(
            "refund",
            "invalid_query",
            format!("query string is invalid: {err}"),
        )
        .into()
    })
}

/// Fallback for requests that match no route.
pub async fn unknown_route(req: HttpRequest) -> ApiResult<HttpResponse> {
    Err(Error::not_found(format!(
        "route '{}' does not exist in this API",
        req.path()
    )))
}
