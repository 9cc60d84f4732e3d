//! Tests for domain error construction and serialisation.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(Error::malformed_credential("x"), ErrorCode::MalformedCredential, "malformed_credential")]
#[case(Error::invalid_token("x"), ErrorCode::InvalidToken, "invalid_token")]
#[case(Error::expired_token("x"), ErrorCode::ExpiredToken, "expired_token")]
#[case(Error::revoked_session("x"), ErrorCode::RevokedSession, "revoked_session")]
#[case(Error::invalid_credential("x"), ErrorCode::InvalidCredential, "invalid_credential")]
#[case(Error::validation_failed("x"), ErrorCode::ValidationFailed, "validation_failed")]
#[case(Error::oversize_reject("x"), ErrorCode::OversizeReject, "oversize_reject")]
#[case(Error::size_mismatch("x"), ErrorCode::SizeMismatch, "size_mismatch")]
#[case(Error::not_found("x"), ErrorCode::NotFound, "not_found")]
#[case(Error::invalid_transition("x"), ErrorCode::InvalidTransition, "invalid_transition")]
#[case(Error::terminal_state("x"), ErrorCode::TerminalState, "terminal_state")]
#[case(
    Error::refund_window_expired("x"),
    ErrorCode::RefundWindowExpired,
    "refund_window_expired"
)]
#[case(Error::storage_unavailable("x"), ErrorCode::StorageUnavailable, "storage_unavailable")]
#[case(
    Error::session_store_unavailable("x"),
    ErrorCode::SessionStoreUnavailable,
    "session_store_unavailable"
)]
#[case(Error::internal("x"), ErrorCode::InternalError, "internal_error")]
fn constructors_set_code_and_wire_name(
    #[case] error: Error,
    #[case] code: ErrorCode,
    #[case] wire: &str,
) {
    assert_eq!(error.code(), code);
    let value = serde_json::to_value(&error).expect("serialise error");
    assert_eq!(value.get("code"), Some(&json!(wire)));
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[tokio::test]
async fn new_captures_scoped_trace_id() {
    let trace_id: TraceId = "00000000-0000-0000-0000-000000000000"
        .parse()
        .expect("valid uuid");
    let error = TraceId::scope(trace_id, async { Error::not_found("missing") }).await;
    assert_eq!(error.trace_id(), Some("00000000-0000-0000-0000-000000000000"));
}

#[rstest]
fn serialises_camel_case_and_skips_empty_fields() {
    let error = Error::validation_failed("bad").with_trace_id("abc");
    let value = serde_json::to_value(&error).expect("serialise error");
    assert_eq!(
        value,
        json!({ "code": "validation_failed", "message": "bad", "traceId": "abc" })
    );
}

#[rstest]
fn details_round_trip_through_json() {
    let error = Error::validation_failed("bad")
        .with_details(json!({ "field": "sender.email", "code": "invalid_email" }));
    let encoded = serde_json::to_string(&error).expect("serialise error");
    let decoded: Error = serde_json::from_str(&encoded).expect("deserialise error");
    assert_eq!(decoded, error);
}

#[rstest]
fn display_uses_message() {
    assert_eq!(Error::terminal_state("nope").to_string(), "nope");
}
