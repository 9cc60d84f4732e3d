//! Session API handlers.
//!
//! ```text
//! POST /api/v1/users/sign/in {"username":"ops@example.com","password":"hunter2"}
//! POST /api/v1/users/sign/out
//! GET /api/v1/users/sign/private
//! ```

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    Error, IdentityContext, LoginCredentials, LoginValidationError, SessionGrant,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::envelope::Envelope;
use crate::inbound::http::state::HttpState;

/// Sign-in request body for `POST /api/v1/users/sign/in`.
///
/// Example JSON:
/// `{"username":"ops@example.com","password":"hunter2"}`
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "ops@example.com")]
    pub username: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    let (field, code) = match err {
        LoginValidationError::EmptyUsername => ("username", "empty_username"),
        LoginValidationError::InvalidUsername => ("username", "invalid_email"),
        LoginValidationError::EmptyPassword => ("password", "empty_password"),
    };
    Error::validation_failed(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// Verify credentials and open a session, replacing any previous one.
///
/// The returned token is the only valid token for the user until it expires
/// or the user signs out or in again.
#[utoipa::path(
    post,
    path = "/api/v1/users/sign/in",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session opened; the grant is in `data`", body = SessionGrant),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Wrong username or password", body = Error),
        (status = 404, description = "Unknown user", body = Error),
        (status = 503, description = "User or session store unavailable", body = Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["users"],
    operation_id = "signIn",
    security([])
)]
#[post("/users/sign/in")]
pub async fn sign_in(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let grant = state.login.sign_in(&credentials).await?;
    Ok(Envelope::success("signed in successfully", grant).respond(StatusCode::OK))
}

/// Close the caller's session. The presented token stops working at once.
#[utoipa::path(
    post,
    path = "/api/v1/users/sign/out",
    responses(
        (status = 200, description = "Session closed"),
        (status = 401, description = "Missing, invalid or revoked token", body = Error),
        (status = 503, description = "Session store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "signOut"
)]
#[post("/users/sign/out")]
pub async fn sign_out(
    state: web::Data<HttpState>,
    caller: Authenticated,
) -> ApiResult<HttpResponse> {
    state.login.sign_out(caller.identity()).await?;
    Ok(Envelope::message_only("session deleted").respond(StatusCode::OK))
}

/// Echo the identity resolved from the bearer token.
#[utoipa::path(
    get,
    path = "/api/v1/users/sign/private",
    responses(
        (status = 200, description = "Caller identity in `data`", body = IdentityContext),
        (status = 401, description = "Missing, invalid or revoked token", body = Error),
        (status = 503, description = "Session store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentIdentity"
)]
#[get("/users/sign/private")]
pub async fn private(caller: Authenticated) -> ApiResult<HttpResponse> {
    let Authenticated(identity) = caller;
    Ok(Envelope::success("welcome to the private route", identity).respond(StatusCode::OK))
}
