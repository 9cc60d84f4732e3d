//! Authentication primitives: login credentials, bearer tokens, claims and
//! the identity handed to authenticated operations.
//!
//! Inbound adapters build these values from raw strings; services only ever
//! see the validated forms.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use zeroize::Zeroizing;

use super::{Application, UserId, Username};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Username is not an email address.
    InvalidUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::InvalidUsername => write!(f, "username must be an email address"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by the session service.
///
/// The password keeps caller-provided whitespace and is zeroed on drop.
///
/// # Examples
/// ```
/// use delivery_service::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("ops@example.com", "hunter2").unwrap();
/// assert_eq!(creds.username().as_ref(), "ops@example.com");
/// assert_eq!(creds.password(), "hunter2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: Username,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        if username.trim().is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        let parsed = Username::new(username).map_err(|_| LoginValidationError::InvalidUsername)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: parsed,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username used for the account lookup.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Password provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Bearer token extracted from an `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(Zeroizing<String>);

impl BearerToken {
    /// Parse a raw `Authorization` header value.
    ///
    /// Accepts exactly `Bearer <token>`; anything else is malformed.
    ///
    /// # Examples
    /// ```
    /// use delivery_service::domain::BearerToken;
    ///
    /// assert!(BearerToken::from_header(Some("Bearer abc.def.ghi")).is_some());
    /// assert!(BearerToken::from_header(Some("Basic abc")).is_none());
    /// assert!(BearerToken::from_header(None).is_none());
    /// ```
    #[must_use]
    pub fn from_header(header: Option<&str>) -> Option<Self> {
        let mut parts = header?.split(' ');
        match (parts.next(), parts.next(), parts.next()) {
            (Some("Bearer"), Some(token), None) if !token.is_empty() => {
                Some(Self(Zeroizing::new(token.to_owned())))
            }
            _ => None,
        }
    }

    /// Raw token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// Claims embedded in a signed access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject user identifier.
    #[serde(rename = "sub")]
    pub user_id: UserId,
    /// Sign-in name of the subject.
    #[serde(rename = "user")]
    pub username: Username,
    /// Client application of the subject.
    pub application: Application,
    /// Intended audience.
    #[serde(rename = "aud")]
    pub audience: String,
    /// Expiry in epoch seconds.
    #[serde(rename = "exp")]
    pub expires_at: i64,
    /// Identifier unique to the sign-in that minted the token.
    #[serde(rename = "jti")]
    pub token_id: Uuid,
}

impl TokenClaims {
    /// Whether the claims have expired at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now.timestamp()
    }
}

/// Validated, request-scoped identity derived from a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IdentityContext {
    /// Authenticated user identifier.
    #[schema(value_type = i64, example = 7)]
    pub user_id: UserId,
    /// Authenticated sign-in name.
    #[schema(value_type = String, example = "ops@example.com")]
    pub username: Username,
    /// Client application of the user.
    #[schema(value_type = String, example = "dispatch-console")]
    pub application: Application,
    /// Audience the token was minted for.
    pub audience: String,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
}

impl IdentityContext {
    /// Actor name stamped on audit fields.
    #[must_use]
    pub fn actor(&self) -> &str {
        self.username.as_ref()
    }
}

/// Access token issued by a successful sign-in.
#[derive(Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionGrant {
    /// Signed token for the `Authorization: Bearer` header.
    pub access_token: String,
    /// Moment the token and its session expire.
    pub expires_at: DateTime<Utc>,
}

impl fmt::Debug for SessionGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionGrant")
            .field("access_token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
