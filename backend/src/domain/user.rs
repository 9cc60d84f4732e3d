//! User accounts that can sign in.
//!
//! Only the fields the session flow needs live here; profile management is
//! out of scope for this service.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::email;

const USERNAME_MAX: usize = 255;
const APPLICATION_MAX: usize = 100;

/// Validation errors raised by user value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Username was blank.
    EmptyUsername,
    /// Username exceeded the column width.
    UsernameTooLong { max: usize },
    /// Username is not an email address.
    UsernameNotEmail,
    /// Application name was blank.
    EmptyApplication,
    /// Application name exceeded the column width.
    ApplicationTooLong { max: usize },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::UsernameNotEmail => write!(f, "username must be an email address"),
            Self::EmptyApplication => write!(f, "application must not be empty"),
            Self::ApplicationTooLong { max } => {
                write!(f, "application must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Numeric user identifier assigned by the user store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Sign-in name; always an email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a username.
    ///
    /// # Examples
    /// ```
    /// use delivery_service::domain::Username;
    ///
    /// let name = Username::new("  courier@example.com ").unwrap();
    /// assert_eq!(name.as_ref(), "courier@example.com");
    /// assert!(Username::new("courier").is_err());
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if !email::is_well_formed(trimmed) {
            return Err(UserValidationError::UsernameNotEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

/// Name of the client application a user account belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Application(String);

impl Application {
    /// Validate and construct an application name.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyApplication);
        }
        if trimmed.chars().count() > APPLICATION_MAX {
            return Err(UserValidationError::ApplicationTooLong {
                max: APPLICATION_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Application {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for Application {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Application> for String {
    fn from(value: Application) -> Self {
        value.0
    }
}

/// Stored account resolved during sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    /// Store-assigned identifier.
    pub id: UserId,
    /// Sign-in name.
    pub username: Username,
    /// Owning client application.
    pub application: Application,
    /// Output of the credential hasher.
    pub password_hash: String,
}

/// Account awaiting insertion by provisioning tooling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserAccount {
    /// Sign-in name.
    pub username: Username,
    /// Owning client application.
    pub application: Application,
    /// Output of the credential hasher.
    pub password_hash: String,
    /// Operator recorded as the creator.
    pub created_by: String,
}
