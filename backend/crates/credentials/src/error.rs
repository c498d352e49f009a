//! Credential Error Types
//!
//! The single outcome taxonomy every use case answers with. Each variant
//! has stable user-facing wording; `InvalidCredentials` is deliberately
//! identical whether the email was unknown, the password wrong, or the
//! account deactivated, so callers cannot enumerate accounts through
//! login. Infrastructure failures are wrapped here and never reach the
//! caller with internal detail.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::notification::NotificationError;

/// Credential result type alias
pub type CredentialResult<T> = Result<T, CredentialError>;

/// Credential operation outcomes
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Email already belongs to an account
    #[error("Email is already registered")]
    DuplicateEmail,

    /// Unknown email, wrong password, or deactivated account — merged
    #[error("Either email or password is incorrect")]
    InvalidCredentials,

    /// New value equals the current one
    #[error("New value must differ from the current one")]
    NoOpChange,

    /// Confirmation field does not match
    #[error("Confirmation does not match")]
    ConfirmationMismatch,

    /// Account missing post-authentication (e.g. stale token subject)
    #[error("Account not found")]
    NotFound,

    /// No matching verification code
    #[error("Verification code is invalid")]
    CodeInvalid,

    /// Code was already consumed
    #[error("Verification code is already used")]
    CodeAlreadyUsed,

    /// Code is past its expiry window
    #[error("Verification code has expired")]
    CodeExpired,

    /// Outbound delivery failure (distinct from credential failures)
    #[error("Notification delivery failed: {0}")]
    NotificationFailed(String),

    /// Structurally invalid input
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CredentialError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CredentialError::DuplicateEmail => ErrorKind::Conflict,
            CredentialError::InvalidCredentials => ErrorKind::Unauthorized,
            CredentialError::NoOpChange | CredentialError::ConfirmationMismatch => {
                ErrorKind::UnprocessableEntity
            }
            CredentialError::NotFound => ErrorKind::NotFound,
            CredentialError::CodeInvalid => ErrorKind::BadRequest,
            CredentialError::CodeAlreadyUsed => ErrorKind::Conflict,
            CredentialError::CodeExpired => ErrorKind::Gone,
            CredentialError::NotificationFailed(_) => ErrorKind::BadGateway,
            CredentialError::MalformedInput(_) => ErrorKind::BadRequest,
            CredentialError::Database(_) | CredentialError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    ///
    /// Server-side variants keep their detail out of the user-facing
    /// message.
    pub fn to_app_error(&self) -> AppError {
        match self {
            CredentialError::Database(_) | CredentialError::Internal(_) => {
                AppError::new(self.kind(), "An internal error occurred")
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl From<AppError> for CredentialError {
    fn from(err: AppError) -> Self {
        // Value-object validation arrives as BadRequest; anything else is
        // an internal fault
        if err.kind() == ErrorKind::BadRequest {
            CredentialError::MalformedInput(err.message().to_string())
        } else {
            CredentialError::Internal(err.to_string())
        }
    }
}

impl From<NotificationError> for CredentialError {
    fn from(err: NotificationError) -> Self {
        CredentialError::NotificationFailed(err.0)
    }
}
