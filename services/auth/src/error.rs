//! Errors surfaced by the session store

use thiserror::Error;

/// Failure of a sign-up or sign-in attempt
///
/// The messages are shown inline next to the form that triggered them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The email is already registered
    #[error("Email already registered")]
    DuplicateEmail,

    /// No registered user matches both email and password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The submitted form failed validation
    #[error("{0}")]
    Validation(String),
}

/// Type alias for Result with AuthError
pub type AuthResult<T> = Result<T, AuthError>;
