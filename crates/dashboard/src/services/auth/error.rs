//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during login, registration and session checks.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] msme_core::EmailError),

    /// Email/password pair does not match a known user.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Email already belongs to a known user.
    #[error("user already exists")]
    UserExists,

    /// Registration field failed validation.
    #[error("invalid input: {0}")]
    Invalid(String),

    /// No session, or the presented token does not match it.
    #[error("not authenticated")]
    NotAuthenticated,

    /// Session storage failed.
    #[error("session error: {0}")]
    Session(#[from] RepositoryError),
}
