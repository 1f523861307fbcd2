use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::views;

/// Account outcomes the user can recover from. Handlers show these as a
/// flash message; they never become an error page.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Username is required")]
    UsernameRequired,

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Invalid login credentials")]
    InvalidCredentials,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Feedback not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing failed: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Session token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Session lifetime of {0}s is out of range")]
    SessionLifetime(u64),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Database(_)
            | AppError::PasswordHash(_)
            | AppError::Token(_)
            | AppError::SessionLifetime(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Internal details are logged, never rendered.
        let message = if status.is_server_error() {
            tracing::error!("{}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, views::error_page(status, &message)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejections_carry_user_facing_text() {
        assert_eq!(Rejection::PasswordMismatch.to_string(), "Passwords do not match");
        assert_eq!(Rejection::UsernameTaken.to_string(), "Username already exists");
        assert_eq!(Rejection::InvalidCredentials.to_string(), "Invalid login credentials");
    }

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(AppError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Database(sqlx::Error::PoolTimedOut).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::SessionLifetime(u64::MAX).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
