//! Error handling - RFC 7807 bodies, login redirects.

use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header};
use quill_shared::ErrorResponse;
use std::fmt;

use quill_core::error::{DomainError, RepoError};
use quill_core::ports::AuthError;

/// Where anonymous callers are sent to authenticate.
pub const LOGIN_PATH: &str = "/accounts/login/";

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Forbidden,
    /// Answered with a redirect to the login page, returning to `next`.
    LoginRequired { next: String },
    Internal(String),
}

impl AppError {
    pub fn login_url(next: &str) -> String {
        format!("{LOGIN_PATH}?next={}", urlencoding::encode(next))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Forbidden => write!(f, "Forbidden"),
            AppError::LoginRequired { next } => write!(f, "Login required for {}", next),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::LoginRequired { .. } => StatusCode::FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::LoginRequired { next } => {
                return HttpResponse::Found()
                    .insert_header((header::LOCATION, Self::login_url(next)))
                    .finish();
            }
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::Forbidden => ErrorResponse::forbidden(),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, id } => {
                AppError::NotFound(format!("{} with id {} not found", entity_type, id))
            }
            DomainError::UnknownRole(role) => AppError::Internal(format!("unknown role {role}")),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(msg) => {
                tracing::error!("Database constraint violated: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_redirect_carries_next() {
        let response = AppError::LoginRequired {
            next: "/post/1/edit/".to_string(),
        }
        .error_response();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/accounts/login/?next=%2Fpost%2F1%2Fedit%2F"
        );
    }

    #[test]
    fn test_not_found_from_domain() {
        let err: AppError = DomainError::NotFound {
            entity_type: "Post",
            id: 9,
        }
        .into();

        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Not found: Post with id 9 not found");
    }

    #[test]
    fn test_repository_failures_are_hidden() {
        let err: AppError = RepoError::Query("syntax error at SELECT".to_string()).into();

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(matches!(err, AppError::Internal(detail) if detail == "Database error"));
    }
}
