use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use super::error_payload::ErrorPayload;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Input that parsed but breaks a rule, e.g. following yourself
    #[error("{0}")]
    Validation(String),

    /// A page number outside `1..=total_pages`
    #[error("Invalid page: page {page} does not exist, pages run from 1 to {total_pages}")]
    InvalidPage { page: i64, total_pages: i64 },

    #[error("An error occurred while accessing the database")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Failed to process password")]
    PasswordHash(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl AppError {
    pub fn code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidPage { .. } => StatusCode::BAD_REQUEST,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }

    fn error_type(&self) -> String {
        match self {
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::InvalidPage { .. } => "INVALID_PAGE",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::PasswordHash(_) => "PASSWORD_HASH_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::Forbidden(_) => "FORBIDDEN",
        }
        .to_string()
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::InvalidPage { page, total_pages } => Some(json!({
                "page": page,
                "total_pages": total_pages,
            })),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.code();
        match &self {
            AppError::DatabaseError(e) => error!("Database error: {}", e),
            AppError::PasswordHash(e) => error!("Password hashing error: {}", e),
            _ => {}
        }
        let error_response = ErrorPayload {
            message: self.to_string(),
            code: status.as_u16(),
            r#type: self.error_type(),
            details: self.details(),
        };

        (status, Json(error_response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::Validation("You cannot follow yourself".into()), StatusCode::BAD_REQUEST)]
    #[case(AppError::InvalidPage { page: 3, total_pages: 2 }, StatusCode::BAD_REQUEST)]
    #[case(AppError::Unauthorized("Login required".into()), StatusCode::UNAUTHORIZED)]
    #[case(AppError::Forbidden("not your post".into()), StatusCode::FORBIDDEN)]
    #[case(AppError::NotFound("Post 7".into()), StatusCode::NOT_FOUND)]
    #[case(AppError::DatabaseError(sqlx::Error::RowNotFound), StatusCode::INTERNAL_SERVER_ERROR)]
    fn maps_errors_to_status(#[case] error: AppError, #[case] expected: StatusCode) {
        assert_eq!(error.into_response().status(), expected);
    }

    #[test]
    fn validation_message_is_shown_verbatim() {
        let error = AppError::Validation("Passwords must match.".into());
        assert_eq!(error.to_string(), "Passwords must match.");
    }

    #[tokio::test]
    async fn invalid_page_reports_bounds_in_details() {
        let response = AppError::InvalidPage {
            page: 5,
            total_pages: 2,
        }
        .into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let payload: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(payload["type"], "INVALID_PAGE");
        assert_eq!(payload["details"], json!({"page": 5, "total_pages": 2}));
    }

    #[test]
    fn other_errors_carry_no_details() {
        assert!(AppError::NotFound("Post 7".into()).details().is_none());
    }
}
