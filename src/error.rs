use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Select a date range")]
    MissingRange,

    #[error("The selected range ends before it starts")]
    InvalidRange,

    #[error("The selected range contains no business days")]
    EmptyBusinessDayRange,

    #[error("Not enough vacation days left: {remaining} remaining")]
    InsufficientBalance { remaining: i32 },

    #[error("No active user")]
    NoActiveOwner,

    #[error("Auth error: {0}")]
    AuthError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden")]
    Forbidden,

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    fn status_and_code(&self) -> (actix_web::http::StatusCode, &'static str) {
        use actix_web::http::StatusCode;
        match self {
            AppError::ValidationError(_)
            | AppError::MissingRange
            | AppError::InvalidRange
            | AppError::EmptyBusinessDayRange => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::InsufficientBalance { .. } => {
                (StatusCode::BAD_REQUEST, "INSUFFICIENT_BALANCE")
            }
            AppError::NoActiveOwner | AppError::AuthError(_) | AppError::JwtError(_) => {
                (StatusCode::UNAUTHORIZED, "AUTH_ERROR")
            }
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            AppError::DatabaseError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        self.status_and_code().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code) = self.status_and_code();
        let message = match self {
            AppError::ValidationError(_)
            | AppError::MissingRange
            | AppError::InvalidRange
            | AppError::EmptyBusinessDayRange
            | AppError::InsufficientBalance { .. } => {
                log::warn!("Validation error: {self}");
                self.to_string()
            }
            AppError::NoActiveOwner | AppError::AuthError(_) | AppError::JwtError(_) => {
                log::warn!("Authentication error: {self}");
                self.to_string()
            }
            AppError::NotFound(msg) => msg.clone(),
            AppError::Forbidden => {
                log::warn!("Forbidden access");
                "Forbidden".to_string()
            }
            AppError::DatabaseError(err) => {
                log::error!("Database error: {err}");
                "Database error".to_string()
            }
        };

        let mut body = json!({
            "success": false,
            "error": {
                "code": error_code,
                "message": message
            }
        });
        // 前端需要剩余天数来提示用户
        if let AppError::InsufficientBalance { remaining } = self {
            body["error"]["remaining_days"] = json!(remaining);
        }

        HttpResponse::build(status_code).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_validation_errors_are_bad_request() {
        assert_eq!(AppError::MissingRange.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::EmptyBusinessDayRange.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InsufficientBalance { remaining: 3 }.status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_missing_owner_is_unauthorized() {
        assert_eq!(AppError::NoActiveOwner.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_insufficient_balance_message_carries_remaining() {
        let err = AppError::InsufficientBalance { remaining: 11 };
        assert!(err.to_string().contains("11"));
    }

    #[tokio::test]
    async fn test_database_error_hides_details() {
        let err = AppError::from(sea_orm::DbErr::Custom("password=hunter2".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = actix_web::body::to_bytes(err.error_response().into_body())
            .await
            .unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("DATABASE_ERROR"));
        assert!(!body.contains("hunter2"));
    }
}
