use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// One failed field check, `field` being a dotted path such as `target_area.radius`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
    pub code: String,
}

/// JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Short label such as "Not found".
    pub error: String,
    pub message: String,
    /// Stable machine-readable code, e.g. `VALIDATION_ERROR`.
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationIssue>>,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {message}")]
    ValidationError {
        message: String,
        issues: Vec<ValidationIssue>,
    },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error")]
    InternalError(#[source] anyhow::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Service unavailable: {service}")]
    ServiceUnavailable { service: String, message: String },
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            issues: Vec::new(),
        }
    }

    pub fn database_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            service: "database".to_string(),
            message: message.into(),
        }
    }

    /// Status, code and label for the variant.
    fn descriptor(&self) -> (StatusCode, &'static str, &'static str) {
        match self {
            AppError::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                "Internal server error",
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error",
            ),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", "Not found"),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "Unauthorized"),
            AppError::TokenExpired => (StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED", "Token expired"),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN", "Invalid token"),
            AppError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN", "Forbidden"),
            AppError::ValidationError { .. } => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Validation error",
            ),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", "Bad request"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT", "Conflict"),
            AppError::ServiceUnavailable { .. } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                "Service unavailable",
            ),
        }
    }

    pub fn error_code(&self) -> &'static str {
        self.descriptor().1
    }

    /// Message safe to show a client. Database and internal failures stay opaque.
    pub(super) fn public_message(&self) -> String {
        match self {
            AppError::NotFound(message)
            | AppError::Forbidden(message)
            | AppError::Conflict(message)
            | AppError::BadRequest(message)
            | AppError::ValidationError { message, .. }
            | AppError::ServiceUnavailable { message, .. } => message.clone(),
            other => other.descriptor().2.to_string(),
        }
    }

    pub fn to_response_body(&self) -> ErrorResponse {
        let (_, code, label) = self.descriptor();
        let details = match self {
            AppError::ValidationError { issues, .. } if !issues.is_empty() => Some(issues.clone()),
            _ => None,
        };
        ErrorResponse {
            error: label.to_string(),
            message: self.public_message(),
            code: code.to_string(),
            details,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.descriptor().0
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.to_response_body())
    }
}
