use crate::domain::DomainError;
use crate::error::app_error::AppError;
use crate::error::db_mapping::{map_database_error, CONNECT_FAILED, TEMPORARILY_UNAVAILABLE};
use crate::error::validation_mapping::flatten_validation_errors;

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound(msg) => AppError::NotFound(msg),
            DomainError::ValidationError(msg) => AppError::validation_error(msg),
            DomainError::BusinessRuleViolation(msg) => AppError::BadRequest(msg),
            DomainError::Conflict(msg) => AppError::Conflict(msg),
            DomainError::Forbidden(msg) => AppError::Forbidden(msg),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError(err)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_) => AppError::database_unavailable(CONNECT_FAILED),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                AppError::database_unavailable(TEMPORARILY_UNAVAILABLE)
            }
            sqlx::Error::Database(db_err) => {
                let mapped = map_database_error(
                    db_err.code().as_deref(),
                    db_err.constraint(),
                    db_err.message(),
                );
                mapped.unwrap_or(AppError::DatabaseError(sqlx::Error::Database(db_err)))
            }
            other => AppError::DatabaseError(other),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        let issues = flatten_validation_errors(&err);
        let message = match issues.as_slice() {
            [only] => only.message.clone(),
            _ => format!("{} fields failed validation", issues.len()),
        };
        AppError::ValidationError { message, issues }
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        }
    }
}
