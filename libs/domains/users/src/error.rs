use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("{0}")]
    Validation(String),

    #[error("user {0} not found")]
    NotFound(i64),

    #[error("database error during {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    pub fn validation(message: impl Into<String>) -> Self {
        UserError::Validation(message.into())
    }

    /// Wraps a driver error with the repository operation it came from.
    ///
    /// ```ignore
    /// db.execute_raw(stmt).await.map_err(UserError::database("delete"))?;
    /// ```
    pub fn database<E: std::fmt::Display>(operation: &'static str) -> impl FnOnce(E) -> Self {
        move |err| UserError::Database {
            operation,
            message: err.to_string(),
        }
    }
}

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(msg) => AppError::BadRequest(msg),
            err @ UserError::NotFound(_) => AppError::NotFound(err.to_string()),
            err @ UserError::Database { .. } => AppError::InternalServerError(err.to_string()),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Implement From for sea_orm::DbErr
impl From<sea_orm::DbErr> for UserError {
    fn from(err: sea_orm::DbErr) -> Self {
        UserError::Database {
            operation: "query",
            message: err.to_string(),
        }
    }
}
