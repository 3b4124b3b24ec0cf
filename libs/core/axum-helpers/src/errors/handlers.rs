use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Handler for 404 Not Found errors.
///
/// This can be used as a fallback handler in your router.
pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        "The requested resource was not found",
    )
        .into_response()
}
