//! Reusable OpenAPI response types for the plain-text error bodies.

#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "text/plain",
    example = json!("internal server error")
)]
pub struct InternalServerErrorResponse(pub String);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - malformed input or failed validation",
    content_type = "text/plain",
    example = json!("email is required")
)]
pub struct BadRequestResponse(pub String);

#[derive(ToResponse)]
#[response(
    description = "Not Found",
    content_type = "text/plain",
    example = json!("user 1 not found")
)]
pub struct NotFoundResponse(pub String);
