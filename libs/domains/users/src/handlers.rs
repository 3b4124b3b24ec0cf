use axum::{
    Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::errors::{BadRequestResponse, InternalServerErrorResponse, NotFoundResponse};
use axum_helpers::{AppError, IdPath, JsonBody};
use serde::Serialize;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{ListQuery, UpdateUserInput, User};
use crate::repository::UserRepository;
use crate::service::UserService;
use crate::validation::{parse_conditions, validate_update_user, validate_user};

/// Mount point of the users router below `/api`
pub const URL: &str = "/users";

/// OpenAPI tag shared by all user endpoints
pub const TAG: &str = "users";

/// OpenAPI documentation for Users API
#[derive(OpenApi)]
#[openapi(
    paths(list_users, create_user, get_user, update_user, delete_user),
    components(
        schemas(User, UpdateUserInput),
        responses(BadRequestResponse, NotFoundResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = TAG, description = "User management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the users router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .with_state(shared_service)
}

fn json_response<T: Serialize>(value: &T) -> Result<Response, AppError> {
    let body = serde_json::to_vec(value)?;
    Ok((
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        )],
        body,
    )
        .into_response())
}

/// List active users
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(ListQuery),
    responses(
        (status = 200, description = "Page of active users", body = Vec<User>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query?;
    let conditions = parse_conditions(query.limit.as_deref(), query.offset.as_deref())?;

    let users = service.list(conditions).await?;
    json_response(&users)
}

/// Create a new user
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = User,
    responses(
        (status = 201, description = "User created",
            headers(("Location" = String, description = "Path of the new user"))),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    JsonBody(user): JsonBody<User>,
) -> Result<Response, AppError> {
    validate_user(&user)?;

    let id = service.create(user).await?;
    let location = format!("/api{}/{}", URL, id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)]).into_response())
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    IdPath(id): IdPath,
) -> Result<Response, AppError> {
    let user = service.get_by_id(id).await?;
    json_response(&user)
}

/// Update the supplied fields of a user
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    request_body = UpdateUserInput,
    responses(
        (status = 200, description = "Update applied"),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    IdPath(id): IdPath,
    JsonBody(mut input): JsonBody<UpdateUserInput>,
) -> Result<StatusCode, AppError> {
    input.id = id;
    validate_update_user(&input)?;

    service.update(input).await?;
    Ok(StatusCode::OK)
}

/// Soft-delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted (or already absent)"),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    IdPath(id): IdPath,
) -> Result<StatusCode, AppError> {
    service.delete(id).await?;
    Ok(StatusCode::OK)
}
