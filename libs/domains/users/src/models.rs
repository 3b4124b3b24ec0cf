use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// User entity - matches the `users` table minus the soft-delete marker
///
/// Missing `name`/`email` keys decode as empty strings so validation, not
/// the decoder, reports them. An `id` sent by a client is ignored on create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct User {
    /// Server-generated identifier
    pub id: i64,
    /// Display name
    #[schema(example = "Ann")]
    pub name: String,
    /// Email address (no uniqueness or format check)
    #[schema(example = "ann@x.io")]
    pub email: String,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Partial update of a user
///
/// `None` (absent key or JSON `null`) leaves the stored field untouched;
/// `Some("")` sets it to the empty string. `id` is always taken from the
/// request path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateUserInput {
    #[schema(ignore)]
    pub id: i64,
    #[schema(example = "Annie")]
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Pagination for listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conditions {
    pub limit: i64,
    pub offset: i64,
}

impl Conditions {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self { limit, offset }
    }
}

/// Raw query string of `GET /users`
///
/// Kept as strings so parse failures produce the domain's own messages.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Maximum rows to return (required, non-negative integer)
    #[param(value_type = i64, example = 10)]
    pub limit: Option<String>,
    /// Rows to skip (required, non-negative integer)
    #[param(value_type = i64, example = 0)]
    pub offset: Option<String>,
}
