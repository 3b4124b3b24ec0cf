use std::sync::Arc;
use tracing::instrument;

use crate::error::UserResult;
use crate::models::{Conditions, UpdateUserInput, User};
use crate::repository::UserRepository;

/// Service layer for User operations
///
/// Delegates to the repository and forwards results and errors unchanged.
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a user and return its id
    #[instrument(skip(self, user))]
    pub async fn create(&self, user: User) -> UserResult<i64> {
        self.repository.create(user).await
    }

    /// Get an active user by ID
    #[instrument(skip(self), fields(user_id = id))]
    pub async fn get_by_id(&self, id: i64) -> UserResult<User> {
        self.repository.get_by_id(id).await
    }

    /// Apply a partial update
    #[instrument(skip(self, input), fields(user_id = input.id))]
    pub async fn update(&self, input: UpdateUserInput) -> UserResult<()> {
        self.repository.update(input).await
    }

    /// Soft-delete a user
    #[instrument(skip(self), fields(user_id = id))]
    pub async fn delete(&self, id: i64) -> UserResult<()> {
        self.repository.delete(id).await
    }

    #[instrument(skip(self), fields(limit = conditions.limit, offset = conditions.offset))]
    pub async fn list(&self, conditions: Conditions) -> UserResult<Vec<User>> {
        self.repository.list(conditions).await
    }
}
