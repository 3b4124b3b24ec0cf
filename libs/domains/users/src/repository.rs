use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{Conditions, UpdateUserInput, User};
use crate::query::UserChanges;

/// Repository trait for User persistence
///
/// Every read excludes soft-deleted rows. `delete` is the only writer of
/// the deletion marker and nothing ever clears it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and return the storage-assigned id
    async fn create(&self, user: User) -> UserResult<i64>;

    /// Get an active user by ID; `NotFound` when absent or deleted
    async fn get_by_id(&self, id: i64) -> UserResult<User>;

    /// Apply the supplied fields of `input` to the active user `input.id`.
    ///
    /// A missing row is not an error.
    async fn update(&self, input: UpdateUserInput) -> UserResult<()>;

    /// Soft-delete a user. Idempotent; a missing row is not an error.
    async fn delete(&self, id: i64) -> UserResult<()>;

    /// List active users
    async fn list(&self, conditions: Conditions) -> UserResult<Vec<User>>;
}

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    deleted_at: Option<DateTime<Utc>>,
}

impl StoredUser {
    fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

#[derive(Debug)]
struct Store {
    next_id: i64,
    rows: BTreeMap<i64, StoredUser>,
}

/// In-memory implementation of UserRepository (for development/testing)
///
/// Ids start at 1 and increase monotonically. Listing follows ascending id.
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(Store {
                next_id: 1,
                rows: BTreeMap::new(),
            })),
        }
    }

    /// Deletion marker of `id`, including for soft-deleted rows
    pub async fn deleted_at(&self, id: i64) -> Option<DateTime<Utc>> {
        let store = self.store.read().await;
        store.rows.get(&id).and_then(|row| row.deleted_at)
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn to_usize(name: &str, value: i64) -> UserResult<usize> {
    usize::try_from(value)
        .map_err(|_| UserError::validation(format!("{} must not be negative", name)))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> UserResult<i64> {
        let mut store = self.store.write().await;

        let id = store.next_id;
        store.next_id += 1;
        store.rows.insert(
            id,
            StoredUser {
                user: User { id, ..user },
                deleted_at: None,
            },
        );

        tracing::info!(user_id = id, "Created user");
        Ok(id)
    }

    async fn get_by_id(&self, id: i64) -> UserResult<User> {
        let store = self.store.read().await;
        store
            .rows
            .get(&id)
            .filter(|row| row.is_active())
            .map(|row| row.user.clone())
            .ok_or(UserError::NotFound(id))
    }

    async fn update(&self, input: UpdateUserInput) -> UserResult<()> {
        let changes = UserChanges::from_input(&input);
        if changes.is_empty() {
            return Err(UserError::validation("no updates"));
        }

        let mut store = self.store.write().await;
        if let Some(row) = store.rows.get_mut(&input.id).filter(|row| row.is_active()) {
            if let Some(name) = changes.get("name") {
                row.user.name = name.to_string();
            }
            if let Some(email) = changes.get("email") {
                row.user.email = email.to_string();
            }
            tracing::info!(user_id = input.id, "Updated user");
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> UserResult<()> {
        let mut store = self.store.write().await;

        if let Some(row) = store.rows.get_mut(&id).filter(|row| row.is_active()) {
            row.deleted_at = Some(Utc::now());
            tracing::info!(user_id = id, "Deleted user");
        }

        Ok(())
    }

    async fn list(&self, conditions: Conditions) -> UserResult<Vec<User>> {
        let limit = to_usize("limit", conditions.limit)?;
        let offset = to_usize("offset", conditions.offset)?;

        let store = self.store.read().await;
        Ok(store
            .rows
            .values()
            .filter(|row| row.is_active())
            .skip(offset)
            .take(limit)
            .map(|row| row.user.clone())
            .collect())
    }
}
