use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, FromQueryResult, Statement};

use crate::error::{UserError, UserResult};
use crate::models::{Conditions, UpdateUserInput, User};
use crate::query::{INSERT_USER, LIST_USERS, SELECT_USER, SOFT_DELETE_USER, UserChanges};
use crate::repository::UserRepository;

/// PostgreSQL implementation of UserRepository using SeaORM raw statements
#[derive(Clone)]
pub struct PostgresUserRepository {
    db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Helper struct for deserializing user rows from the database
#[derive(Debug, FromQueryResult)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct InsertedId {
    id: i64,
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> UserResult<i64> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            INSERT_USER,
            [user.name.into(), user.email.into()],
        );

        let row = InsertedId::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(UserError::database("create"))?
            .ok_or_else(|| UserError::Database {
                operation: "create",
                message: "INSERT returned no id".to_string(),
            })?;

        tracing::info!(user_id = row.id, "Created user");
        Ok(row.id)
    }

    async fn get_by_id(&self, id: i64) -> UserResult<User> {
        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, SELECT_USER, [id.into()]);

        let row = UserRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(UserError::database("get_by_id"))?;

        row.map(User::from).ok_or(UserError::NotFound(id))
    }

    async fn update(&self, input: UpdateUserInput) -> UserResult<()> {
        let id = input.id;
        let stmt = UserChanges::from_input(&input).into_statement(id)?;

        let result = self
            .db
            .execute_raw(stmt)
            .await
            .map_err(UserError::database("update"))?;

        tracing::info!(
            user_id = id,
            rows_affected = result.rows_affected(),
            "Updated user"
        );
        Ok(())
    }

    async fn delete(&self, id: i64) -> UserResult<()> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            SOFT_DELETE_USER,
            [Utc::now().into(), id.into()],
        );

        let result = self
            .db
            .execute_raw(stmt)
            .await
            .map_err(UserError::database("delete"))?;

        tracing::info!(
            user_id = id,
            rows_affected = result.rows_affected(),
            "Deleted user"
        );
        Ok(())
    }

    async fn list(&self, conditions: Conditions) -> UserResult<Vec<User>> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            LIST_USERS,
            [conditions.limit.into(), conditions.offset.into()],
        );

        let rows = UserRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(UserError::database("list"))?;

        Ok(rows.into_iter().map(User::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbErr, MockDatabase, MockExecResult, Transaction, Value};
    use std::collections::BTreeMap;

    fn user_row(id: i64, name: &str, email: &str) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([
            ("id", id.into()),
            ("name", name.into()),
            ("email", email.into()),
        ])
    }

    #[tokio::test]
    async fn test_create_returns_generated_id() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([("id", Value::from(7i64))])]])
            .into_connection();
        let repo = PostgresUserRepository::new(db.clone());

        let id = repo.create(User::new("Ann", "ann@x.io")).await.unwrap();
        assert_eq!(id, 7);

        drop(repo);
        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DbBackend::Postgres,
                INSERT_USER,
                ["Ann".into(), "ann@x.io".into()],
            )]
        );
    }

    #[tokio::test]
    async fn test_get_by_id_maps_row() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_query_results([vec![user_row(1, "Ann", "ann@x.io")]])
            .into_connection();
        let repo = PostgresUserRepository::new(db.clone());

        let user = repo.get_by_id(1).await.unwrap();
        assert_eq!(
            user,
            User {
                id: 1,
                name: "Ann".to_string(),
                email: "ann@x.io".to_string()
            }
        );

        drop(repo);
        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DbBackend::Postgres,
                SELECT_USER,
                [1i64.into()],
            )]
        );
    }

    #[tokio::test]
    async fn test_get_by_id_no_row_is_not_found() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
            .into_connection();
        let repo = PostgresUserRepository::new(db);

        assert!(matches!(
            repo.get_by_id(3).await,
            Err(UserError::NotFound(3))
        ));
    }

    #[tokio::test]
    async fn test_get_by_id_driver_error_is_database_error() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let repo = PostgresUserRepository::new(db);

        let err = repo.get_by_id(3).await.unwrap_err();
        assert!(matches!(
            err,
            UserError::Database {
                operation: "get_by_id",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_update_binds_only_supplied_fields() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();
        let repo = PostgresUserRepository::new(db.clone());

        repo.update(UpdateUserInput {
            id: 1,
            name: None,
            email: Some("annie@x.io".to_string()),
        })
        .await
        .unwrap();

        drop(repo);
        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DbBackend::Postgres,
                "UPDATE users SET email = $1 WHERE id = $2 AND deleted_at IS NULL",
                ["annie@x.io".into(), 1i64.into()],
            )]
        );
    }

    #[tokio::test]
    async fn test_update_zero_rows_is_not_an_error() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let repo = PostgresUserRepository::new(db);

        let result = repo
            .update(UpdateUserInput {
                id: 404,
                name: Some("Ghost".to_string()),
                email: None,
            })
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_without_fields_skips_database() {
        let db = MockDatabase::new(DbBackend::Postgres).into_connection();
        let repo = PostgresUserRepository::new(db.clone());

        let result = repo.update(UpdateUserInput::default()).await;
        assert!(matches!(result, Err(UserError::Validation(_))));

        drop(repo);
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn test_delete_driver_error_is_database_error() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_exec_errors([DbErr::Custom("deadlock".to_string())])
            .into_connection();
        let repo = PostgresUserRepository::new(db);

        let err = repo.delete(1).await.unwrap_err();
        assert!(matches!(
            err,
            UserError::Database {
                operation: "delete",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_delete_zero_rows_is_not_an_error() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let repo = PostgresUserRepository::new(db);

        assert!(repo.delete(1).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_passes_limit_and_offset() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_query_results([vec![
                user_row(1, "Ann", "ann@x.io"),
                user_row(2, "Bob", "bob@x.io"),
            ]])
            .into_connection();
        let repo = PostgresUserRepository::new(db.clone());

        let users = repo.list(Conditions::new(2, 0)).await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].name, "Bob");

        drop(repo);
        assert_eq!(
            db.into_transaction_log(),
            [Transaction::from_sql_and_values(
                DbBackend::Postgres,
                LIST_USERS,
                [2i64.into(), 0i64.into()],
            )]
        );
    }
}
