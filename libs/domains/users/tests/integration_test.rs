//! Integration tests for Users domain
//!
//! These tests use real PostgreSQL via testcontainers to ensure:
//! - The raw statements match the `users` schema
//! - Soft-deleted rows disappear from every read
//! - Partial updates only touch the supplied columns
//!
//! They need a Docker daemon: `cargo test -p domain_users -- --ignored`

use domain_users::*;
use sea_orm::{ConnectionTrait, DbBackend, Statement};
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};

fn new_user(builder: &TestDataBuilder, suffix: &str) -> User {
    User::new(builder.name("user", suffix), builder.email(suffix))
}

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_and_get_user() {
    let db = TestDatabase::new().await;
    let repo = PostgresUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("create_and_get");

    let input = new_user(&builder, "main");
    let id = repo.create(input.clone()).await.unwrap();
    assert!(id > 0);

    let retrieved = repo.get_by_id(id).await.unwrap();
    assert_eq!(retrieved.id, id);
    assert_eq!(retrieved.name, input.name);
    assert_eq!(retrieved.email, input.email);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_assigns_increasing_ids() {
    let db = TestDatabase::new().await;
    let repo = PostgresUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("increasing_ids");

    let mut ids = Vec::new();
    for suffix in ["a", "b", "c"] {
        ids.push(repo.create(new_user(&builder, suffix)).await.unwrap());
    }

    assert_ascending(&ids, "created ids");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_get_missing_user_is_not_found() {
    let db = TestDatabase::new().await;
    let repo = PostgresUserRepository::new(db.connection());

    let result = repo.get_by_id(404).await;
    assert!(matches!(result, Err(UserError::NotFound(404))));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_only_touches_supplied_fields() {
    let db = TestDatabase::new().await;
    let repo = PostgresUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("partial_update");

    let input = new_user(&builder, "main");
    let id = repo.create(input.clone()).await.unwrap();

    repo.update(UpdateUserInput {
        id,
        name: Some("Annie".to_string()),
        email: None,
    })
    .await
    .unwrap();

    let updated = repo.get_by_id(id).await.unwrap();
    assert_eq!(updated.name, "Annie");
    assert_eq!(updated.email, input.email);

    repo.update(UpdateUserInput {
        id,
        name: None,
        email: Some("annie@example.com".to_string()),
    })
    .await
    .unwrap();

    let updated = repo.get_by_id(id).await.unwrap();
    assert_eq!(updated.name, "Annie");
    assert_eq!(updated.email, "annie@example.com");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_missing_user_is_ok() {
    let db = TestDatabase::new().await;
    let repo = PostgresUserRepository::new(db.connection());

    let result = repo
        .update(UpdateUserInput {
            id: 77,
            name: Some("Ghost".to_string()),
            email: None,
        })
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_deleted_user_has_no_effect() {
    let db = TestDatabase::new().await;
    let repo = PostgresUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("update_deleted");

    let id = repo.create(new_user(&builder, "main")).await.unwrap();
    repo.delete(id).await.unwrap();

    repo.update(UpdateUserInput {
        id,
        name: Some("Revived".to_string()),
        email: None,
    })
    .await
    .unwrap();

    let name = db
        .connection
        .query_one_raw(Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT name FROM users WHERE id = $1",
            [id.into()],
        ))
        .await
        .unwrap()
        .map(|row| row.try_get::<String>("", "name").unwrap());
    let name = assert_some(name, "deleted row is retained");
    assert_eq!(name, builder.name("user", "main"));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_is_soft_and_idempotent() {
    let db = TestDatabase::new().await;
    let repo = PostgresUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("soft_delete");

    let id = repo.create(new_user(&builder, "main")).await.unwrap();

    repo.delete(id).await.unwrap();
    repo.delete(id).await.unwrap();

    assert!(matches!(
        repo.get_by_id(id).await,
        Err(UserError::NotFound(_))
    ));

    // The row is still stored with its deletion marker
    let row = db
        .connection
        .query_one_raw(Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT COUNT(*) AS total FROM users WHERE id = $1 AND deleted_at IS NOT NULL",
            [id.into()],
        ))
        .await
        .unwrap();
    let row = assert_some(row, "count row");
    assert_eq!(row.try_get::<i64>("", "total").unwrap(), 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_missing_user_is_ok() {
    let db = TestDatabase::new().await;
    let repo = PostgresUserRepository::new(db.connection());

    assert!(repo.delete(12345).await.is_ok());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_list_excludes_deleted_and_paginates() {
    let db = TestDatabase::new().await;
    let repo = PostgresUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("list_paginates");

    let mut ids = Vec::new();
    for suffix in ["a", "b", "c", "d"] {
        ids.push(repo.create(new_user(&builder, suffix)).await.unwrap());
    }
    repo.delete(ids[1]).await.unwrap();

    let all = repo.list(Conditions::new(100, 0)).await.unwrap();
    let mut listed: Vec<i64> = all.iter().map(|u| u.id).collect();
    listed.sort();
    assert_eq!(listed, vec![ids[0], ids[2], ids[3]]);

    let page = repo.list(Conditions::new(2, 0)).await.unwrap();
    assert_eq!(page.len(), 2);

    let rest = repo.list(Conditions::new(2, 2)).await.unwrap();
    assert_eq!(rest.len(), 1);

    let empty = repo.list(Conditions::new(0, 0)).await.unwrap();
    assert!(empty.is_empty());

    let beyond = repo.list(Conditions::new(10, 10)).await.unwrap();
    assert!(beyond.is_empty());
}

// ============================================================================
// Service Tests
// ============================================================================

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_service_round_trip_over_postgres() {
    let db = TestDatabase::new().await;
    let service = UserService::new(PostgresUserRepository::new(db.connection()));
    let builder = TestDataBuilder::from_test_name("service_round_trip");

    let input = new_user(&builder, "main");
    validate_user(&input).unwrap();

    let id = service.create(input).await.unwrap();
    service.delete(id).await.unwrap();

    let listed = service.list(Conditions::new(10, 0)).await.unwrap();
    assert!(listed.iter().all(|u| u.id != id));
}
