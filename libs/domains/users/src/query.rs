//! SQL text for the `users` table.
//!
//! The partial UPDATE is assembled from the fields actually supplied; all
//! other statements are fixed.

use sea_orm::{DbBackend, Statement, Value};

use crate::error::{UserError, UserResult};
use crate::models::UpdateUserInput;

pub const INSERT_USER: &str = "INSERT INTO users (name, email) VALUES ($1, $2) RETURNING id";

pub const SELECT_USER: &str =
    "SELECT id, name, email FROM users WHERE id = $1 AND deleted_at IS NULL";

pub const SOFT_DELETE_USER: &str =
    "UPDATE users SET deleted_at = $1 WHERE id = $2 AND deleted_at IS NULL";

pub const LIST_USERS: &str =
    "SELECT id, name, email FROM users WHERE deleted_at IS NULL LIMIT $1 OFFSET $2";

/// Ordered `(column, value)` pairs of a partial update. `name` always comes
/// before `email`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pairs: Vec<(&'static str, String)>,
}

impl UserChanges {
    pub fn from_input(input: &UpdateUserInput) -> Self {
        let mut pairs = Vec::with_capacity(2);
        if let Some(name) = &input.name {
            pairs.push(("name", name.clone()));
        }
        if let Some(email) = &input.email {
            pairs.push(("email", email.clone()));
        }
        Self { pairs }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.pairs.iter().map(|(column, _)| *column)
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, value)| value.as_str())
    }

    /// `UPDATE users SET <col> = $1[, <col> = $2] WHERE id = $n AND deleted_at IS NULL`
    pub fn sql(&self) -> String {
        let assignments: Vec<String> = self
            .pairs
            .iter()
            .enumerate()
            .map(|(i, (column, _))| format!("{} = ${}", column, i + 1))
            .collect();

        format!(
            "UPDATE users SET {} WHERE id = ${} AND deleted_at IS NULL",
            assignments.join(", "),
            self.pairs.len() + 1
        )
    }

    /// Render the UPDATE for `id`. An empty change set is rejected.
    pub fn into_statement(self, id: i64) -> UserResult<Statement> {
        if self.is_empty() {
            return Err(UserError::validation("no updates"));
        }

        let sql = self.sql();
        let values: Vec<Value> = self
            .pairs
            .into_iter()
            .map(|(_, value)| value.into())
            .chain(std::iter::once(id.into()))
            .collect();

        Ok(Statement::from_sql_and_values(DbBackend::Postgres, sql, values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: Option<&str>, email: Option<&str>) -> UpdateUserInput {
        UpdateUserInput {
            id: 1,
            name: name.map(str::to_string),
            email: email.map(str::to_string),
        }
    }

    #[test]
    fn test_name_only() {
        let changes = UserChanges::from_input(&input(Some("Annie"), None));
        assert_eq!(
            changes.sql(),
            "UPDATE users SET name = $1 WHERE id = $2 AND deleted_at IS NULL"
        );
        assert_eq!(changes.columns().collect::<Vec<_>>(), ["name"]);
    }

    #[test]
    fn test_email_only() {
        let changes = UserChanges::from_input(&input(None, Some("a@x.io")));
        assert_eq!(
            changes.sql(),
            "UPDATE users SET email = $1 WHERE id = $2 AND deleted_at IS NULL"
        );
    }

    #[test]
    fn test_both_fields_name_first() {
        let changes = UserChanges::from_input(&input(Some("Annie"), Some("a@x.io")));
        assert_eq!(
            changes.sql(),
            "UPDATE users SET name = $1, email = $2 WHERE id = $3 AND deleted_at IS NULL"
        );
        assert_eq!(changes.get("email"), Some("a@x.io"));
    }

    #[test]
    fn test_statement_binds_values_then_id() {
        let stmt = UserChanges::from_input(&input(Some("Annie"), Some("a@x.io")))
            .into_statement(42)
            .unwrap();

        let expected = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "UPDATE users SET name = $1, email = $2 WHERE id = $3 AND deleted_at IS NULL",
            ["Annie".into(), "a@x.io".into(), 42i64.into()],
        );
        assert_eq!(stmt, expected);
    }

    #[test]
    fn test_empty_changes_rejected() {
        let changes = UserChanges::from_input(&input(None, None));
        assert!(changes.is_empty());

        let err = changes.into_statement(1).unwrap_err();
        assert!(matches!(err, UserError::Validation(msg) if msg == "no updates"));
    }
}
