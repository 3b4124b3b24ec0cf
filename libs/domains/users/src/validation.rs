//! Input checks run by the handlers before any storage call.

use crate::error::{UserError, UserResult};
use crate::models::{Conditions, UpdateUserInput, User};

/// Email is checked before name; only the first failure is reported.
pub fn validate_user(user: &User) -> UserResult<()> {
    if user.email.is_empty() {
        return Err(UserError::validation("email is required"));
    }
    if user.name.is_empty() {
        return Err(UserError::validation("name is required"));
    }
    Ok(())
}

/// At least one of `name`/`email` must be supplied. `id` is not checked.
pub fn validate_update_user(input: &UpdateUserInput) -> UserResult<()> {
    if input.name.is_none() && input.email.is_none() {
        return Err(UserError::validation("no updates"));
    }
    Ok(())
}

/// Parse the `limit`/`offset` query parameters.
///
/// Both are required and must be non-negative integers. Zero is accepted.
pub fn parse_conditions(limit: Option<&str>, offset: Option<&str>) -> UserResult<Conditions> {
    let limit = parse_pagination("limit", limit)?;
    let offset = parse_pagination("offset", offset)?;
    Ok(Conditions::new(limit, offset))
}

fn parse_pagination(name: &str, raw: Option<&str>) -> UserResult<i64> {
    let raw = raw.ok_or_else(|| UserError::validation(format!("{} is required", name)))?;
    let value: i64 = raw
        .parse()
        .map_err(|_| UserError::validation(format!("invalid {}: {}", name, raw)))?;
    if value < 0 {
        return Err(UserError::validation(format!(
            "{} must not be negative",
            name
        )));
    }
    Ok(value)
}
