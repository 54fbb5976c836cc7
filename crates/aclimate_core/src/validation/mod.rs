//! Field and cross-record validation run before every mutation.
//!
//! # Responsibility
//! - Reject missing, oversized or malformed field values.
//! - Reject composite-key collisions against stored records.
//!
//! # Invariants
//! - Every rule failure is reported as a single `ValidationError` kind.
//! - Validators never write to the store.
//! - Update validators check only fields present in the partial input.

use crate::model::RecordId;
use crate::repo::RepoResult;
use rusqlite::{Connection, ToSql};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod app;
pub mod user;
pub mod ws_interested;

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Human-readable rule violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for ValidationError {}

/// Requires a non-blank value of at most `max_chars` characters.
///
/// `field` names the raw field in the "required" message; `label` is the
/// human name used in the length message.
pub(crate) fn require_text(
    field: &str,
    label: &str,
    value: &str,
    max_chars: usize,
) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(format!(
            "The '{field}' field is required and cannot be empty."
        )));
    }
    if value.chars().count() > max_chars {
        return Err(ValidationError::new(format!(
            "{label} cannot exceed {max_chars} characters"
        )));
    }
    Ok(())
}

/// Requires a strictly positive reference id.
pub(crate) fn require_positive(label: &str, value: RecordId) -> ValidationResult<()> {
    if value <= 0 {
        return Err(ValidationError::new(format!(
            "{label} must be a positive integer"
        )));
    }
    Ok(())
}

/// Fails with `message` when `predicate` matches any row of `table`.
///
/// `exclude_id` removes the record being updated from the match set.
pub(crate) fn ensure_no_match(
    conn: &Connection,
    table: &str,
    predicate: &str,
    params: &[&dyn ToSql],
    exclude_id: Option<RecordId>,
    message: impl FnOnce() -> String,
) -> RepoResult<()> {
    let mut sql = format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE {predicate}");
    let mut bind: Vec<&dyn ToSql> = params.to_vec();
    if let Some(id) = exclude_id.as_ref() {
        sql.push_str(" AND id != ?");
        bind.push(id);
    }
    sql.push_str(");");

    let exists: i64 = conn.query_row(&sql, bind.as_slice(), |row| row.get(0))?;
    if exists == 1 {
        return Err(ValidationError::new(message()).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{require_positive, require_text};

    #[test]
    fn require_text_rejects_blank_values() {
        let err = require_text("name", "App name", "   ", 10).unwrap_err();
        assert_eq!(
            err.message(),
            "The 'name' field is required and cannot be empty."
        );
    }

    #[test]
    fn require_text_counts_characters_not_bytes() {
        assert!(require_text("name", "App name", "ééééé", 5).is_ok());
        let err = require_text("name", "App name", "éééééé", 5).unwrap_err();
        assert_eq!(err.message(), "App name cannot exceed 5 characters");
    }

    #[test]
    fn require_positive_rejects_zero_and_negative() {
        assert!(require_positive("App ID", 1).is_ok());
        assert!(require_positive("App ID", 0).is_err());
        let err = require_positive("App ID", -1).unwrap_err();
        assert_eq!(err.message(), "App ID must be a positive integer");
    }
}
