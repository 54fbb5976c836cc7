//! App validation rules.

use super::{ensure_no_match, require_text, ValidationResult};
use crate::model::app::{App, AppCreate, AppUpdate, APP_NAME_MAX_LEN, COUNTRY_EXT_ID_MAX_LEN};
use crate::model::RecordId;
use crate::repo::RepoResult;
use rusqlite::Connection;

pub fn validate_name(name: &str) -> ValidationResult<()> {
    require_text("name", "App name", name, APP_NAME_MAX_LEN)
}

pub fn validate_country_ext_id(country_ext_id: &str) -> ValidationResult<()> {
    require_text(
        "country_ext_id",
        "Country ext id",
        country_ext_id,
        COUNTRY_EXT_ID_MAX_LEN,
    )
}

/// Rejects a `(name, country_ext_id)` pair already used by another app.
pub fn validate_unique_name_country(
    conn: &Connection,
    name: &str,
    country_ext_id: &str,
    exclude_id: Option<RecordId>,
) -> RepoResult<()> {
    ensure_no_match(
        conn,
        "apps",
        "name = ? AND country_ext_id = ?",
        &[&name, &country_ext_id],
        exclude_id,
        || format!("An app with name '{name}' already exists for country '{country_ext_id}'"),
    )
}

pub fn validate_create(conn: &Connection, input: &AppCreate) -> RepoResult<()> {
    validate_name(&input.name)?;
    validate_country_ext_id(&input.country_ext_id)?;
    validate_unique_name_country(conn, &input.name, &input.country_ext_id, None)
}

/// Validates the present fields of `input` against the stored `current` app.
///
/// When only one side of the composite key changes, the other side is taken
/// from `current` before the uniqueness check.
pub fn validate_update(conn: &Connection, current: &App, input: &AppUpdate) -> RepoResult<()> {
    if let Some(name) = input.name.as_deref() {
        validate_name(name)?;
    }
    if let Some(country_ext_id) = input.country_ext_id.as_deref() {
        validate_country_ext_id(country_ext_id)?;
    }

    if input.name.is_some() || input.country_ext_id.is_some() {
        let name = input.name.as_deref().unwrap_or(&current.name);
        let country_ext_id = input
            .country_ext_id
            .as_deref()
            .unwrap_or(&current.country_ext_id);
        validate_unique_name_country(conn, name, country_ext_id, Some(current.id))?;
    }

    Ok(())
}
