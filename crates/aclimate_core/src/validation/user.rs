//! User validation rules.

use super::{ensure_no_match, require_positive, require_text, ValidationResult};
use crate::model::user::{ProfileType, User, UserCreate, UserUpdate, EXT_KEY_CLOCK_ID_MAX_LEN};
use crate::model::RecordId;
use crate::repo::RepoResult;
use rusqlite::Connection;

pub fn validate_ext_key_clock_id(ext_key_clock_id: &str) -> ValidationResult<()> {
    require_text(
        "ext_key_clock_id",
        "External Keycloak ID",
        ext_key_clock_id,
        EXT_KEY_CLOCK_ID_MAX_LEN,
    )
}

pub fn validate_app_id(app_id: RecordId) -> ValidationResult<()> {
    require_positive("App ID", app_id)
}

/// Coerces a raw profile token into `ProfileType`.
///
/// The error message lists every valid token.
pub fn parse_profile(value: &str) -> ValidationResult<ProfileType> {
    value.parse()
}

/// Rejects an `(ext_key_clock_id, app_id)` pair already used by another user.
pub fn validate_unique_keycloak_app(
    conn: &Connection,
    ext_key_clock_id: &str,
    app_id: RecordId,
    exclude_id: Option<RecordId>,
) -> RepoResult<()> {
    ensure_no_match(
        conn,
        "users",
        "ext_key_clock_id = ? AND app_id = ?",
        &[&ext_key_clock_id, &app_id],
        exclude_id,
        || {
            format!(
                "A user with ext_key_clock_id '{ext_key_clock_id}' already exists for app '{app_id}'"
            )
        },
    )
}

pub fn validate_create(conn: &Connection, input: &UserCreate) -> RepoResult<()> {
    validate_ext_key_clock_id(&input.ext_key_clock_id)?;
    validate_app_id(input.app_id)?;
    validate_unique_keycloak_app(conn, &input.ext_key_clock_id, input.app_id, None)
}

/// Validates the present fields of `input` against the stored `current` user.
pub fn validate_update(conn: &Connection, current: &User, input: &UserUpdate) -> RepoResult<()> {
    if let Some(ext_key_clock_id) = input.ext_key_clock_id.as_deref() {
        validate_ext_key_clock_id(ext_key_clock_id)?;
    }
    if let Some(app_id) = input.app_id {
        validate_app_id(app_id)?;
    }

    if input.ext_key_clock_id.is_some() || input.app_id.is_some() {
        let ext_key_clock_id = input
            .ext_key_clock_id
            .as_deref()
            .unwrap_or(&current.ext_key_clock_id);
        let app_id = input.app_id.unwrap_or(current.app_id);
        validate_unique_keycloak_app(conn, ext_key_clock_id, app_id, Some(current.id))?;
    }

    Ok(())
}
