//! Weather-station interest validation rules.

use super::{ensure_no_match, require_positive, require_text, ValidationError, ValidationResult};
use crate::model::ws_interested::{
    Notification, WsInterested, WsInterestedCreate, WsInterestedUpdate, WS_EXT_ID_MAX_LEN,
};
use crate::model::RecordId;
use crate::repo::RepoResult;
use rusqlite::Connection;

pub fn validate_user_id(user_id: RecordId) -> ValidationResult<()> {
    require_positive("User ID", user_id)
}

pub fn validate_ws_ext_id(ws_ext_id: &str) -> ValidationResult<()> {
    require_text(
        "ws_ext_id",
        "Weather station ext id",
        ws_ext_id,
        WS_EXT_ID_MAX_LEN,
    )
}

pub fn validate_notification(notification: &Notification) -> ValidationResult<()> {
    if notification.is_empty() {
        return Err(ValidationError::new("Notification cannot be empty"));
    }
    Ok(())
}

/// Rejects a second interest of the same user in the same station.
pub fn validate_unique_user_ws(
    conn: &Connection,
    user_id: RecordId,
    ws_ext_id: &str,
    exclude_id: Option<RecordId>,
) -> RepoResult<()> {
    ensure_no_match(
        conn,
        "ws_interested",
        "user_id = ? AND ws_ext_id = ?",
        &[&user_id, &ws_ext_id],
        exclude_id,
        || format!("User {user_id} is already interested in weather station '{ws_ext_id}'"),
    )
}

pub fn validate_create(conn: &Connection, input: &WsInterestedCreate) -> RepoResult<()> {
    validate_user_id(input.user_id)?;
    validate_ws_ext_id(&input.ws_ext_id)?;
    validate_notification(&input.notification)?;
    validate_unique_user_ws(conn, input.user_id, &input.ws_ext_id, None)
}

/// Validates the present fields of `input` against the stored `current` row.
pub fn validate_update(
    conn: &Connection,
    current: &WsInterested,
    input: &WsInterestedUpdate,
) -> RepoResult<()> {
    if let Some(user_id) = input.user_id {
        validate_user_id(user_id)?;
    }
    if let Some(ws_ext_id) = input.ws_ext_id.as_deref() {
        validate_ws_ext_id(ws_ext_id)?;
    }
    if let Some(notification) = input.notification.as_ref() {
        validate_notification(notification)?;
    }

    if input.user_id.is_some() || input.ws_ext_id.is_some() {
        let user_id = input.user_id.unwrap_or(current.user_id);
        let ws_ext_id = input.ws_ext_id.as_deref().unwrap_or(&current.ws_ext_id);
        validate_unique_user_ws(conn, user_id, ws_ext_id, Some(current.id))?;
    }

    Ok(())
}
