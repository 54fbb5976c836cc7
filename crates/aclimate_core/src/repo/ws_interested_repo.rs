//! `ws_interested` table mapping.
//!
//! `notification` is stored as JSON object text.

use super::{Record, RepoError, RepoResult};
use crate::model::ws_interested::{
    Notification, WsInterested, WsInterestedCreate, WsInterestedUpdate,
};
use crate::model::RecordId;
use crate::validation;
use rusqlite::types::Value;
use rusqlite::{params, Connection, Row};

impl Record for WsInterested {
    type Create = WsInterestedCreate;
    type Update = WsInterestedUpdate;

    const ENTITY: &'static str = "ws_interested";
    const TABLE: &'static str = "ws_interested";
    const COLUMNS: &'static str = "id, user_id, ws_ext_id, notification";
    const TRACKS_UPDATES: bool = false;

    fn id(&self) -> RecordId {
        self.id
    }

    fn validate_create(conn: &Connection, input: &WsInterestedCreate) -> RepoResult<()> {
        validation::ws_interested::validate_create(conn, input)
    }

    fn validate_update(
        conn: &Connection,
        current: &WsInterested,
        input: &WsInterestedUpdate,
    ) -> RepoResult<()> {
        validation::ws_interested::validate_update(conn, current, input)
    }

    fn insert(conn: &Connection, input: &WsInterestedCreate) -> RepoResult<RecordId> {
        conn.execute(
            "INSERT INTO ws_interested (user_id, ws_ext_id, notification)
             VALUES (?1, ?2, ?3);",
            params![
                input.user_id,
                input.ws_ext_id.as_str(),
                encode_notification(&input.notification)?,
            ],
        )
        .map_err(|err| RepoError::from_write(Self::ENTITY, err))?;
        Ok(conn.last_insert_rowid())
    }

    fn assignments(input: &WsInterestedUpdate) -> RepoResult<Vec<(&'static str, Value)>> {
        let mut assignments = Vec::new();
        if let Some(user_id) = input.user_id {
            assignments.push(("user_id", Value::Integer(user_id)));
        }
        if let Some(ws_ext_id) = input.ws_ext_id.as_ref() {
            assignments.push(("ws_ext_id", Value::Text(ws_ext_id.clone())));
        }
        if let Some(notification) = input.notification.as_ref() {
            assignments.push(("notification", Value::Text(encode_notification(notification)?)));
        }
        Ok(assignments)
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        let notification_text: String = row.get("notification")?;
        Ok(WsInterested {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            ws_ext_id: row.get("ws_ext_id")?,
            notification: decode_notification(&notification_text)?,
        })
    }
}

fn encode_notification(notification: &Notification) -> RepoResult<String> {
    serde_json::to_string(notification).map_err(|err| {
        RepoError::InvalidData(format!("notification cannot be encoded: {err}"))
    })
}

fn decode_notification(text: &str) -> RepoResult<Notification> {
    serde_json::from_str(text).map_err(|err| {
        RepoError::InvalidData(format!(
            "invalid notification json in ws_interested.notification: {err}"
        ))
    })
}
