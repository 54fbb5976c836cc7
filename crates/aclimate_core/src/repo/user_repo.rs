//! `users` table mapping.

use super::{parse_enable, Record, RepoError, RepoResult};
use crate::model::user::{ProfileType, User, UserCreate, UserUpdate};
use crate::model::RecordId;
use crate::validation;
use rusqlite::types::Value;
use rusqlite::{params, Connection, Row};

impl Record for User {
    type Create = UserCreate;
    type Update = UserUpdate;

    const ENTITY: &'static str = "user";
    const TABLE: &'static str = "users";
    const COLUMNS: &'static str =
        "id, ext_key_clock_id, app_id, profile, enable, registered_at, updated_at";
    const TRACKS_UPDATES: bool = true;

    fn id(&self) -> RecordId {
        self.id
    }

    fn validate_create(conn: &Connection, input: &UserCreate) -> RepoResult<()> {
        validation::user::validate_create(conn, input)
    }

    fn validate_update(conn: &Connection, current: &User, input: &UserUpdate) -> RepoResult<()> {
        validation::user::validate_update(conn, current, input)
    }

    fn insert(conn: &Connection, input: &UserCreate) -> RepoResult<RecordId> {
        conn.execute(
            "INSERT INTO users (ext_key_clock_id, app_id, profile, enable)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                input.ext_key_clock_id.as_str(),
                input.app_id,
                input.profile.as_str(),
                i64::from(input.enable),
            ],
        )
        .map_err(|err| RepoError::from_write(Self::ENTITY, err))?;
        Ok(conn.last_insert_rowid())
    }

    fn assignments(input: &UserUpdate) -> RepoResult<Vec<(&'static str, Value)>> {
        let mut assignments = Vec::new();
        if let Some(ext_key_clock_id) = input.ext_key_clock_id.as_ref() {
            assignments.push(("ext_key_clock_id", Value::Text(ext_key_clock_id.clone())));
        }
        if let Some(app_id) = input.app_id {
            assignments.push(("app_id", Value::Integer(app_id)));
        }
        if let Some(profile) = input.profile {
            assignments.push(("profile", Value::Text(profile.as_str().to_string())));
        }
        if let Some(enable) = input.enable {
            assignments.push(("enable", Value::Integer(i64::from(enable))));
        }
        Ok(assignments)
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        let profile_text: String = row.get("profile")?;
        let profile = ProfileType::from_token(&profile_text).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid profile `{profile_text}` in users.profile"
            ))
        })?;

        Ok(User {
            id: row.get("id")?,
            ext_key_clock_id: row.get("ext_key_clock_id")?,
            app_id: row.get("app_id")?,
            profile,
            enable: parse_enable(row, Self::TABLE)?,
            registered_at: row.get("registered_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}
