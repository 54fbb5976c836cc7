//! `apps` table mapping.

use super::{parse_enable, Record, RepoError, RepoResult};
use crate::model::app::{App, AppCreate, AppUpdate};
use crate::model::RecordId;
use crate::validation;
use rusqlite::types::Value;
use rusqlite::{params, Connection, Row};

impl Record for App {
    type Create = AppCreate;
    type Update = AppUpdate;

    const ENTITY: &'static str = "app";
    const TABLE: &'static str = "apps";
    const COLUMNS: &'static str =
        "id, name, country_ext_id, enable, registered_at, updated_at";
    const TRACKS_UPDATES: bool = true;

    fn id(&self) -> RecordId {
        self.id
    }

    fn validate_create(conn: &Connection, input: &AppCreate) -> RepoResult<()> {
        validation::app::validate_create(conn, input)
    }

    fn validate_update(conn: &Connection, current: &App, input: &AppUpdate) -> RepoResult<()> {
        validation::app::validate_update(conn, current, input)
    }

    fn insert(conn: &Connection, input: &AppCreate) -> RepoResult<RecordId> {
        conn.execute(
            "INSERT INTO apps (name, country_ext_id, enable) VALUES (?1, ?2, ?3);",
            params![
                input.name.as_str(),
                input.country_ext_id.as_str(),
                i64::from(input.enable),
            ],
        )
        .map_err(|err| RepoError::from_write(Self::ENTITY, err))?;
        Ok(conn.last_insert_rowid())
    }

    fn assignments(input: &AppUpdate) -> RepoResult<Vec<(&'static str, Value)>> {
        let mut assignments = Vec::new();
        if let Some(name) = input.name.as_ref() {
            assignments.push(("name", Value::Text(name.clone())));
        }
        if let Some(country_ext_id) = input.country_ext_id.as_ref() {
            assignments.push(("country_ext_id", Value::Text(country_ext_id.clone())));
        }
        if let Some(enable) = input.enable {
            assignments.push(("enable", Value::Integer(i64::from(enable))));
        }
        Ok(assignments)
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(App {
            id: row.get("id")?,
            name: row.get("name")?,
            country_ext_id: row.get("country_ext_id")?,
            enable: parse_enable(row, Self::TABLE)?,
            registered_at: row.get("registered_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}
