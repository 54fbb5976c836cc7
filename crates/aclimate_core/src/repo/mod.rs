//! Record persistence contracts and SQLite mappings.
//!
//! # Responsibility
//! - Define the `Record` contract binding an entity to its table, its
//!   Create/Update inputs and its validation hooks.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Every write path runs the record's validation hook before SQL mutations.
//! - Read paths reject undecodable persisted state instead of masking it.
//! - Store-level constraint violations surface as `RepoError::Validation`.

use crate::db::DbError;
use crate::model::RecordId;
use crate::validation::ValidationError;
use rusqlite::types::Value;
use rusqlite::{ffi, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod app_repo;
pub mod query;
pub mod user_repo;
pub mod ws_interested_repo;

pub use query::RecordFilter;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for record persistence, validation and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    NotFound {
        entity: &'static str,
        id: RecordId,
    },
    Db(DbError),
    InvalidData(String),
}

impl RepoError {
    /// Stable short name of the error kind, used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound { .. } => "not_found",
            Self::Db(_) => "store",
            Self::InvalidData(_) => "invalid_data",
        }
    }

    /// Maps a failed write, turning constraint violations into validation errors.
    pub(crate) fn from_write(entity: &'static str, err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(failure, _) = &err {
            match failure.extended_code {
                ffi::SQLITE_CONSTRAINT_UNIQUE => {
                    return Self::Validation(ValidationError::new(format!(
                        "{entity} conflicts with an existing record"
                    )));
                }
                ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
                    return Self::Validation(ValidationError::new(format!(
                        "{entity} references a missing record or is still referenced"
                    )));
                }
                _ => {}
            }
        }
        err.into()
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Binds an entity Read type (`Self`) to its table and input shapes.
pub trait Record: Sized {
    /// Creation input.
    type Create;
    /// Partial update input; `None` fields are left untouched.
    type Update;

    /// Singular entity name used in errors and log events.
    const ENTITY: &'static str;
    const TABLE: &'static str;
    /// Column list decoded by `from_row`.
    const COLUMNS: &'static str;
    /// Whether the table carries an `updated_at` column to refresh on update.
    const TRACKS_UPDATES: bool;

    fn id(&self) -> RecordId;

    /// Pre-create hook; must reject any input the store would not accept.
    fn validate_create(conn: &Connection, input: &Self::Create) -> RepoResult<()>;

    /// Pre-update hook evaluated against the stored `current` record.
    fn validate_update(conn: &Connection, current: &Self, input: &Self::Update) -> RepoResult<()>;

    /// Inserts one row and returns its store-assigned id.
    fn insert(conn: &Connection, input: &Self::Create) -> RepoResult<RecordId>;

    /// Column assignments for the fields present in `input`.
    fn assignments(input: &Self::Update) -> RepoResult<Vec<(&'static str, Value)>>;

    fn from_row(row: &Row<'_>) -> RepoResult<Self>;
}

/// Loads one record by primary key.
pub fn select_by_id<R: Record>(conn: &Connection, id: RecordId) -> RepoResult<Option<R>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM {} WHERE id = ?1;",
        R::COLUMNS,
        R::TABLE
    ))?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(R::from_row(row)?));
    }
    Ok(None)
}

/// Loads every record matching `filter`, ordered by id.
pub fn select_where<R: Record>(conn: &Connection, filter: &RecordFilter) -> RepoResult<Vec<R>> {
    let sql = format!(
        "SELECT {} FROM {}{} ORDER BY id ASC;",
        R::COLUMNS,
        R::TABLE,
        filter.where_clause()
    );
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query(params_from_iter(filter.binds()))?;
    let mut records = Vec::new();
    while let Some(row) = rows.next()? {
        records.push(R::from_row(row)?);
    }
    Ok(records)
}

/// Writes the present fields of `input` to the row `id`.
///
/// Returns `false` when no row has that id. An update with no present
/// fields leaves the row, including `updated_at`, untouched.
pub fn update_by_id<R: Record>(conn: &Connection, id: RecordId, input: &R::Update) -> RepoResult<bool> {
    let assignments = R::assignments(input)?;
    if assignments.is_empty() {
        return Ok(select_by_id::<R>(conn, id)?.is_some());
    }

    let mut set_clauses = assignments
        .iter()
        .map(|(column, _)| format!("{column} = ?"))
        .collect::<Vec<_>>();
    if R::TRACKS_UPDATES {
        set_clauses.push("updated_at = (strftime('%s', 'now') * 1000)".to_string());
    }

    let mut bind_values = assignments
        .into_iter()
        .map(|(_, value)| value)
        .collect::<Vec<_>>();
    bind_values.push(Value::Integer(id));

    let sql = format!(
        "UPDATE {} SET {} WHERE id = ?;",
        R::TABLE,
        set_clauses.join(", ")
    );
    let changed = conn
        .execute(&sql, params_from_iter(bind_values))
        .map_err(|err| RepoError::from_write(R::ENTITY, err))?;
    Ok(changed > 0)
}

/// Hard-deletes the row `id`; returns `false` when it does not exist.
pub fn delete_by_id<R: Record>(conn: &Connection, id: RecordId) -> RepoResult<bool> {
    let changed = conn
        .execute(&format!("DELETE FROM {} WHERE id = ?1;", R::TABLE), [id])
        .map_err(|err| RepoError::from_write(R::ENTITY, err))?;
    Ok(changed > 0)
}

pub(crate) fn parse_enable(row: &Row<'_>, table: &str) -> RepoResult<bool> {
    match row.get::<_, i64>("enable")? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid enable value `{other}` in {table}.enable"
        ))),
    }
}
