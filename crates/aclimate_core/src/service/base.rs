//! Generic session-scoped CRUD service.
//!
//! # Responsibility
//! - Provide create/get/update/delete/list for any `Record`.
//! - Run every operation inside a session scope.
//! - Log store failures at the service boundary.
//!
//! # Invariants
//! - Validation hooks run before any mutation reaches the store.
//! - Failed operations leave an owned session rolled back.
//! - Results are re-read from the store, never echoed from the input.

use crate::db::with_session;
use crate::model::RecordId;
use crate::repo::{
    delete_by_id, select_by_id, select_where, update_by_id, Record, RecordFilter, RepoError,
    RepoResult,
};
use log::{debug, error, info};
use rusqlite::Connection;
use std::marker::PhantomData;
use std::time::Instant;

/// CRUD operations over records of type `R`.
///
/// Every method takes `session`: pass `Some(conn)` to run inside a caller-owned
/// connection or transaction, or `None` to let the call own a transaction on
/// the service connection.
pub struct BaseService<'conn, R: Record> {
    conn: &'conn Connection,
    _record: PhantomData<fn() -> R>,
}

impl<'conn, R: Record> BaseService<'conn, R> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            _record: PhantomData,
        }
    }

    /// Validates and inserts one record, returning the stored projection.
    pub fn create(&self, input: &R::Create, session: Option<&Connection>) -> RepoResult<R> {
        let record = self.scope("create", session, |conn| {
            R::validate_create(conn, input)?;
            let id = R::insert(conn, input)?;
            reload::<R>(conn, id)
        })?;
        info!(
            "event=record_create module=service status=ok entity={} record_id={}",
            R::ENTITY,
            record.id()
        );
        Ok(record)
    }

    /// Fetches by primary key; `Ok(None)` when absent.
    pub fn get(&self, id: RecordId, session: Option<&Connection>) -> RepoResult<Option<R>> {
        self.scope("get", session, |conn| select_by_id::<R>(conn, id))
    }

    /// Applies the present fields of `input` to record `id`.
    ///
    /// # Errors
    /// - `RepoError::NotFound` when `id` does not exist.
    /// - `RepoError::Validation` when the merged state breaks a rule.
    pub fn update(
        &self,
        id: RecordId,
        input: &R::Update,
        session: Option<&Connection>,
    ) -> RepoResult<R> {
        self.scope("update", session, |conn| {
            let current = select_by_id::<R>(conn, id)?.ok_or(RepoError::NotFound {
                entity: R::ENTITY,
                id,
            })?;
            R::validate_update(conn, &current, input)?;
            if !update_by_id::<R>(conn, id, input)? {
                return Err(RepoError::NotFound {
                    entity: R::ENTITY,
                    id,
                });
            }
            reload::<R>(conn, id)
        })
    }

    /// Removes record `id` from the store.
    ///
    /// This is a physical delete; disabling goes through `update` with
    /// `enable: Some(false)`.
    pub fn delete(&self, id: RecordId, session: Option<&Connection>) -> RepoResult<()> {
        self.scope("delete", session, |conn| {
            if !delete_by_id::<R>(conn, id)? {
                return Err(RepoError::NotFound {
                    entity: R::ENTITY,
                    id,
                });
            }
            Ok(())
        })?;
        info!(
            "event=record_delete module=service status=ok entity={} record_id={}",
            R::ENTITY,
            id
        );
        Ok(())
    }

    /// Lists records matching `filter`, ordered by id.
    pub fn list(&self, filter: &RecordFilter, session: Option<&Connection>) -> RepoResult<Vec<R>> {
        self.scope("list", session, |conn| select_where::<R>(conn, filter))
    }

    fn scope<T>(
        &self,
        op: &'static str,
        session: Option<&Connection>,
        work: impl FnOnce(&Connection) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let started_at = Instant::now();
        let result = with_session(self.conn, session, R::ENTITY, work);
        let duration_ms = started_at.elapsed().as_millis();

        match &result {
            Ok(_) => debug!(
                "event=record_op module=service status=ok entity={} op={} duration_ms={}",
                R::ENTITY,
                op,
                duration_ms
            ),
            Err(RepoError::Db(err)) => error!(
                "event=store_error module=service status=error entity={} op={} duration_ms={} error={}",
                R::ENTITY,
                op,
                duration_ms,
                err
            ),
            Err(err) => debug!(
                "event=record_op module=service status=rejected entity={} op={} duration_ms={} error_kind={}",
                R::ENTITY,
                op,
                duration_ms,
                err.kind()
            ),
        }

        result
    }
}

fn reload<R: Record>(conn: &Connection, id: RecordId) -> RepoResult<R> {
    select_by_id::<R>(conn, id)?.ok_or_else(|| {
        RepoError::InvalidData(format!("{} {id} missing after write", R::ENTITY))
    })
}
