//! Session scoping for store operations.
//!
//! # Responsibility
//! - Run one unit of store work on either a caller-owned session or a
//!   transaction owned by the call.
//!
//! # Invariants
//! - Caller-owned sessions are never committed or rolled back here.
//! - Owned transactions commit only when the work returns `Ok`.
//! - Owned transactions are released on every exit path; dropping an
//!   uncommitted `rusqlite::Transaction` rolls it back.

use log::{debug, error};
use rusqlite::Connection;

/// Runs `work` inside a session scope.
///
/// `session = Some(conn)` reuses the caller's connection or open
/// transaction as-is. `session = None` opens a transaction on `owner`,
/// commits it on success and rolls it back on failure.
///
/// # Errors
/// - Returns the error produced by `work` unchanged.
/// - Returns a store error when the owned transaction cannot begin or commit.
pub fn with_session<T, E, F>(
    owner: &Connection,
    session: Option<&Connection>,
    scope: &str,
    work: F,
) -> Result<T, E>
where
    F: FnOnce(&Connection) -> Result<T, E>,
    E: From<rusqlite::Error>,
{
    if let Some(conn) = session {
        return work(conn);
    }

    // `unchecked_transaction` lets services keep a shared `&Connection`.
    let tx = owner.unchecked_transaction()?;
    match work(&tx) {
        Ok(value) => {
            tx.commit()?;
            debug!("event=session_commit module=db status=ok scope={scope}");
            Ok(value)
        }
        Err(err) => {
            match tx.rollback() {
                Ok(()) => debug!("event=session_rollback module=db status=ok scope={scope}"),
                Err(rollback_err) => error!(
                    "event=session_rollback module=db status=error scope={scope} error={rollback_err}"
                ),
            }
            Err(err)
        }
    }
}
