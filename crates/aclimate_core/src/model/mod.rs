//! Entity records and their Create/Update/Read shapes.
//!
//! # Responsibility
//! - Define the App -> User -> WsInterested data model.
//! - Declare field limits shared by validators and callers.
//!
//! # Invariants
//! - Every persisted record is identified by a store-assigned `RecordId`.
//! - Records are never shared mutably across operations; every read returns
//!   an owned value.

pub mod app;
pub mod user;
pub mod ws_interested;

/// Surrogate integer identity assigned by the store on insert.
pub type RecordId = i64;

pub(crate) fn default_enable() -> bool {
    true
}
