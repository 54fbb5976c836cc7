//! Weather-station interest use-case service.
//!
//! Lookups carry no enable filter: the entity has no enable flag.

use crate::model::ws_interested::{WsInterested, WsInterestedCreate, WsInterestedUpdate};
use crate::model::RecordId;
use crate::repo::{RecordFilter, RepoResult};
use crate::service::base::BaseService;
use rusqlite::Connection;

pub struct WsInterestedService<'conn> {
    base: BaseService<'conn, WsInterested>,
}

impl<'conn> WsInterestedService<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            base: BaseService::new(conn),
        }
    }

    pub fn create(
        &self,
        input: &WsInterestedCreate,
        session: Option<&Connection>,
    ) -> RepoResult<WsInterested> {
        self.base.create(input, session)
    }

    pub fn get(
        &self,
        id: RecordId,
        session: Option<&Connection>,
    ) -> RepoResult<Option<WsInterested>> {
        self.base.get(id, session)
    }

    pub fn update(
        &self,
        id: RecordId,
        input: &WsInterestedUpdate,
        session: Option<&Connection>,
    ) -> RepoResult<WsInterested> {
        self.base.update(id, input, session)
    }

    pub fn delete(&self, id: RecordId, session: Option<&Connection>) -> RepoResult<()> {
        self.base.delete(id, session)
    }

    /// Stations a user follows.
    pub fn get_by_user(
        &self,
        user_id: RecordId,
        session: Option<&Connection>,
    ) -> RepoResult<Vec<WsInterested>> {
        self.base
            .list(&RecordFilter::new().eq_id("user_id", user_id), session)
    }

    /// Users following one station.
    pub fn get_by_ws_ext_id(
        &self,
        ws_ext_id: &str,
        session: Option<&Connection>,
    ) -> RepoResult<Vec<WsInterested>> {
        self.base
            .list(&RecordFilter::new().eq_text("ws_ext_id", ws_ext_id), session)
    }

    pub fn get_all(&self, session: Option<&Connection>) -> RepoResult<Vec<WsInterested>> {
        self.base.list(&RecordFilter::new(), session)
    }
}
