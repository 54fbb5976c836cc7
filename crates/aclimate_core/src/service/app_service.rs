//! App use-case service.
//!
//! # Responsibility
//! - Provide CRUD entry points for apps.
//! - Provide lookups by country, exact name and partial name.
//!
//! # Invariants
//! - Every lookup filters on the `enable` flag and orders by id.

use crate::model::app::{App, AppCreate, AppUpdate};
use crate::model::RecordId;
use crate::repo::{RecordFilter, RepoResult};
use crate::service::base::BaseService;
use rusqlite::Connection;

pub struct AppService<'conn> {
    base: BaseService<'conn, App>,
}

impl<'conn> AppService<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            base: BaseService::new(conn),
        }
    }

    pub fn create(&self, input: &AppCreate, session: Option<&Connection>) -> RepoResult<App> {
        self.base.create(input, session)
    }

    pub fn get(&self, id: RecordId, session: Option<&Connection>) -> RepoResult<Option<App>> {
        self.base.get(id, session)
    }

    pub fn update(
        &self,
        id: RecordId,
        input: &AppUpdate,
        session: Option<&Connection>,
    ) -> RepoResult<App> {
        self.base.update(id, input, session)
    }

    pub fn delete(&self, id: RecordId, session: Option<&Connection>) -> RepoResult<()> {
        self.base.delete(id, session)
    }

    /// Apps registered for one external country id.
    pub fn get_by_country_ext_id(
        &self,
        country_ext_id: &str,
        enabled: bool,
        session: Option<&Connection>,
    ) -> RepoResult<Vec<App>> {
        let filter = RecordFilter::new()
            .eq_text("country_ext_id", country_ext_id)
            .enabled(enabled);
        self.base.list(&filter, session)
    }

    /// Apps whose name equals `name` exactly (case-sensitive).
    pub fn get_by_name(
        &self,
        name: &str,
        enabled: bool,
        session: Option<&Connection>,
    ) -> RepoResult<Vec<App>> {
        let filter = RecordFilter::new().eq_text("name", name).enabled(enabled);
        self.base.list(&filter, session)
    }

    /// Apps whose name contains `fragment`, ignoring ASCII case.
    pub fn search_by_name(
        &self,
        fragment: &str,
        enabled: bool,
        session: Option<&Connection>,
    ) -> RepoResult<Vec<App>> {
        let filter = RecordFilter::new()
            .contains_ignore_case("name", fragment)
            .enabled(enabled);
        self.base.list(&filter, session)
    }

    pub fn get_all(&self, enabled: bool, session: Option<&Connection>) -> RepoResult<Vec<App>> {
        self.base
            .list(&RecordFilter::new().enabled(enabled), session)
    }
}
