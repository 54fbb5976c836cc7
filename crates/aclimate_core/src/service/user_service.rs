//! User use-case service.
//!
//! # Responsibility
//! - Provide CRUD entry points for users.
//! - Provide lookups by profile, owning app and identity-provider key.
//!
//! # Invariants
//! - Profile tokens are coerced before any session is opened; unknown tokens
//!   fail with a validation error listing every valid profile.
//! - Every lookup filters on the `enable` flag and orders by id.

use crate::model::user::{User, UserCreate, UserUpdate};
use crate::model::RecordId;
use crate::repo::{RecordFilter, RepoResult};
use crate::service::base::BaseService;
use crate::validation::user::parse_profile;
use rusqlite::Connection;

pub struct UserService<'conn> {
    base: BaseService<'conn, User>,
}

impl<'conn> UserService<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            base: BaseService::new(conn),
        }
    }

    pub fn create(&self, input: &UserCreate, session: Option<&Connection>) -> RepoResult<User> {
        self.base.create(input, session)
    }

    pub fn get(&self, id: RecordId, session: Option<&Connection>) -> RepoResult<Option<User>> {
        self.base.get(id, session)
    }

    pub fn update(
        &self,
        id: RecordId,
        input: &UserUpdate,
        session: Option<&Connection>,
    ) -> RepoResult<User> {
        self.base.update(id, input, session)
    }

    pub fn delete(&self, id: RecordId, session: Option<&Connection>) -> RepoResult<()> {
        self.base.delete(id, session)
    }

    /// Users with the given profile token (`"FARMER"`, `"TECHNICIAN"`).
    pub fn get_by_profile(
        &self,
        profile: &str,
        enabled: bool,
        session: Option<&Connection>,
    ) -> RepoResult<Vec<User>> {
        let profile = parse_profile(profile)?;
        let filter = RecordFilter::new()
            .eq_text("profile", profile.as_str())
            .enabled(enabled);
        self.base.list(&filter, session)
    }

    pub fn get_by_app(
        &self,
        app_id: RecordId,
        enabled: bool,
        session: Option<&Connection>,
    ) -> RepoResult<Vec<User>> {
        let filter = RecordFilter::new().eq_id("app_id", app_id).enabled(enabled);
        self.base.list(&filter, session)
    }

    pub fn get_by_ext_key_clock_id(
        &self,
        ext_key_clock_id: &str,
        enabled: bool,
        session: Option<&Connection>,
    ) -> RepoResult<Vec<User>> {
        let filter = RecordFilter::new()
            .eq_text("ext_key_clock_id", ext_key_clock_id)
            .enabled(enabled);
        self.base.list(&filter, session)
    }

    pub fn get_by_profile_and_app(
        &self,
        profile: &str,
        app_id: RecordId,
        enabled: bool,
        session: Option<&Connection>,
    ) -> RepoResult<Vec<User>> {
        let profile = parse_profile(profile)?;
        let filter = RecordFilter::new()
            .eq_text("profile", profile.as_str())
            .eq_id("app_id", app_id)
            .enabled(enabled);
        self.base.list(&filter, session)
    }

    pub fn get_all(&self, enabled: bool, session: Option<&Connection>) -> RepoResult<Vec<User>> {
        self.base
            .list(&RecordFilter::new().enabled(enabled), session)
    }
}
