//! Data-access core for AClimate frontend records.
//! This crate owns the App/User/WsInterested invariants and their storage.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validation;

pub use config::{ConfigError, CoreConfig};
pub use logging::{init_logging, logging_status, LogLevel, LoggingConfig, LoggingError};
pub use model::app::{App, AppCreate, AppUpdate};
pub use model::user::{ProfileType, User, UserCreate, UserUpdate};
pub use model::ws_interested::{Notification, WsInterested, WsInterestedCreate, WsInterestedUpdate};
pub use model::RecordId;
pub use repo::{Record, RecordFilter, RepoError, RepoResult};
pub use service::app_service::AppService;
pub use service::base::BaseService;
pub use service::user_service::UserService;
pub use service::ws_interested_service::WsInterestedService;
pub use validation::{ValidationError, ValidationResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
