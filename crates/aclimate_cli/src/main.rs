//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `aclimate_core` linkage against the configured database.
//! - Keep output deterministic for quick local sanity checks.

use aclimate_core::db::migrations::schema_version;
use aclimate_core::{init_logging, AppService, CoreConfig, UserService, WsInterestedService};
use log::info;
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("aclimate_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = CoreConfig::from_env()?;
    if let Some(logging) = config.logging.as_ref() {
        init_logging(logging)?;
    }

    let conn = config.open_db()?;
    info!("event=cli_start module=cli status=ok");

    let apps = AppService::new(&conn).get_all(true, None)?;
    let users = UserService::new(&conn).get_all(true, None)?;
    let interests = WsInterestedService::new(&conn).get_all(None)?;

    println!("aclimate_core version={}", aclimate_core::core_version());
    println!("aclimate_core schema_version={}", schema_version(&conn)?);
    println!("apps enabled={}", apps.len());
    println!("users enabled={}", users.len());
    println!("ws_interested total={}", interests.len());
    Ok(())
}
