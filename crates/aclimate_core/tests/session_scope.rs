use aclimate_core::db::open_db_in_memory;
use aclimate_core::{
    AppCreate, AppService, AppUpdate, ProfileType, RepoError, UserCreate, UserService,
};
use rusqlite::Connection;

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| row.get(0))
        .unwrap()
}

#[test]
fn caller_session_spans_several_services_and_commits_together() {
    let conn = open_db_in_memory().unwrap();
    let apps = AppService::new(&conn);
    let users = UserService::new(&conn);

    let tx = conn.unchecked_transaction().unwrap();
    let app = apps.create(&AppCreate::new("Test App", "1"), Some(&tx)).unwrap();
    let user = users
        .create(
            &UserCreate::new("keycloak_123", app.id, ProfileType::Farmer),
            Some(&tx),
        )
        .unwrap();
    assert_eq!(users.get(user.id, Some(&tx)).unwrap(), Some(user.clone()));
    tx.commit().unwrap();

    assert_eq!(users.get(user.id, None).unwrap(), Some(user));
    assert_eq!(count(&conn, "apps"), 1);
}

#[test]
fn caller_session_rollback_discards_every_write() {
    let conn = open_db_in_memory().unwrap();
    let apps = AppService::new(&conn);

    let tx = conn.unchecked_transaction().unwrap();
    let app = apps.create(&AppCreate::new("Test App", "1"), Some(&tx)).unwrap();
    apps.update(
        app.id,
        &AppUpdate {
            enable: Some(false),
            ..AppUpdate::default()
        },
        Some(&tx),
    )
    .unwrap();
    tx.rollback().unwrap();

    assert_eq!(count(&conn, "apps"), 0);
    assert!(apps.get(app.id, None).unwrap().is_none());
}

#[test]
fn failed_call_in_caller_session_leaves_earlier_writes_to_the_caller() {
    let conn = open_db_in_memory().unwrap();
    let apps = AppService::new(&conn);

    let tx = conn.unchecked_transaction().unwrap();
    apps.create(&AppCreate::new("Test App", "1"), Some(&tx)).unwrap();
    let err = apps
        .create(&AppCreate::new("Test App", "1"), Some(&tx))
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    tx.commit().unwrap();

    assert_eq!(count(&conn, "apps"), 1);
}

#[test]
fn owned_session_rolls_back_on_store_rejection() {
    let conn = open_db_in_memory().unwrap();
    let users = UserService::new(&conn);

    let err = users
        .create(&UserCreate::new("keycloak_123", 42, ProfileType::Farmer), None)
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert_eq!(count(&conn, "users"), 0);

    // The connection is usable again after the owned transaction ended.
    let app = AppService::new(&conn)
        .create(&AppCreate::new("Test App", "1"), None)
        .unwrap();
    users
        .create(&UserCreate::new("keycloak_123", app.id, ProfileType::Farmer), None)
        .unwrap();
    assert_eq!(count(&conn, "users"), 1);
}
