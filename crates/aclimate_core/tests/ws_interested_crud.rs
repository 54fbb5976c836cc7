use aclimate_core::db::open_db_in_memory;
use aclimate_core::{
    AppCreate, AppService, Notification, ProfileType, RepoError, User, UserCreate, UserService,
    WsInterestedCreate, WsInterestedService, WsInterestedUpdate,
};
use rusqlite::Connection;
use serde_json::json;

fn seed_user(conn: &Connection, ext_key_clock_id: &str) -> User {
    let apps = AppService::new(conn);
    let app = match apps.get_by_name("Test App", true, None).unwrap().pop() {
        Some(app) => app,
        None => apps.create(&AppCreate::new("Test App", "1"), None).unwrap(),
    };
    UserService::new(conn)
        .create(
            &UserCreate::new(ext_key_clock_id, app.id, ProfileType::Farmer),
            None,
        )
        .unwrap()
}

fn notification() -> Notification {
    let mut notification = Notification::new();
    notification.insert("email".to_string(), json!(true));
    notification.insert("wp".to_string(), json!(false));
    notification
}

fn interest_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM ws_interested;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_user(&conn, "keycloak_123");
    let service = WsInterestedService::new(&conn);

    let input = WsInterestedCreate::new(user.id, "WS_123", notification());
    let created = service.create(&input, None).unwrap();
    assert_eq!(created.user_id, user.id);
    assert_eq!(created.ws_ext_id, "WS_123");
    assert_eq!(created.notification, input.notification);

    assert_eq!(service.get(created.id, None).unwrap(), Some(created));
}

#[test]
fn invalid_fields_are_rejected_before_insert() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_user(&conn, "keycloak_123");
    let service = WsInterestedService::new(&conn);

    let err = service
        .create(
            &WsInterestedCreate::new(user.id, "W".repeat(51), notification()),
            None,
        )
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Weather station ext id cannot exceed 50 characters"
    );

    let err = service
        .create(
            &WsInterestedCreate::new(user.id, "WS_123", Notification::new()),
            None,
        )
        .unwrap_err();
    assert_eq!(err.to_string(), "Notification cannot be empty");

    let err = service
        .create(&WsInterestedCreate::new(0, "WS_123", notification()), None)
        .unwrap_err();
    assert_eq!(err.to_string(), "User ID must be a positive integer");

    assert_eq!(interest_count(&conn), 0);
}

#[test]
fn duplicate_user_station_pair_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_user(&conn, "keycloak_123");
    let service = WsInterestedService::new(&conn);

    let first = service
        .create(&WsInterestedCreate::new(user.id, "WS_123", notification()), None)
        .unwrap();
    let err = service
        .create(&WsInterestedCreate::new(user.id, "WS_123", notification()), None)
        .unwrap_err();
    match err {
        RepoError::Validation(err) => assert_eq!(
            err.message(),
            format!(
                "User {} is already interested in weather station 'WS_123'",
                user.id
            )
        ),
        other => panic!("unexpected error: {other}"),
    }
    assert!(service.get(first.id, None).unwrap().is_some());
    assert_eq!(interest_count(&conn), 1);
}

#[test]
fn update_station_only_checks_against_stored_user() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_user(&conn, "keycloak_123");
    let service = WsInterestedService::new(&conn);
    service
        .create(&WsInterestedCreate::new(user.id, "WS_1", notification()), None)
        .unwrap();
    let second = service
        .create(&WsInterestedCreate::new(user.id, "WS_2", notification()), None)
        .unwrap();

    let err = service
        .update(
            second.id,
            &WsInterestedUpdate {
                ws_ext_id: Some("WS_1".to_string()),
                ..WsInterestedUpdate::default()
            },
            None,
        )
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let mut changed = Notification::new();
    changed.insert("sms".to_string(), json!({"enabled": true, "hours": [6, 18]}));
    let updated = service
        .update(
            second.id,
            &WsInterestedUpdate {
                ws_ext_id: Some("WS_3".to_string()),
                notification: Some(changed.clone()),
                ..WsInterestedUpdate::default()
            },
            None,
        )
        .unwrap();
    assert_eq!(updated.ws_ext_id, "WS_3");
    assert_eq!(updated.notification, changed);
    assert_eq!(updated.user_id, user.id);
}

#[test]
fn update_rejects_empty_notification_and_missing_record() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_user(&conn, "keycloak_123");
    let service = WsInterestedService::new(&conn);
    let interest = service
        .create(&WsInterestedCreate::new(user.id, "WS_1", notification()), None)
        .unwrap();

    let err = service
        .update(
            interest.id,
            &WsInterestedUpdate {
                notification: Some(Notification::new()),
                ..WsInterestedUpdate::default()
            },
            None,
        )
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let err = service
        .update(interest.id + 100, &WsInterestedUpdate::default(), None)
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "ws_interested", .. }));
}

#[test]
fn lookups_by_user_and_station_ignore_enable_state() {
    let conn = open_db_in_memory().unwrap();
    let alice = seed_user(&conn, "alice");
    let bob = seed_user(&conn, "bob");
    let service = WsInterestedService::new(&conn);
    let alice_ws1 = service
        .create(&WsInterestedCreate::new(alice.id, "WS_1", notification()), None)
        .unwrap();
    let alice_ws2 = service
        .create(&WsInterestedCreate::new(alice.id, "WS_2", notification()), None)
        .unwrap();
    let bob_ws1 = service
        .create(&WsInterestedCreate::new(bob.id, "WS_1", notification()), None)
        .unwrap();

    assert_eq!(
        service.get_by_user(alice.id, None).unwrap(),
        vec![alice_ws1.clone(), alice_ws2.clone()]
    );
    assert_eq!(
        service.get_by_ws_ext_id("WS_1", None).unwrap(),
        vec![alice_ws1.clone(), bob_ws1.clone()]
    );
    assert_eq!(
        service.get_all(None).unwrap(),
        vec![alice_ws1, alice_ws2, bob_ws1]
    );
    assert!(service.get_by_ws_ext_id("WS_404", None).unwrap().is_empty());
}

#[test]
fn delete_interest() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_user(&conn, "keycloak_123");
    let service = WsInterestedService::new(&conn);
    let interest = service
        .create(&WsInterestedCreate::new(user.id, "WS_1", notification()), None)
        .unwrap();

    // The user cannot be removed while an interest references it.
    let err = UserService::new(&conn).delete(user.id, None).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    service.delete(interest.id, None).unwrap();
    assert!(service.get_all(None).unwrap().is_empty());
    UserService::new(&conn).delete(user.id, None).unwrap();
}
