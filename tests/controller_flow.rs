//! End-to-end controller scenarios against a mock HTTP server.
//!
//! These drive the controller the way the UI does: call an intent, then
//! poll until the worker's result has been applied.

use std::time::Duration;

use blogdesk::egui_app::{AuthMode, Config, Controller, Session, SessionStore, User, View};
use blogdesk::shared::config::AppConfig;
use pretty_assertions::assert_eq;

fn config_for(server: &mockito::ServerGuard) -> Config {
    Config::with_builder(AppConfig::builder().server_url(server.url())).unwrap()
}

fn store_in(dir: &tempfile::TempDir) -> SessionStore {
    SessionStore::at_path(dir.path().join("session.json"))
}

fn saved_session(dir: &tempfile::TempDir, user_id: i64) -> SessionStore {
    let mut store = store_in(dir);
    store
        .save(Session {
            access_token: "A".to_string(),
            refresh_token: "R".to_string(),
            user: User {
                id: user_id,
                username: "alice".to_string(),
            },
        })
        .unwrap();
    store
}

fn post_json(id: i64, title: &str, author: i64) -> String {
    format!(
        r#"{{"id": {id}, "title": "{title}", "content": "body of {title}",
            "author": {author}, "author_name": "alice",
            "created_at": "2024-03-01T12:00:00Z"}}"#
    )
}

/// Poll the controller until `done` holds or a few seconds pass.
fn wait_until(controller: &mut Controller, mut done: impl FnMut(&Controller) -> bool) {
    for _ in 0..500 {
        controller.poll();
        if done(controller) {
            return;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    panic!("timed out waiting for controller state");
}

#[test]
fn login_persists_tokens_and_closes_modal() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/posts/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create();
    server
        .mock("POST", "/auth/login/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"message": "Login successful",
                "user": {"id": 1, "username": "alice"},
                "tokens": {"access": "A", "refresh": "R"}}"#,
        )
        .create();

    let dir = tempfile::tempdir().unwrap();
    let mut controller = Controller::new(config_for(&server), store_in(&dir));
    controller.start();

    controller.open_auth_modal(AuthMode::Login);
    controller.auth_form.username = "alice".to_string();
    controller.auth_form.password = "secret".to_string();
    controller.submit_auth();

    wait_until(&mut controller, |c| c.is_authenticated());

    assert!(controller.auth_modal.is_none());
    assert!(controller.auth_form.password.is_empty());
    assert_eq!(controller.current_user().unwrap().username, "alice");

    // Both tokens and the user survive in the persisted file.
    let mut reread = store_in(&dir);
    let persisted = reread.load().cloned().unwrap();
    assert_eq!(persisted.access_token, "A");
    assert_eq!(persisted.refresh_token, "R");
    assert_eq!(persisted.user.id, 1);
}

#[test]
fn rejected_login_keeps_modal_open_with_message() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/posts/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create();
    server
        .mock("POST", "/auth/login/")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": "Invalid credentials"}"#)
        .create();

    let dir = tempfile::tempdir().unwrap();
    let mut controller = Controller::new(config_for(&server), store_in(&dir));
    controller.start();

    controller.open_auth_modal(AuthMode::Login);
    controller.auth_form.username = "alice".to_string();
    controller.auth_form.password = "nope".to_string();
    controller.submit_auth();

    wait_until(&mut controller, |c| c.auth_error.is_some());

    assert!(!controller.is_authenticated());
    assert_eq!(controller.auth_modal, Some(AuthMode::Login));
    assert_eq!(controller.auth_error.as_deref(), Some("Invalid credentials"));
    // The form is kept so the user can retry.
    assert_eq!(controller.auth_form.username, "alice");
}

#[test]
fn create_then_refetch_converges_on_server_state() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/posts/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create();

    let dir = tempfile::tempdir().unwrap();
    let mut controller = Controller::new(config_for(&server), saved_session(&dir, 1));
    controller.start();
    wait_until(&mut controller, |c| !c.fetch_pending());
    assert!(controller.posts().is_empty());

    server
        .mock("POST", "/posts/")
        .match_header("authorization", "Bearer A")
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(post_json(9, "Hello", 1))
        .create();
    // Created later, so the refetch sees the new collection.
    server
        .mock("GET", "/posts/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!("[{}]", post_json(9, "Hello", 1)))
        .create();

    controller.compose_open = true;
    controller.compose_form.title = "Hello".to_string();
    controller.compose_form.content = "body of Hello".to_string();
    controller.submit_compose();

    wait_until(&mut controller, |c| c.posts().len() == 1);

    assert!(!controller.compose_open);
    assert!(controller.compose_form.title.is_empty());
    let hello_count = controller
        .posts()
        .iter()
        .filter(|p| p.title == "Hello")
        .count();
    assert_eq!(hello_count, 1);
}

#[test]
fn author_delete_clears_selection_and_refetches() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/posts/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            "[{}, {}]",
            post_json(7, "Mine", 1),
            post_json(8, "Theirs", 2)
        ))
        .create();

    let dir = tempfile::tempdir().unwrap();
    let mut controller = Controller::new(config_for(&server), saved_session(&dir, 1));
    controller.start();
    wait_until(&mut controller, |c| c.posts().len() == 2);

    controller.select_post(7);
    assert_eq!(controller.view, View::Detail);

    server
        .mock("DELETE", "/posts/7/")
        .match_header("authorization", "Bearer A")
        .with_status(204)
        .create();
    server
        .mock("GET", "/posts/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!("[{}]", post_json(8, "Theirs", 2)))
        .create();

    controller.delete_post(7, || true);

    wait_until(&mut controller, |c| c.posts().len() == 1);

    assert_eq!(controller.view, View::List);
    assert!(controller.selected_post().is_none());
    assert_eq!(controller.posts()[0].id, 8);
}

#[test]
fn unauthorized_create_clears_session_and_skips_refetch() {
    let mut server = mockito::Server::new();
    // Exactly one fetch: the initial load. The failed create must not
    // trigger another.
    let list_mock = server
        .mock("GET", "/posts/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .expect(1)
        .create();
    server
        .mock("POST", "/posts/")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail": "Given token not valid for any token type"}"#)
        .create();

    let dir = tempfile::tempdir().unwrap();
    let mut controller = Controller::new(config_for(&server), saved_session(&dir, 1));
    controller.start();
    wait_until(&mut controller, |c| !c.fetch_pending());

    controller.compose_open = true;
    controller.compose_form.title = "Hello".to_string();
    controller.compose_form.content = "body".to_string();
    controller.submit_compose();

    wait_until(&mut controller, |c| c.compose_error.is_some());

    assert!(!controller.is_authenticated());
    assert!(controller.compose_open);
    assert_eq!(controller.compose_error.as_deref(), Some("Please log in again"));

    // Give any stray refetch a moment to show up, then verify none did.
    std::thread::sleep(Duration::from_millis(100));
    controller.poll();
    list_mock.assert();

    // The cleared session is also gone from disk.
    let mut reread = store_in(&dir);
    assert!(reread.load().is_none());
}

#[test]
fn fetch_failure_reports_but_keeps_app_alive() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/posts/")
        .with_status(500)
        .with_body("oops")
        .create();

    let dir = tempfile::tempdir().unwrap();
    let mut controller = Controller::new(config_for(&server), store_in(&dir));
    controller.start();

    wait_until(&mut controller, |c| c.list_error.is_some());

    assert!(controller.posts().is_empty());
    assert_eq!(controller.view, View::List);
}
