//! HTTP tests for user accounts.

use axum::http::StatusCode;
use serde_json::json;

use bazaar_api::services::auth::hash_password;
use bazaar_core::store::{ListUsersParams, StoreError, UpdateUserParams};
use bazaar_core::{AdminType, UserId};
use bazaar_integration_tests::{TestApp, fixtures};

fn sign_up_body() -> serde_json::Value {
    json!({
        "username": "jane_doe",
        "email": "jane_doe@shop.test",
        "password": "correct horse battery"
    })
}

#[tokio::test]
async fn test_sign_up_creates_user_and_queues_verify_email() {
    let app = TestApp::mock();
    app.store
        .expect("create_user")
        .returning(&fixtures::user(1, "jane_doe"));

    let resp = app.post("/api/v1/users", None, sign_up_body()).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["username"], "jane_doe");
    assert!(resp.body.get("hashed_password").is_none());

    let sent = app.tasks.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent.first().expect("one task").user_id, UserId::new(1));

    let calls = app.store.calls();
    let create = calls.first().expect("create_user call");
    let hashed = create.args["hashed_password"].as_str().expect("hash");
    assert!(hashed.starts_with("$argon2"));
    app.store.verify();
}

#[tokio::test]
async fn test_sign_up_with_taken_username_is_forbidden() {
    let app = TestApp::mock();
    app.store
        .expect("create_user")
        .failing(StoreError::unique("username is already taken"));

    let resp = app.post("/api/v1/users", None, sign_up_body()).await;

    assert_eq!(resp.status, StatusCode::FORBIDDEN);
    assert!(app.tasks.sent().is_empty());
}

#[tokio::test]
async fn test_sign_up_fails_when_task_queue_is_down() {
    let app = TestApp::mock();
    app.tasks.go_offline();
    app.store
        .expect("create_user")
        .returning(&fixtures::user(1, "jane_doe"));

    let resp = app.post("/api/v1/users", None, sign_up_body()).await;

    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    app.store.verify();
}

#[tokio::test]
async fn test_sign_up_validates_fields_before_store() {
    let app = TestApp::mock();

    for body in [
        json!({"username": "j", "email": "j@shop.test", "password": "long enough"}),
        json!({"username": "jane doe", "email": "j@shop.test", "password": "long enough"}),
        json!({"username": "jane", "email": "not-an-email", "password": "long enough"}),
        json!({"username": "jane", "email": "j@shop.test", "password": "short"}),
        json!({"username": "jane", "email": "j@shop.test"}),
    ] {
        let resp = app.post("/api/v1/users", None, body).await;
        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    }

    assert_eq!(app.store.total_calls(), 0);
    assert!(app.tasks.sent().is_empty());
}

#[tokio::test]
async fn test_login_returns_token_that_authenticates() {
    let app = TestApp::mock();
    let mut user = fixtures::user(4, "jane_doe");
    user.hashed_password = hash_password("correct horse battery").expect("hash");
    app.store
        .expect("get_user_by_username")
        .with(&"jane_doe")
        .times(1)
        .returning(&user);
    app.store.expect("get_user").returning(&user);

    let resp = app
        .post(
            "/api/v1/users/login",
            None,
            json!({"username": "jane_doe", "password": "correct horse battery"}),
        )
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["user"]["id"], 4);
    let token = resp.body["access_token"].as_str().expect("token").to_string();

    let me = app.get("/api/v1/users/4", Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    app.store.verify();
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let app = TestApp::mock();
    let mut user = fixtures::user(4, "jane_doe");
    user.hashed_password = hash_password("correct horse battery").expect("hash");
    app.store.expect("get_user_by_username").returning(&user);

    let resp = app
        .post(
            "/api/v1/users/login",
            None,
            json!({"username": "jane_doe", "password": "wrong password"}),
        )
        .await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert!(resp.body.get("access_token").is_none());
}

#[tokio::test]
async fn test_login_unknown_user_is_not_found() {
    let app = TestApp::mock();
    app.store
        .expect("get_user_by_username")
        .failing(StoreError::NotFound);

    let resp = app
        .post(
            "/api/v1/users/login",
            None,
            json!({"username": "ghost", "password": "whatever123"}),
        )
        .await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_login_blocked_user_is_unauthorized() {
    let app = TestApp::mock();
    let mut user = fixtures::user(4, "jane_doe");
    user.hashed_password = hash_password("correct horse battery").expect("hash");
    user.is_blocked = true;
    app.store.expect("get_user_by_username").returning(&user);

    let resp = app
        .post(
            "/api/v1/users/login",
            None,
            json!({"username": "jane_doe", "password": "correct horse battery"}),
        )
        .await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_user_passes_only_provided_fields() {
    let app = TestApp::mock();
    let token = app.user_token(4);
    app.store
        .expect("update_user")
        .with(&UpdateUserParams {
            id: UserId::new(4),
            username: Some("jane_smith".to_string()),
            email: None,
            telephone: None,
            hashed_password: None,
        })
        .returning(&fixtures::user(4, "jane_smith"));

    let resp = app
        .put(
            "/api/v1/users/4",
            Some(&token),
            json!({"username": "jane_smith"}),
        )
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["username"], "jane_smith");
    app.store.verify();
}

#[tokio::test]
async fn test_delete_user() {
    let app = TestApp::mock();
    let token = app.user_token(4);
    app.store
        .expect("delete_user")
        .with(&UserId::new(4))
        .succeeding();

    let resp = app.delete("/api/v1/users/4", Some(&token)).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, json!({}));
    app.store.verify();
}

#[tokio::test]
async fn test_admin_lists_users_by_page() {
    let app = TestApp::mock();
    let token = app.super_admin_token(1);
    app.store
        .expect("list_users")
        .with(&ListUsersParams {
            limit: 10,
            offset: 10,
        })
        .returning(&vec![fixtures::user(11, "eleven")]);

    let resp = app
        .get(
            "/api/admin/1/v1/users?page_id=2&page_size=10",
            Some(&token),
        )
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body[0]["id"], 11);
    app.store.verify();
}

#[tokio::test]
async fn test_list_users_rejects_oversized_page() {
    let app = TestApp::mock();
    let token = app.super_admin_token(1);

    let resp = app
        .get(
            "/api/admin/1/v1/users?page_id=1&page_size=51",
            Some(&token),
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.store.total_calls(), 0);
}

#[tokio::test]
async fn test_list_users_requires_super_admin() {
    let app = TestApp::mock();
    let token = app.admin_token(1, AdminType::Viewer, true);

    let resp = app
        .get("/api/admin/1/v1/users?page_id=1&page_size=10", Some(&token))
        .await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.store.total_calls(), 0);
}
