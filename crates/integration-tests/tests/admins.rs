//! HTTP tests for admin login and admin management.

use axum::http::StatusCode;
use serde_json::json;

use bazaar_api::services::auth::hash_password;
use bazaar_core::{AdminId, AdminType};
use bazaar_core::store::StoreError;
use bazaar_integration_tests::{TestApp, fixtures};

#[tokio::test]
async fn test_admin_login_token_opens_admin_routes() {
    let app = TestApp::mock();
    let mut admin = fixtures::admin(5, "root", AdminType::SuperAdmin);
    admin.hashed_password = hash_password("correct horse battery").expect("hash");
    app.store
        .expect("get_admin_by_username")
        .with(&"root")
        .returning(&admin);
    app.store
        .expect("create_app_policy")
        .returning(&fixtures::app_policy(1, 5, "terms-v1"));

    let login = app
        .post(
            "/admin/v1/admins/login",
            None,
            json!({"username": "root", "password": "correct horse battery"}),
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.body["admin"]["admin_type"], "super_admin");
    assert!(login.body["admin"].get("hashed_password").is_none());
    let token = login.body["access_token"].as_str().expect("token");

    let resp = app
        .post(
            "/admin/v1/admins/5/app-policy",
            Some(token),
            json!({"policy": "terms-v1"}),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    app.store.verify();
}

#[tokio::test]
async fn test_deactivated_admin_cannot_log_in() {
    let app = TestApp::mock();
    let mut admin = fixtures::admin(5, "root", AdminType::SuperAdmin);
    admin.hashed_password = hash_password("correct horse battery").expect("hash");
    admin.active = false;
    app.store.expect("get_admin_by_username").returning(&admin);

    let resp = app
        .post(
            "/admin/v1/admins/login",
            None,
            json!({"username": "root", "password": "correct horse battery"}),
        )
        .await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_super_admin_creates_admin() {
    let app = TestApp::mock();
    let token = app.super_admin_token(5);
    app.store
        .expect("create_admin")
        .returning(&fixtures::admin(6, "support", AdminType::Viewer));

    let resp = app
        .post(
            "/admin/v1/admins/5/admins",
            Some(&token),
            json!({
                "username": "support",
                "email": "support@admin.shop.test",
                "password": "long enough secret",
                "admin_type": "viewer"
            }),
        )
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["id"], 6);

    let calls = app.store.calls();
    let create = calls.first().expect("create_admin call");
    assert_eq!(create.args["admin_type"], "viewer");
    assert_ne!(create.args["hashed_password"], "long enough secret");
    app.store.verify();
}

#[tokio::test]
async fn test_duplicate_admin_is_forbidden() {
    let app = TestApp::mock();
    let token = app.super_admin_token(5);
    app.store
        .expect("create_admin")
        .failing(StoreError::unique("admin username is already taken"));

    let resp = app
        .post(
            "/admin/v1/admins/5/admins",
            Some(&token),
            json!({
                "username": "support",
                "email": "support@admin.shop.test",
                "password": "long enough secret",
                "admin_type": "admin"
            }),
        )
        .await;

    assert_eq!(resp.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_admin_type_is_bad_request() {
    let app = TestApp::mock();
    let token = app.super_admin_token(5);

    let resp = app
        .post(
            "/admin/v1/admins/5/admins",
            Some(&token),
            json!({
                "username": "support",
                "email": "support@admin.shop.test",
                "password": "long enough secret",
                "admin_type": "owner"
            }),
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.store.total_calls(), 0);
}

#[tokio::test]
async fn test_super_admin_reads_own_account() {
    let app = TestApp::mock();
    let token = app.super_admin_token(5);
    app.store
        .expect("get_admin")
        .with(&AdminId::new(5))
        .returning(&fixtures::admin(5, "root", AdminType::SuperAdmin));

    let resp = app.get("/admin/v1/admins/5", Some(&token)).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["username"], "root");
    assert!(resp.body.get("hashed_password").is_none());
    app.store.verify();
}

#[tokio::test]
async fn test_admin_account_of_another_admin_is_unauthorized() {
    let app = TestApp::mock();
    let token = app.super_admin_token(5);

    let resp = app.get("/admin/v1/admins/6", Some(&token)).await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.store.total_calls(), 0);
}
