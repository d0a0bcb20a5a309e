//! Authentication properties shared by every protected route.

use axum::http::{Method, StatusCode};
use serde_json::json;

use bazaar_api::middleware::REQUEST_ID_HEADER;
use bazaar_integration_tests::TestApp;

/// One request per protected route, all owned by user 1 / admin 1.
fn protected_routes() -> Vec<(Method, &'static str)> {
    vec![
        (Method::GET, "/api/v1/users/1"),
        (Method::PUT, "/api/v1/users/1"),
        (Method::DELETE, "/api/v1/users/1"),
        (Method::GET, "/api/admin/1/v1/users?page_id=1&page_size=5"),
        (Method::POST, "/usr/v1/users/1/notification"),
        (Method::GET, "/usr/v1/users/1/notification/phone"),
        (Method::PUT, "/usr/v1/users/1/notification/phone"),
        (Method::DELETE, "/usr/v1/users/1/notification/phone"),
        (Method::GET, "/usr/v1/users/1/wish-lists/items"),
        (Method::POST, "/usr/v1/users/1/wish-lists/1/items"),
        (Method::GET, "/usr/v1/users/1/wish-lists/1/items/1"),
        (Method::PUT, "/usr/v1/users/1/wish-lists/1/items/1"),
        (Method::DELETE, "/usr/v1/users/1/wish-lists/1/items/1"),
        (Method::GET, "/usr/v1/users/1/shopping-carts/1/items"),
        (Method::POST, "/usr/v1/users/1/shopping-carts/1/items"),
        (Method::PUT, "/usr/v1/users/1/shopping-carts/1/items/1"),
        (Method::DELETE, "/usr/v1/users/1/shopping-carts/1/items/1"),
        (Method::POST, "/usr/v1/users/1/shopping-carts/1/finish-purchase"),
        (Method::GET, "/admin/v1/admins/1"),
        (Method::POST, "/admin/v1/admins/1/admins"),
        (Method::POST, "/admin/v1/admins/1/app-policy"),
        (Method::GET, "/admin/v1/admins/1/app-policy/1"),
        (Method::PUT, "/admin/v1/admins/1/app-policy/1"),
        (Method::DELETE, "/admin/v1/admins/1/app-policy/1"),
        (Method::GET, "/admin/v1/admins/1/dashboard"),
    ]
}

fn body_for(method: &Method) -> Option<serde_json::Value> {
    (*method == Method::POST || *method == Method::PUT).then(|| json!({}))
}

#[tokio::test]
async fn test_missing_token_is_unauthorized_without_store_access() {
    let app = TestApp::mock();

    for (method, uri) in protected_routes() {
        let body = body_for(&method);
        let resp = app.request(method.clone(), uri, None, body).await;
        assert_eq!(resp.status, StatusCode::UNAUTHORIZED, "{method} {uri}");
        assert!(resp.body["error"].is_string());
    }

    assert_eq!(app.store.total_calls(), 0);
}

#[tokio::test]
async fn test_forged_token_is_unauthorized() {
    let app = TestApp::mock();
    let mut token = app.user_token(1);
    token.push('x');

    let resp = app.get("/api/v1/users/1", Some(&token)).await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.store.total_calls(), 0);
}

#[tokio::test]
async fn test_wrong_identity_kind_is_unauthorized() {
    let app = TestApp::mock();
    let user_token = app.user_token(1);
    let admin_token = app.super_admin_token(1);

    let resp = app
        .get("/admin/v1/admins/1/dashboard", Some(&user_token))
        .await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);

    let resp = app.get("/api/v1/users/1", Some(&admin_token)).await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);

    assert_eq!(app.store.total_calls(), 0);
}

#[tokio::test]
async fn test_health_and_request_id() {
    let app = TestApp::mock();

    let resp = app.get("/health", None).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.headers.contains_key(REQUEST_ID_HEADER));
}
