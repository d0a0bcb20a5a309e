//! End-to-end flows over the in-memory store.

use axum::http::StatusCode;
use serde_json::{Value, json};

use bazaar_core::UserId;
use bazaar_integration_tests::{TestApp, TestResponse};

struct Shopper {
    id: i64,
    cart_id: i64,
    wish_list_id: i64,
    token: String,
}

async fn sign_up(app: &TestApp<bazaar_api::store::MemoryStore>, username: &str) -> Shopper {
    let created = app
        .post(
            "/api/v1/users",
            None,
            json!({
                "username": username,
                "email": format!("{username}@shop.test"),
                "password": "correct horse battery"
            }),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK, "{:?}", created.body);

    let login = app
        .post(
            "/api/v1/users/login",
            None,
            json!({"username": username, "password": "correct horse battery"}),
        )
        .await;
    assert_eq!(login.status, StatusCode::OK, "{:?}", login.body);

    Shopper {
        id: id_of(&created.body["id"]),
        cart_id: id_of(&created.body["shopping_cart_id"]),
        wish_list_id: id_of(&created.body["wish_list_id"]),
        token: login.body["access_token"]
            .as_str()
            .expect("token")
            .to_string(),
    }
}

fn id_of(value: &Value) -> i64 {
    value.as_i64().expect("numeric id")
}

async fn add_to_cart(
    app: &TestApp<bazaar_api::store::MemoryStore>,
    shopper: &Shopper,
    product_item_id: i64,
    size_id: i64,
) -> TestResponse {
    app.post(
        &format!(
            "/usr/v1/users/{}/shopping-carts/{}/items",
            shopper.id, shopper.cart_id
        ),
        Some(&shopper.token),
        json!({"product_item_id": product_item_id, "size_id": size_id, "qty": 1}),
    )
    .await
}

#[tokio::test]
async fn test_sign_up_then_duplicate_is_forbidden() {
    let app = TestApp::memory();
    sign_up(&app, "jane_doe").await;

    let resp = app
        .post(
            "/api/v1/users",
            None,
            json!({
                "username": "jane_doe",
                "email": "other@shop.test",
                "password": "correct horse battery"
            }),
        )
        .await;

    assert_eq!(resp.status, StatusCode::FORBIDDEN);
    assert_eq!(app.tasks.sent().len(), 1);
}

#[tokio::test]
async fn test_cart_checkout_flow() {
    let app = TestApp::memory();
    let jane = sign_up(&app, "jane_doe").await;
    let items_uri = format!(
        "/usr/v1/users/{}/shopping-carts/{}/items",
        jane.id, jane.cart_id
    );

    assert_eq!(add_to_cart(&app, &jane, 2, 5).await.status, StatusCode::OK);
    assert_eq!(add_to_cart(&app, &jane, 1, 1).await.status, StatusCode::OK);
    // Same product and size again
    assert_eq!(
        add_to_cart(&app, &jane, 2, 5).await.status,
        StatusCode::FORBIDDEN
    );
    // Unknown product
    assert_eq!(
        add_to_cart(&app, &jane, 404, 1).await.status,
        StatusCode::FORBIDDEN
    );

    let listed = app.get(&items_uri, Some(&jane.token)).await;
    assert_eq!(listed.status, StatusCode::OK);
    let rows = listed.body.as_array().expect("rows");
    assert_eq!(rows.len(), 2);
    assert_eq!(listed.body[0]["name"], "Rain jacket");
    assert_eq!(listed.body[0]["size_value"], "M");
    assert_eq!(listed.body[0]["category_promo"]["name"], "Summer sale");
    assert_eq!(listed.body[1]["name"], "Linen shirt");

    let address = app
        .store
        .add_address(UserId::new(jane.id))
        .await
        .expect("address");
    let order = app
        .post(
            &format!(
                "/usr/v1/users/{}/shopping-carts/{}/finish-purchase",
                jane.id, jane.cart_id
            ),
            Some(&jane.token),
            json!({
                "user_address_id": address.as_i64(),
                "payment_type_id": 1,
                "shipping_method_id": 1,
                "order_status_id": 4,
                "order_total": "129.49"
            }),
        )
        .await;
    assert_eq!(order.status, StatusCode::OK, "{:?}", order.body);
    assert_eq!(order.body["line_count"], 2);

    let listed = app.get(&items_uri, Some(&jane.token)).await;
    assert_eq!(listed.body, json!([]));

    let admin = app.super_admin_token(1);
    let dashboard = app
        .get("/admin/v1/admins/1/dashboard?days=1", Some(&admin))
        .await;
    assert_eq!(dashboard.status, StatusCode::OK);
    assert_eq!(dashboard.body["users"]["total"], 1);
    assert_eq!(dashboard.body["daily_revenue"][0]["revenue"], "129.49");
}

#[tokio::test]
async fn test_checkout_with_foreign_address_changes_nothing() {
    let app = TestApp::memory();
    let jane = sign_up(&app, "jane_doe").await;
    let mark = sign_up(&app, "mark_roe").await;
    assert_eq!(add_to_cart(&app, &jane, 1, 2).await.status, StatusCode::OK);

    let marks_address = app
        .store
        .add_address(UserId::new(mark.id))
        .await
        .expect("address");
    let order = app
        .post(
            &format!(
                "/usr/v1/users/{}/shopping-carts/{}/finish-purchase",
                jane.id, jane.cart_id
            ),
            Some(&jane.token),
            json!({
                "user_address_id": marks_address.as_i64(),
                "payment_type_id": 1,
                "shipping_method_id": 1,
                "order_status_id": 1,
                "order_total": "39.99"
            }),
        )
        .await;
    assert_eq!(order.status, StatusCode::FORBIDDEN);

    let listed = app
        .get(
            &format!(
                "/usr/v1/users/{}/shopping-carts/{}/items",
                jane.id, jane.cart_id
            ),
            Some(&jane.token),
        )
        .await;
    assert_eq!(listed.body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_cart_of_another_user_is_not_found_even_with_own_token() {
    let app = TestApp::memory();
    let jane = sign_up(&app, "jane_doe").await;
    let mark = sign_up(&app, "mark_roe").await;

    // Mark's own token, Jane's cart id
    let resp = app
        .get(
            &format!(
                "/usr/v1/users/{}/shopping-carts/{}/items",
                mark.id, jane.cart_id
            ),
            Some(&mark.token),
        )
        .await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_wish_list_delete_is_not_repeatable() {
    let app = TestApp::memory();
    let jane = sign_up(&app, "jane_doe").await;
    let items_uri = format!(
        "/usr/v1/users/{}/wish-lists/{}/items",
        jane.id, jane.wish_list_id
    );

    let created = app
        .post(&items_uri, Some(&jane.token), json!({"product_item_id": 3}))
        .await;
    assert_eq!(created.status, StatusCode::OK);
    let item_uri = format!("{items_uri}/{}", id_of(&created.body["id"]));

    let shown = app.get(&item_uri, Some(&jane.token)).await;
    assert_eq!(shown.body["name"], "Leather boots");

    let updated = app
        .put(&item_uri, Some(&jane.token), json!({"product_item_id": 1}))
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    let shown = app.get(&item_uri, Some(&jane.token)).await;
    assert_eq!(shown.body["name"], "Linen shirt");

    assert_eq!(
        app.delete(&item_uri, Some(&jane.token)).await.status,
        StatusCode::OK
    );
    assert_eq!(
        app.delete(&item_uri, Some(&jane.token)).await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_notification_round_trip() {
    let app = TestApp::memory();
    let jane = sign_up(&app, "jane_doe").await;
    let base = format!("/usr/v1/users/{}/notification", jane.id);

    let created = app
        .post(&base, Some(&jane.token), json!({"device_id": "phone"}))
        .await;
    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.body["promotions"], false);

    let again = app
        .post(&base, Some(&jane.token), json!({"device_id": "phone"}))
        .await;
    assert_eq!(again.status, StatusCode::FORBIDDEN);

    let updated = app
        .put(
            &format!("{base}/phone"),
            Some(&jane.token),
            json!({"promotions": true}),
        )
        .await;
    assert_eq!(updated.body["promotions"], true);
    assert_eq!(updated.body["order_updates"], true);

    let shown = app.get(&format!("{base}/phone"), Some(&jane.token)).await;
    assert_eq!(shown.body, updated.body);
}

#[tokio::test]
async fn test_updated_password_replaces_old_one() {
    let app = TestApp::memory();
    let jane = sign_up(&app, "jane_doe").await;

    let resp = app
        .put(
            &format!("/api/v1/users/{}", jane.id),
            Some(&jane.token),
            json!({"password": "a brand new passphrase"}),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);

    let old = app
        .post(
            "/api/v1/users/login",
            None,
            json!({"username": "jane_doe", "password": "correct horse battery"}),
        )
        .await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);

    let new = app
        .post(
            "/api/v1/users/login",
            None,
            json!({"username": "jane_doe", "password": "a brand new passphrase"}),
        )
        .await;
    assert_eq!(new.status, StatusCode::OK);
}

#[tokio::test]
async fn test_cart_update_onto_existing_line_is_forbidden() {
    let app = TestApp::memory();
    let jane = sign_up(&app, "jane_doe").await;
    let items_uri = format!(
        "/usr/v1/users/{}/shopping-carts/{}/items",
        jane.id, jane.cart_id
    );
    assert_eq!(add_to_cart(&app, &jane, 1, 1).await.status, StatusCode::OK);
    let second = add_to_cart(&app, &jane, 1, 2).await;
    let second_uri = format!("{items_uri}/{}", id_of(&second.body["id"]));

    let resp = app
        .put(&second_uri, Some(&jane.token), json!({"size_id": 1}))
        .await;
    assert_eq!(resp.status, StatusCode::FORBIDDEN);

    let listed = app.get(&items_uri, Some(&jane.token)).await;
    let sizes: Vec<&Value> = listed
        .body
        .as_array()
        .expect("rows")
        .iter()
        .map(|row| &row["size_id"])
        .collect();
    assert_eq!(sizes, [&json!(1), &json!(2)]);
}

#[tokio::test]
async fn test_wish_list_update_onto_existing_line_is_forbidden() {
    let app = TestApp::memory();
    let jane = sign_up(&app, "jane_doe").await;
    let items_uri = format!(
        "/usr/v1/users/{}/wish-lists/{}/items",
        jane.id, jane.wish_list_id
    );
    for product in [1, 2] {
        let created = app
            .post(&items_uri, Some(&jane.token), json!({"product_item_id": product}))
            .await;
        assert_eq!(created.status, StatusCode::OK);
    }

    let resp = app
        .put(
            &format!("{items_uri}/2"),
            Some(&jane.token),
            json!({"product_item_id": 1}),
        )
        .await;

    assert_eq!(resp.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_empty_cart_checkout_creates_no_order() {
    let app = TestApp::memory();
    let jane = sign_up(&app, "jane_doe").await;
    let address = app
        .store
        .add_address(UserId::new(jane.id))
        .await
        .expect("address");

    let order = app
        .post(
            &format!(
                "/usr/v1/users/{}/shopping-carts/{}/finish-purchase",
                jane.id, jane.cart_id
            ),
            Some(&jane.token),
            json!({
                "user_address_id": address.as_i64(),
                "payment_type_id": 1,
                "shipping_method_id": 1,
                "order_status_id": 4,
                "order_total": "10.00"
            }),
        )
        .await;
    assert_eq!(order.status, StatusCode::FORBIDDEN);

    let admin = app.super_admin_token(1);
    let dashboard = app
        .get("/admin/v1/admins/1/dashboard?days=1", Some(&admin))
        .await;
    assert_eq!(dashboard.body["daily_revenue"][0]["revenue"], "0");
}
