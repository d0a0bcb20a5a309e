//! HTTP route handlers.
//!
//! Every handler follows the same steps: extract the caller's token,
//! validate path/query/body, check ownership, call the store, and let
//! `AppError` translate failures.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                                                 - Health check
//!
//! # Public
//! POST /api/v1/users                                           - Sign up
//! POST /api/v1/users/login                                     - User login
//! GET  /api/v1/app-policy                                      - Latest app policy
//!
//! # User (owner token)
//! GET|PUT|DELETE /api/v1/users/{userId}                        - Account
//! POST           /usr/v1/users/{userId}/notification           - Register device
//! GET|PUT|DELETE /usr/v1/users/{userId}/notification/{deviceId}
//! GET            /usr/v1/users/{userId}/wish-lists/items       - All wish-list items
//! POST           /usr/v1/users/{userId}/wish-lists/{wishListId}/items
//! GET|PUT|DELETE /usr/v1/users/{userId}/wish-lists/{wishListId}/items/{itemId}
//! GET|POST       /usr/v1/users/{userId}/shopping-carts/{cartId}/items
//! PUT|DELETE     /usr/v1/users/{userId}/shopping-carts/{cartId}/items/{itemId}
//! POST           /usr/v1/users/{userId}/shopping-carts/{cartId}/finish-purchase
//!
//! # Admin (super admin token)
//! POST /admin/v1/admins/login                                  - Admin login
//! GET  /admin/v1/admins/{adminId}                              - Own admin account
//! POST /admin/v1/admins/{adminId}/admins                       - Create admin
//! POST /admin/v1/admins/{adminId}/app-policy
//! GET|PUT|DELETE /admin/v1/admins/{adminId}/app-policy/{id}
//! GET  /admin/v1/admins/{adminId}/dashboard
//! GET  /api/admin/{adminId}/v1/users                           - List users
//! ```

pub mod admins;
pub mod app_policy;
pub mod dashboard;
pub mod notifications;
pub mod shopping_carts;
pub mod users;
pub mod wish_lists;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Public and owner-scoped account routes under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/v1/users", post(users::create))
        .route("/v1/users/login", post(users::login))
        .route(
            "/v1/users/{userId}",
            get(users::show).put(users::update).delete(users::delete),
        )
        .route("/v1/app-policy", get(app_policy::show_latest))
        .route("/admin/{adminId}/v1/users", get(users::list))
}

/// End-user routes under `/usr/v1/users/{userId}`.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/notification", post(notifications::create))
        .route(
            "/notification/{deviceId}",
            get(notifications::show)
                .put(notifications::update)
                .delete(notifications::delete),
        )
        .route("/wish-lists/items", get(wish_lists::list_items))
        .route(
            "/wish-lists/{wishListId}/items",
            post(wish_lists::create_item),
        )
        .route(
            "/wish-lists/{wishListId}/items/{itemId}",
            get(wish_lists::show_item)
                .put(wish_lists::update_item)
                .delete(wish_lists::delete_item),
        )
        .route(
            "/shopping-carts/{cartId}/items",
            get(shopping_carts::list_items).post(shopping_carts::create_item),
        )
        .route(
            "/shopping-carts/{cartId}/items/{itemId}",
            put(shopping_carts::update_item).delete(shopping_carts::delete_item),
        )
        .route(
            "/shopping-carts/{cartId}/finish-purchase",
            post(shopping_carts::finish_purchase),
        )
}

/// Admin routes under `/admin/v1/admins`.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(admins::login))
        .route("/{adminId}", get(admins::show))
        .route("/{adminId}/admins", post(admins::create))
        .route("/{adminId}/app-policy", post(app_policy::create))
        .route(
            "/{adminId}/app-policy/{id}",
            get(app_policy::show)
                .put(app_policy::update)
                .delete(app_policy::delete),
        )
        .route("/{adminId}/dashboard", get(dashboard::show))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api", api_routes())
        .nest("/usr/v1/users/{userId}", user_routes())
        .nest("/admin/v1/admins", admin_routes())
}
