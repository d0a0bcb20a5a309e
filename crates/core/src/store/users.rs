//! End-user accounts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::StoreResult;
use crate::types::{Email, ShoppingCartId, UserId, WishListId};

/// A shop customer account.
///
/// Every user owns exactly one shopping cart and one wish list, created
/// together with the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: Email,
    pub telephone: Option<String>,
    pub hashed_password: String,
    pub is_blocked: bool,
    pub is_email_verified: bool,
    pub shopping_cart_id: ShoppingCartId,
    pub wish_list_id: WishListId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserParams {
    pub username: String,
    pub email: Email,
    pub telephone: Option<String>,
    pub hashed_password: String,
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserParams {
    pub id: UserId,
    pub username: Option<String>,
    pub email: Option<Email>,
    pub telephone: Option<String>,
    pub hashed_password: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUsersParams {
    pub limit: i64,
    pub offset: i64,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create a user together with their shopping cart and wish list.
    ///
    /// Fails with a unique-constraint error if the username or email is taken.
    async fn create_user(&self, params: CreateUserParams) -> StoreResult<User>;

    async fn get_user(&self, id: UserId) -> StoreResult<User>;

    async fn get_user_by_username(&self, username: String) -> StoreResult<User>;

    async fn update_user(&self, params: UpdateUserParams) -> StoreResult<User>;

    async fn delete_user(&self, id: UserId) -> StoreResult<()>;

    /// Users ordered by ID.
    async fn list_users(&self, params: ListUsersParams) -> StoreResult<Vec<User>>;
}
