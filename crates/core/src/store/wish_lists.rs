//! Wish lists.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::StoreResult;
use crate::types::{ProductItemId, UserId, WishListId, WishListItemId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishListItem {
    pub id: WishListItemId,
    pub wish_list_id: WishListId,
    pub product_item_id: ProductItemId,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WishListItemKey {
    pub user_id: UserId,
    pub wish_list_id: WishListId,
    pub id: WishListItemId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateWishListItemParams {
    pub user_id: UserId,
    pub wish_list_id: WishListId,
    pub product_item_id: ProductItemId,
}

/// Partial update; `None` leaves the product item untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateWishListItemParams {
    pub user_id: UserId,
    pub wish_list_id: WishListId,
    pub id: WishListItemId,
    pub product_item_id: Option<ProductItemId>,
}

#[async_trait]
pub trait WishListStore: Send + Sync {
    /// Fails with `NotFound` if the wish list does not belong to the user and
    /// with a foreign-key error if the product item does not exist.
    async fn create_wish_list_item(
        &self,
        params: CreateWishListItemParams,
    ) -> StoreResult<WishListItem>;

    async fn get_wish_list_item(&self, key: WishListItemKey) -> StoreResult<WishListItem>;

    /// Every wish-list item the user owns, in insertion order.
    async fn list_wish_list_items_by_user(&self, user_id: UserId)
    -> StoreResult<Vec<WishListItem>>;

    async fn update_wish_list_item(
        &self,
        params: UpdateWishListItemParams,
    ) -> StoreResult<WishListItem>;

    async fn delete_wish_list_item(&self, key: WishListItemKey) -> StoreResult<()>;
}
