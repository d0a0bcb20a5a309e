//! Wish-list route handlers.
//!
//! Reads come back joined with catalog data, one row per item.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;
use validator::Validate;

use bazaar_core::store::{
    CreateWishListItemParams, UpdateWishListItemParams, WishListItem, WishListItemKey,
};
use bazaar_core::{Authorize, ProductItemId, UserId, WishListId, WishListItemId};

use crate::assembler::{WishListItemRow, assemble_wish_list};
use crate::error::{AppError, Result};
use crate::extract::{ValidatedJson, ValidatedPath};
use crate::middleware::AuthUser;
use crate::routes::users::UserPath;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WishListPath {
    #[validate(range(min = 1))]
    pub user_id: i64,
    #[validate(range(min = 1))]
    pub wish_list_id: i64,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WishListItemPath {
    #[validate(range(min = 1))]
    pub user_id: i64,
    #[validate(range(min = 1))]
    pub wish_list_id: i64,
    #[validate(range(min = 1))]
    pub item_id: i64,
}

impl WishListItemPath {
    const fn key(&self) -> WishListItemKey {
        WishListItemKey {
            user_id: UserId::new(self.user_id),
            wish_list_id: WishListId::new(self.wish_list_id),
            id: WishListItemId::new(self.item_id),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateWishListItemRequest {
    #[validate(range(min = 1))]
    pub product_item_id: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateWishListItemRequest {
    #[validate(range(min = 1))]
    pub product_item_id: Option<i64>,
}

/// POST /usr/v1/users/{userId}/wish-lists/{wishListId}/items
#[instrument(skip(state))]
pub async fn create_item(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidatedPath(path): ValidatedPath<WishListPath>,
    ValidatedJson(body): ValidatedJson<CreateWishListItemRequest>,
) -> Result<Json<WishListItem>> {
    let user_id = UserId::new(path.user_id);
    caller.authorize(user_id)?;

    let item = state
        .stores()
        .wish_lists
        .create_wish_list_item(CreateWishListItemParams {
            user_id,
            wish_list_id: WishListId::new(path.wish_list_id),
            product_item_id: ProductItemId::new(body.product_item_id),
        })
        .await?;

    Ok(Json(item))
}

/// One wish-list item with its product.
///
/// GET /usr/v1/users/{userId}/wish-lists/{wishListId}/items/{itemId}
#[instrument(skip(state))]
pub async fn show_item(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidatedPath(path): ValidatedPath<WishListItemPath>,
) -> Result<Json<WishListItemRow>> {
    caller.authorize(UserId::new(path.user_id))?;

    let stores = state.stores();
    let item = stores.wish_lists.get_wish_list_item(path.key()).await?;

    let row = assemble_wish_list(stores.catalog.as_ref(), std::slice::from_ref(&item))
        .await?
        .pop()
        .ok_or_else(|| AppError::Internal("wish-list join dropped the item".into()))?;

    Ok(Json(row))
}

/// Every wish-list item the user has, across lists.
///
/// GET /usr/v1/users/{userId}/wish-lists/items
#[instrument(skip(state))]
pub async fn list_items(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidatedPath(path): ValidatedPath<UserPath>,
) -> Result<Json<Vec<WishListItemRow>>> {
    let user_id = UserId::new(path.user_id);
    caller.authorize(user_id)?;

    let stores = state.stores();
    let items = stores.wish_lists.list_wish_list_items_by_user(user_id).await?;
    let rows = assemble_wish_list(stores.catalog.as_ref(), &items).await?;

    Ok(Json(rows))
}

/// PUT /usr/v1/users/{userId}/wish-lists/{wishListId}/items/{itemId}
#[instrument(skip(state))]
pub async fn update_item(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidatedPath(path): ValidatedPath<WishListItemPath>,
    ValidatedJson(body): ValidatedJson<UpdateWishListItemRequest>,
) -> Result<Json<WishListItem>> {
    caller.authorize(UserId::new(path.user_id))?;

    let key = path.key();
    let item = state
        .stores()
        .wish_lists
        .update_wish_list_item(UpdateWishListItemParams {
            user_id: key.user_id,
            wish_list_id: key.wish_list_id,
            id: key.id,
            product_item_id: body.product_item_id.map(ProductItemId::new),
        })
        .await?;

    Ok(Json(item))
}

/// DELETE /usr/v1/users/{userId}/wish-lists/{wishListId}/items/{itemId}
#[instrument(skip(state))]
pub async fn delete_item(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidatedPath(path): ValidatedPath<WishListItemPath>,
) -> Result<Json<Value>> {
    caller.authorize(UserId::new(path.user_id))?;

    state
        .stores()
        .wish_lists
        .delete_wish_list_item(path.key())
        .await?;

    Ok(Json(json!({})))
}
