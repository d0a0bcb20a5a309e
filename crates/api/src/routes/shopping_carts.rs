//! Shopping-cart route handlers and checkout.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;
use validator::Validate;

use bazaar_core::store::{
    CreateShoppingCartItemParams, FinishPurchaseParams, ShopOrder, ShoppingCartItem,
    ShoppingCartItemKey, ShoppingCartScope, UpdateShoppingCartItemParams,
};
use bazaar_core::{
    AddressId, Authorize, Money, OrderStatusId, PaymentTypeId, ProductItemId, ShippingMethodId,
    ShoppingCartId, ShoppingCartItemId, SizeId, UserId,
};

use crate::assembler::{CartItemRow, assemble_cart};
use crate::error::Result;
use crate::extract::{ValidatedJson, ValidatedPath, order_total_in_range};
use crate::middleware::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CartPath {
    #[validate(range(min = 1))]
    pub user_id: i64,
    #[validate(range(min = 1))]
    pub cart_id: i64,
}

impl CartPath {
    const fn scope(&self) -> ShoppingCartScope {
        ShoppingCartScope {
            user_id: UserId::new(self.user_id),
            shopping_cart_id: ShoppingCartId::new(self.cart_id),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CartItemPath {
    #[validate(range(min = 1))]
    pub user_id: i64,
    #[validate(range(min = 1))]
    pub cart_id: i64,
    #[validate(range(min = 1))]
    pub item_id: i64,
}

impl CartItemPath {
    const fn key(&self) -> ShoppingCartItemKey {
        ShoppingCartItemKey {
            user_id: UserId::new(self.user_id),
            shopping_cart_id: ShoppingCartId::new(self.cart_id),
            id: ShoppingCartItemId::new(self.item_id),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCartItemRequest {
    #[validate(range(min = 1))]
    pub product_item_id: i64,
    #[validate(range(min = 1))]
    pub size_id: i64,
    #[validate(range(min = 1))]
    pub qty: i32,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCartItemRequest {
    #[validate(range(min = 1))]
    pub product_item_id: Option<i64>,
    #[validate(range(min = 1))]
    pub size_id: Option<i64>,
    #[validate(range(min = 1))]
    pub qty: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct FinishPurchaseRequest {
    #[validate(range(min = 1))]
    pub user_address_id: i64,
    #[validate(range(min = 1))]
    pub payment_type_id: i64,
    #[validate(range(min = 1))]
    pub shipping_method_id: i64,
    #[validate(range(min = 1))]
    pub order_status_id: i64,
    #[validate(custom(function = "order_total_in_range"))]
    pub order_total: Money,
}

/// POST /usr/v1/users/{userId}/shopping-carts/{cartId}/items
#[instrument(skip(state))]
pub async fn create_item(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidatedPath(path): ValidatedPath<CartPath>,
    ValidatedJson(body): ValidatedJson<CreateCartItemRequest>,
) -> Result<Json<ShoppingCartItem>> {
    let scope = path.scope();
    caller.authorize(scope.user_id)?;

    let item = state
        .stores()
        .carts
        .create_shopping_cart_item(CreateShoppingCartItemParams {
            user_id: scope.user_id,
            shopping_cart_id: scope.shopping_cart_id,
            product_item_id: ProductItemId::new(body.product_item_id),
            size_id: SizeId::new(body.size_id),
            qty: body.qty,
        })
        .await?;

    Ok(Json(item))
}

/// Cart contents joined with product and size details.
///
/// GET /usr/v1/users/{userId}/shopping-carts/{cartId}/items
#[instrument(skip(state))]
pub async fn list_items(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidatedPath(path): ValidatedPath<CartPath>,
) -> Result<Json<Vec<CartItemRow>>> {
    let scope = path.scope();
    caller.authorize(scope.user_id)?;

    let stores = state.stores();
    let items = stores.carts.list_shopping_cart_items(scope).await?;
    let rows = assemble_cart(stores.catalog.as_ref(), &items).await?;

    Ok(Json(rows))
}

/// PUT /usr/v1/users/{userId}/shopping-carts/{cartId}/items/{itemId}
#[instrument(skip(state))]
pub async fn update_item(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidatedPath(path): ValidatedPath<CartItemPath>,
    ValidatedJson(body): ValidatedJson<UpdateCartItemRequest>,
) -> Result<Json<ShoppingCartItem>> {
    let key = path.key();
    caller.authorize(key.user_id)?;

    let item = state
        .stores()
        .carts
        .update_shopping_cart_item(UpdateShoppingCartItemParams {
            user_id: key.user_id,
            shopping_cart_id: key.shopping_cart_id,
            id: key.id,
            product_item_id: body.product_item_id.map(ProductItemId::new),
            size_id: body.size_id.map(SizeId::new),
            qty: body.qty,
        })
        .await?;

    Ok(Json(item))
}

/// DELETE /usr/v1/users/{userId}/shopping-carts/{cartId}/items/{itemId}
#[instrument(skip(state))]
pub async fn delete_item(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidatedPath(path): ValidatedPath<CartItemPath>,
) -> Result<Json<Value>> {
    let key = path.key();
    caller.authorize(key.user_id)?;

    state.stores().carts.delete_shopping_cart_item(key).await?;

    Ok(Json(json!({})))
}

/// Turn the cart into an order.
///
/// POST /usr/v1/users/{userId}/shopping-carts/{cartId}/finish-purchase
///
/// The store writes the order and empties the cart in one step.
#[instrument(skip(state))]
pub async fn finish_purchase(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidatedPath(path): ValidatedPath<CartPath>,
    ValidatedJson(body): ValidatedJson<FinishPurchaseRequest>,
) -> Result<Json<ShopOrder>> {
    let scope = path.scope();
    caller.authorize(scope.user_id)?;

    let order = state
        .stores()
        .carts
        .finish_purchase(FinishPurchaseParams {
            user_id: scope.user_id,
            shopping_cart_id: scope.shopping_cart_id,
            user_address_id: AddressId::new(body.user_address_id),
            payment_type_id: PaymentTypeId::new(body.payment_type_id),
            shipping_method_id: ShippingMethodId::new(body.shipping_method_id),
            order_status_id: OrderStatusId::new(body.order_status_id),
            order_total: body.order_total,
        })
        .await?;

    tracing::info!(order_id = %order.id, total = %order.order_total, "Purchase finished");
    Ok(Json(order))
}
