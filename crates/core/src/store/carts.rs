//! Shopping carts and checkout.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::StoreResult;
use crate::types::{
    AddressId, Money, OrderId, OrderStatusId, PaymentTypeId, ProductItemId, ShippingMethodId,
    ShoppingCartId, ShoppingCartItemId, SizeId, UserId,
};

/// One line in a shopping cart: a product item in a given size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingCartItem {
    pub id: ShoppingCartItemId,
    pub shopping_cart_id: ShoppingCartId,
    pub product_item_id: ProductItemId,
    pub size_id: SizeId,
    pub qty: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A cart as seen by its owner.
///
/// The store only resolves carts that belong to `user_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShoppingCartScope {
    pub user_id: UserId,
    pub shopping_cart_id: ShoppingCartId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShoppingCartItemKey {
    pub user_id: UserId,
    pub shopping_cart_id: ShoppingCartId,
    pub id: ShoppingCartItemId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateShoppingCartItemParams {
    pub user_id: UserId,
    pub shopping_cart_id: ShoppingCartId,
    pub product_item_id: ProductItemId,
    pub size_id: SizeId,
    pub qty: i32,
}

/// Partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateShoppingCartItemParams {
    pub user_id: UserId,
    pub shopping_cart_id: ShoppingCartId,
    pub id: ShoppingCartItemId,
    pub product_item_id: Option<ProductItemId>,
    pub size_id: Option<SizeId>,
    pub qty: Option<i32>,
}

/// Everything needed to turn a cart into an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishPurchaseParams {
    pub user_id: UserId,
    pub shopping_cart_id: ShoppingCartId,
    pub user_address_id: AddressId,
    pub payment_type_id: PaymentTypeId,
    pub shipping_method_id: ShippingMethodId,
    pub order_status_id: OrderStatusId,
    pub order_total: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopOrder {
    pub id: OrderId,
    pub user_id: UserId,
    pub payment_type_id: PaymentTypeId,
    pub shipping_address_id: AddressId,
    pub shipping_method_id: ShippingMethodId,
    pub order_status_id: OrderStatusId,
    pub order_total: Money,
    pub line_count: i64,
    pub created_at: DateTime<Utc>,
}

#[async_trait]
pub trait ShoppingCartStore: Send + Sync {
    /// Fails with `NotFound` if the cart does not belong to the user and with
    /// a foreign-key error if the product item or size does not exist.
    async fn create_shopping_cart_item(
        &self,
        params: CreateShoppingCartItemParams,
    ) -> StoreResult<ShoppingCartItem>;

    /// Items in insertion order.
    async fn list_shopping_cart_items(
        &self,
        scope: ShoppingCartScope,
    ) -> StoreResult<Vec<ShoppingCartItem>>;

    /// Fails with a uniqueness error if the new product item and size
    /// already have their own line in the cart.
    async fn update_shopping_cart_item(
        &self,
        params: UpdateShoppingCartItemParams,
    ) -> StoreResult<ShoppingCartItem>;

    async fn delete_shopping_cart_item(&self, key: ShoppingCartItemKey) -> StoreResult<()>;

    /// Atomically create an order from the cart and empty it.
    ///
    /// Either the order exists and the cart is empty, or nothing changed.
    /// An empty cart is a check-constraint error.
    async fn finish_purchase(&self, params: FinishPurchaseParams) -> StoreResult<ShopOrder>;
}
