//! Canned records for mock answers.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};

use bazaar_core::store::{
    Admin, AppPolicy, Notification, ProductItemDetails, ProductSize, Promotion, ShopOrder,
    ShoppingCartItem, User, WishListItem,
};
use bazaar_core::{
    AddressId, AdminId, AdminType, AppPolicyId, Email, Money, OrderId, OrderStatusId,
    PaymentTypeId, ProductItemId, PromotionId, ShippingMethodId, ShoppingCartId,
    ShoppingCartItemId, SizeId, UserId, WishListId, WishListItemId,
};

/// Fixed timestamp so canned records compare equal across calls.
#[must_use]
pub fn timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// # Panics
///
/// Panics if `username` does not form a valid email local part.
#[must_use]
pub fn user(id: i64, username: &str) -> User {
    User {
        id: UserId::new(id),
        username: username.to_string(),
        email: Email::parse(&format!("{username}@shop.test")).expect("fixture email"),
        telephone: None,
        hashed_password: "$argon2id$v=19$m=19456,t=2,p=1$fixture".to_string(),
        is_blocked: false,
        is_email_verified: false,
        shopping_cart_id: ShoppingCartId::new(id),
        wish_list_id: WishListId::new(id),
        created_at: timestamp(),
        updated_at: timestamp(),
    }
}

/// # Panics
///
/// Panics if `username` does not form a valid email local part.
#[must_use]
pub fn admin(id: i64, username: &str, admin_type: AdminType) -> Admin {
    Admin {
        id: AdminId::new(id),
        username: username.to_string(),
        email: Email::parse(&format!("{username}@admin.shop.test")).expect("fixture email"),
        hashed_password: "$argon2id$v=19$m=19456,t=2,p=1$fixture".to_string(),
        admin_type,
        active: true,
        created_at: timestamp(),
    }
}

#[must_use]
pub fn app_policy(id: i64, admin_id: i64, policy: &str) -> AppPolicy {
    AppPolicy {
        id: AppPolicyId::new(id),
        policy: policy.to_string(),
        created_by: AdminId::new(admin_id),
        updated_by: None,
        created_at: timestamp(),
        updated_at: None,
    }
}

#[must_use]
pub fn notification(user_id: i64, device_id: &str) -> Notification {
    Notification {
        user_id: UserId::new(user_id),
        device_id: device_id.to_string(),
        enabled: true,
        order_updates: true,
        promotions: false,
        created_at: timestamp(),
        updated_at: None,
    }
}

#[must_use]
pub fn cart_item(id: i64, cart_id: i64, product_item_id: i64, size_id: i64) -> ShoppingCartItem {
    ShoppingCartItem {
        id: ShoppingCartItemId::new(id),
        shopping_cart_id: ShoppingCartId::new(cart_id),
        product_item_id: ProductItemId::new(product_item_id),
        size_id: SizeId::new(size_id),
        qty: 1,
        created_at: timestamp(),
        updated_at: None,
    }
}

#[must_use]
pub fn wish_list_item(id: i64, wish_list_id: i64, product_item_id: i64) -> WishListItem {
    WishListItem {
        id: WishListItemId::new(id),
        wish_list_id: WishListId::new(wish_list_id),
        product_item_id: ProductItemId::new(product_item_id),
        created_at: timestamp(),
        updated_at: None,
    }
}

#[must_use]
pub fn promotion(id: i64, name: &str, discount_rate: i64) -> Promotion {
    Promotion {
        id: PromotionId::new(id),
        name: name.to_string(),
        description: format!("{name} campaign"),
        discount_rate,
        active: true,
        start_date: timestamp(),
        end_date: timestamp() + TimeDelta::days(30),
    }
}

/// Product `id` priced at `id` whole currency units.
#[must_use]
pub fn product(id: i64) -> ProductItemDetails {
    ProductItemDetails {
        id: ProductItemId::new(id),
        name: format!("Product {id}"),
        image: format!("https://images.shop.test/{id}.jpg"),
        price: Money::from_cents(id * 100),
        active: true,
        category_promo: None,
        brand_promo: None,
        product_promo: None,
    }
}

#[must_use]
pub fn size(id: i64, product_item_id: i64, size_value: &str) -> ProductSize {
    ProductSize {
        id: SizeId::new(id),
        product_item_id: ProductItemId::new(product_item_id),
        size_value: size_value.to_string(),
        qty: 10,
    }
}

#[must_use]
pub fn order(id: i64, user_id: i64, total_cents: i64) -> ShopOrder {
    ShopOrder {
        id: OrderId::new(id),
        user_id: UserId::new(user_id),
        payment_type_id: PaymentTypeId::new(1),
        shipping_address_id: AddressId::new(1),
        shipping_method_id: ShippingMethodId::new(1),
        order_status_id: OrderStatusId::new(1),
        order_total: Money::from_cents(total_cents),
        line_count: 1,
        created_at: timestamp(),
    }
}
