//! Read-only catalog lookups used to enrich cart and wish-list rows.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::StoreResult;
use crate::types::{Money, ProductItemId, PromotionId, SizeId};

/// A discount campaign attached to a category, brand or product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: PromotionId,
    pub name: String,
    pub description: String,
    /// Percentage off, 0..=100.
    pub discount_rate: i64,
    pub active: bool,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// A sellable product item with its display data and promotions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductItemDetails {
    pub id: ProductItemId,
    pub name: String,
    pub image: String,
    pub price: Money,
    pub active: bool,
    pub category_promo: Option<Promotion>,
    pub brand_promo: Option<Promotion>,
    pub product_promo: Option<Promotion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSize {
    pub id: SizeId,
    pub product_item_id: ProductItemId,
    pub size_value: String,
    pub qty: i32,
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Batch lookup; missing IDs are silently absent and order is unspecified.
    async fn list_product_items_by_ids(
        &self,
        ids: Vec<ProductItemId>,
    ) -> StoreResult<Vec<ProductItemDetails>>;

    /// Batch lookup; missing IDs are silently absent and order is unspecified.
    async fn list_product_sizes_by_ids(&self, ids: Vec<SizeId>) -> StoreResult<Vec<ProductSize>>;
}
