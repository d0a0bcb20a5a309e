//! Joins cart and wish-list rows with their catalog records.
//!
//! Items are read first; the product and size batches are then fetched
//! concurrently with de-duplicated ID sets and indexed by ID. Every item
//! yields exactly one row, in input order, whether or not its product or
//! size could be found.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use chrono::{DateTime, Utc};
use serde::Serialize;

use bazaar_core::store::{
    CatalogStore, ProductItemDetails, ProductSize, Promotion, ShoppingCartItem, StoreResult,
    WishListItem,
};
use bazaar_core::{
    Money, ProductItemId, ShoppingCartId, ShoppingCartItemId, SizeId, WishListId, WishListItemId,
};

/// A row that points into the catalog.
pub trait LineItem {
    fn product_item_id(&self) -> ProductItemId;

    /// Size the row was added in, for rows that carry one.
    fn size_id(&self) -> Option<SizeId> {
        None
    }
}

impl LineItem for ShoppingCartItem {
    fn product_item_id(&self) -> ProductItemId {
        self.product_item_id
    }

    fn size_id(&self) -> Option<SizeId> {
        Some(self.size_id)
    }
}

impl LineItem for WishListItem {
    fn product_item_id(&self) -> ProductItemId {
        self.product_item_id
    }
}

/// How completely a row was resolved against the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinStatus {
    Resolved,
    MissingProduct,
    /// The size is unknown or belongs to a different product item.
    MissingSize,
}

/// One item with whatever catalog data matched it.
#[derive(Debug)]
pub struct Joined<'a, I> {
    pub item: &'a I,
    pub product: Option<&'a ProductItemDetails>,
    pub size: Option<&'a ProductSize>,
    pub status: JoinStatus,
}

/// Distinct values in first-seen order.
fn distinct<T: Copy + Eq + Hash>(values: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    values.into_iter().filter(|v| seen.insert(*v)).collect()
}

/// Correlate items with product and size batches.
///
/// Batches may be in any order and may contain records nobody asked for.
pub fn correlate<'a, I: LineItem>(
    items: &'a [I],
    products: &'a [ProductItemDetails],
    sizes: &'a [ProductSize],
) -> Vec<Joined<'a, I>> {
    let products: HashMap<ProductItemId, &ProductItemDetails> =
        products.iter().map(|p| (p.id, p)).collect();
    let sizes: HashMap<SizeId, &ProductSize> = sizes.iter().map(|s| (s.id, s)).collect();

    items
        .iter()
        .map(|item| {
            let product = products.get(&item.product_item_id()).copied();
            let size = item
                .size_id()
                .and_then(|id| sizes.get(&id).copied())
                .filter(|size| size.product_item_id == item.product_item_id());

            let status = match (product, item.size_id(), size) {
                (None, _, _) => JoinStatus::MissingProduct,
                (Some(_), Some(_), None) => JoinStatus::MissingSize,
                _ => JoinStatus::Resolved,
            };

            Joined {
                item,
                product,
                size,
                status,
            }
        })
        .collect()
}

/// Fetch the catalog records a list of items refers to.
///
/// Issues no calls for an empty list and skips the size lookup when no item
/// carries a size.
///
/// # Errors
///
/// Returns the first store error from either lookup.
pub async fn fetch_catalog<I: LineItem>(
    catalog: &dyn CatalogStore,
    items: &[I],
) -> StoreResult<(Vec<ProductItemDetails>, Vec<ProductSize>)> {
    if items.is_empty() {
        return Ok((Vec::new(), Vec::new()));
    }

    let product_ids = distinct(items.iter().map(LineItem::product_item_id));
    let size_ids = distinct(items.iter().filter_map(LineItem::size_id));

    let sizes = async {
        if size_ids.is_empty() {
            Ok(Vec::new())
        } else {
            catalog.list_product_sizes_by_ids(size_ids).await
        }
    };

    tokio::try_join!(catalog.list_product_items_by_ids(product_ids), sizes)
}

/// Product columns shared by cart and wish-list rows; `null` when unresolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductColumns {
    pub name: Option<String>,
    pub image: Option<String>,
    pub price: Option<Money>,
    pub active: Option<bool>,
    pub category_promo: Option<Promotion>,
    pub brand_promo: Option<Promotion>,
    pub product_promo: Option<Promotion>,
}

impl From<Option<&ProductItemDetails>> for ProductColumns {
    fn from(product: Option<&ProductItemDetails>) -> Self {
        product.map_or_else(Self::default, |p| Self {
            name: Some(p.name.clone()),
            image: Some(p.image.clone()),
            price: Some(p.price),
            active: Some(p.active),
            category_promo: p.category_promo.clone(),
            brand_promo: p.brand_promo.clone(),
            product_promo: p.product_promo.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItemRow {
    pub id: ShoppingCartItemId,
    pub shopping_cart_id: ShoppingCartId,
    pub product_item_id: ProductItemId,
    pub size_id: SizeId,
    pub qty: i32,
    pub size_value: Option<String>,
    pub size_qty: Option<i32>,
    #[serde(flatten)]
    pub product: ProductColumns,
    pub status: JoinStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Joined<'_, ShoppingCartItem>> for CartItemRow {
    fn from(joined: Joined<'_, ShoppingCartItem>) -> Self {
        let item = joined.item;
        Self {
            id: item.id,
            shopping_cart_id: item.shopping_cart_id,
            product_item_id: item.product_item_id,
            size_id: item.size_id,
            qty: item.qty,
            size_value: joined.size.map(|s| s.size_value.clone()),
            size_qty: joined.size.map(|s| s.qty),
            product: joined.product.into(),
            status: joined.status,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WishListItemRow {
    pub id: WishListItemId,
    pub wish_list_id: WishListId,
    pub product_item_id: ProductItemId,
    #[serde(flatten)]
    pub product: ProductColumns,
    pub status: JoinStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Joined<'_, WishListItem>> for WishListItemRow {
    fn from(joined: Joined<'_, WishListItem>) -> Self {
        let item = joined.item;
        Self {
            id: item.id,
            wish_list_id: item.wish_list_id,
            product_item_id: item.product_item_id,
            product: joined.product.into(),
            status: joined.status,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

/// Build the joined listing for a cart.
///
/// # Errors
///
/// Returns the first store error from the catalog lookups.
pub async fn assemble_cart(
    catalog: &dyn CatalogStore,
    items: &[ShoppingCartItem],
) -> StoreResult<Vec<CartItemRow>> {
    let (products, sizes) = fetch_catalog(catalog, items).await?;
    Ok(correlate(items, &products, &sizes)
        .into_iter()
        .map(CartItemRow::from)
        .collect())
}

/// Build the joined listing for wish-list items.
///
/// # Errors
///
/// Returns the first store error from the catalog lookup.
pub async fn assemble_wish_list(
    catalog: &dyn CatalogStore,
    items: &[WishListItem],
) -> StoreResult<Vec<WishListItemRow>> {
    let (products, _) = fetch_catalog(catalog, items).await?;
    Ok(correlate(items, &products, &[])
        .into_iter()
        .map(WishListItemRow::from)
        .collect())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn cart_item(id: i64, product: i64, size: i64) -> ShoppingCartItem {
        ShoppingCartItem {
            id: ShoppingCartItemId::new(id),
            shopping_cart_id: ShoppingCartId::new(1),
            product_item_id: ProductItemId::new(product),
            size_id: SizeId::new(size),
            qty: 1,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn wish_item(id: i64, product: i64) -> WishListItem {
        WishListItem {
            id: WishListItemId::new(id),
            wish_list_id: WishListId::new(1),
            product_item_id: ProductItemId::new(product),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn product(id: i64) -> ProductItemDetails {
        ProductItemDetails {
            id: ProductItemId::new(id),
            name: format!("product-{id}"),
            image: format!("https://img.test/{id}.png"),
            price: Money::from_cents(id * 100),
            active: true,
            category_promo: None,
            brand_promo: None,
            product_promo: None,
        }
    }

    fn size(id: i64, product: i64) -> ProductSize {
        ProductSize {
            id: SizeId::new(id),
            product_item_id: ProductItemId::new(product),
            size_value: format!("S{id}"),
            qty: 10,
        }
    }

    #[test]
    fn test_rows_follow_item_order_with_unordered_batches() {
        let items = vec![cart_item(1, 10, 1), cart_item(2, 20, 2), cart_item(3, 30, 3)];
        let products = vec![product(30), product(10), product(20)];
        let sizes = vec![size(3, 30), size(1, 10), size(2, 20)];

        let rows: Vec<CartItemRow> = correlate(&items, &products, &sizes)
            .into_iter()
            .map(CartItemRow::from)
            .collect();

        assert_eq!(rows.len(), 3);
        for (row, (product_id, size_id)) in rows.iter().zip([(10, 1), (20, 2), (30, 3)]) {
            assert_eq!(row.product_item_id, ProductItemId::new(product_id));
            assert_eq!(row.size_id, SizeId::new(size_id));
            assert_eq!(row.product.name.as_deref(), Some(&*format!("product-{product_id}")));
            assert_eq!(row.size_value.as_deref(), Some(&*format!("S{size_id}")));
            assert_eq!(row.status, JoinStatus::Resolved);
        }
    }

    #[test]
    fn test_shared_product_fills_every_row() {
        let items = vec![cart_item(1, 10, 1), cart_item(2, 10, 2)];
        let products = vec![product(10)];
        let sizes = vec![size(1, 10), size(2, 10)];

        let joined = correlate(&items, &products, &sizes);
        assert_eq!(joined.len(), 2);
        assert!(joined.iter().all(|j| j.status == JoinStatus::Resolved));
        assert_eq!(joined[0].size.unwrap().id, SizeId::new(1));
        assert_eq!(joined[1].size.unwrap().id, SizeId::new(2));
    }

    #[test]
    fn test_unresolved_rows_are_kept_and_tagged() {
        let items = vec![cart_item(1, 10, 1), cart_item(2, 99, 2), cart_item(3, 10, 7)];
        let products = vec![product(10)];
        // size 7 exists but belongs to another product item
        let sizes = vec![size(1, 10), size(7, 42)];

        let rows: Vec<CartItemRow> = correlate(&items, &products, &sizes)
            .into_iter()
            .map(CartItemRow::from)
            .collect();

        assert_eq!(rows[0].status, JoinStatus::Resolved);
        assert_eq!(rows[1].status, JoinStatus::MissingProduct);
        assert_eq!(rows[1].product, ProductColumns::default());
        assert_eq!(rows[2].status, JoinStatus::MissingSize);
        assert_eq!(rows[2].size_value, None);
    }

    #[test]
    fn test_wish_list_rows_need_no_size() {
        let items = vec![wish_item(1, 20), wish_item(2, 10)];
        let products = vec![product(10), product(20)];

        let rows: Vec<WishListItemRow> = correlate(&items, &products, &[])
            .into_iter()
            .map(WishListItemRow::from)
            .collect();

        assert_eq!(rows[0].product.name.as_deref(), Some("product-20"));
        assert_eq!(rows[1].product.name.as_deref(), Some("product-10"));
        assert!(rows.iter().all(|r| r.status == JoinStatus::Resolved));
    }

    #[test]
    fn test_unresolved_columns_serialize_as_null() {
        let items = vec![wish_item(1, 5)];
        let row = WishListItemRow::from(correlate(&items, &[], &[]).remove(0));
        let json = serde_json::to_value(&row).unwrap();

        assert_eq!(json["status"], "missing_product");
        assert!(json["name"].is_null());
        assert!(json["price"].is_null());
        assert_eq!(json["product_item_id"], 5);
    }

    #[test]
    fn test_distinct_keeps_first_seen_order() {
        assert_eq!(distinct([3, 1, 3, 2, 1]), vec![3, 1, 2]);
    }
}
