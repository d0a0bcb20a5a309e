//! Catalog and reference data loaded into the in-memory store.

use chrono::{TimeDelta, Utc};

use bazaar_core::store::{ProductItemDetails, ProductSize, Promotion};
use bazaar_core::{
    Money, OrderStatusId, PaymentTypeId, ProductItemId, PromotionId, ShippingMethodId, SizeId,
};

/// Name of the order status whose orders count as revenue.
pub const COMPLETED_STATUS: &str = "completed";

/// Read-only rows the API never writes.
#[derive(Debug, Clone, Default)]
pub struct CatalogSeed {
    pub products: Vec<ProductItemDetails>,
    pub sizes: Vec<ProductSize>,
    pub payment_types: Vec<PaymentTypeId>,
    pub shipping_methods: Vec<ShippingMethodId>,
    pub order_statuses: Vec<(OrderStatusId, String)>,
}

impl CatalogSeed {
    /// Reference rows only: payment types, shipping methods, order statuses.
    #[must_use]
    pub fn reference_data() -> Self {
        Self {
            payment_types: vec![PaymentTypeId::new(1), PaymentTypeId::new(2)],
            shipping_methods: vec![ShippingMethodId::new(1), ShippingMethodId::new(2)],
            order_statuses: ["pending", "processing", "shipped", COMPLETED_STATUS, "cancelled"]
                .into_iter()
                .zip(1..)
                .map(|(name, id)| (OrderStatusId::new(id), name.to_string()))
                .collect(),
            ..Self::default()
        }
    }

    /// A small demo catalog for local runs.
    #[must_use]
    pub fn demo() -> Self {
        let now = Utc::now();
        let summer_sale = Promotion {
            id: PromotionId::new(1),
            name: "Summer sale".to_string(),
            description: "Seasonal discount on outerwear".to_string(),
            discount_rate: 15,
            active: true,
            start_date: now - TimeDelta::days(7),
            end_date: now + TimeDelta::days(30),
        };

        let product = |id: i64, name: &str, cents: i64, promo: Option<Promotion>| {
            ProductItemDetails {
                id: ProductItemId::new(id),
                name: name.to_string(),
                image: format!("https://images.bazaar.test/products/{id}.jpg"),
                price: Money::from_cents(cents),
                active: true,
                category_promo: promo,
                brand_promo: None,
                product_promo: None,
            }
        };

        let mut sizes = Vec::new();
        let mut next_size_id = 0;
        for (product_id, values) in [
            (1, ["S", "M", "L"]),
            (2, ["S", "M", "L"]),
            (3, ["38", "40", "42"]),
        ] {
            for value in values {
                next_size_id += 1;
                sizes.push(ProductSize {
                    id: SizeId::new(next_size_id),
                    product_item_id: ProductItemId::new(product_id),
                    size_value: value.to_string(),
                    qty: 25,
                });
            }
        }

        Self {
            products: vec![
                product(1, "Linen shirt", 3999, None),
                product(2, "Rain jacket", 8950, Some(summer_sale)),
                product(3, "Leather boots", 12900, None),
            ],
            sizes,
            ..Self::reference_data()
        }
    }
}
