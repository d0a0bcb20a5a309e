//! Aggregate counters for the admin dashboard.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::StoreResult;
use crate::types::Money;

/// Total and active counts of one kind of record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntityCounts {
    pub total: i64,
    pub active: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatusCount {
    pub status: String,
    pub count: i64,
}

/// Revenue of completed orders on one calendar day (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRevenue {
    pub day: NaiveDate,
    pub revenue: Money,
}

#[async_trait]
pub trait DashboardStore: Send + Sync {
    async fn count_products(&self) -> StoreResult<EntityCounts>;

    /// Active means not blocked.
    async fn count_users(&self) -> StoreResult<EntityCounts>;

    async fn count_orders_by_status(&self) -> StoreResult<Vec<OrderStatusCount>>;

    /// Completed-order revenue for each of the last `days` days, oldest first.
    async fn list_completed_daily_revenue(&self, days: u32) -> StoreResult<Vec<DailyRevenue>>;
}
