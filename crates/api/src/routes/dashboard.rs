//! Admin dashboard summary.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use bazaar_core::store::{DailyRevenue, EntityCounts, OrderStatusCount};
use bazaar_core::{AdminId, Authorize};

use crate::error::Result;
use crate::extract::{ValidatedPath, ValidatedQuery};
use crate::middleware::AuthAdmin;
use crate::routes::app_policy::AdminPath;
use crate::state::AppState;

const DEFAULT_REVENUE_DAYS: u32 = 7;

#[derive(Debug, Default, Deserialize, Validate)]
pub struct DashboardQuery {
    /// How many days of completed-order revenue to include.
    #[validate(range(min = 1, max = 90))]
    pub days: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub products: EntityCounts,
    pub users: EntityCounts,
    pub orders_by_status: Vec<OrderStatusCount>,
    pub daily_revenue: Vec<DailyRevenue>,
}

/// GET /admin/v1/admins/{adminId}/dashboard
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    AuthAdmin(caller): AuthAdmin,
    ValidatedPath(path): ValidatedPath<AdminPath>,
    ValidatedQuery(query): ValidatedQuery<DashboardQuery>,
) -> Result<Json<DashboardResponse>> {
    caller.authorize(AdminId::new(path.admin_id))?;

    let dashboard = state.stores().dashboard.as_ref();
    let days = query.days.unwrap_or(DEFAULT_REVENUE_DAYS);

    let (products, users, orders_by_status, daily_revenue) = tokio::try_join!(
        dashboard.count_products(),
        dashboard.count_users(),
        dashboard.count_orders_by_status(),
        dashboard.list_completed_daily_revenue(days),
    )?;

    Ok(Json(DashboardResponse {
        products,
        users,
        orders_by_status,
        daily_revenue,
    }))
}
