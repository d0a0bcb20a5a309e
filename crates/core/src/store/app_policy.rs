//! App-wide policy text (terms, privacy notice).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::StoreResult;
use crate::types::{AdminId, AppPolicyId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppPolicy {
    pub id: AppPolicyId,
    pub policy: String,
    pub created_by: AdminId,
    pub updated_by: Option<AdminId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAppPolicyParams {
    pub policy: String,
    pub admin_id: AdminId,
}

/// Partial update; `None` keeps the current policy text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAppPolicyParams {
    pub id: AppPolicyId,
    pub policy: Option<String>,
    pub admin_id: AdminId,
}

#[async_trait]
pub trait AppPolicyStore: Send + Sync {
    async fn create_app_policy(&self, params: CreateAppPolicyParams) -> StoreResult<AppPolicy>;

    async fn get_app_policy(&self, id: AppPolicyId) -> StoreResult<AppPolicy>;

    /// The most recently created policy; the one shown to shoppers.
    async fn get_latest_app_policy(&self) -> StoreResult<AppPolicy>;

    async fn update_app_policy(&self, params: UpdateAppPolicyParams) -> StoreResult<AppPolicy>;

    async fn delete_app_policy(&self, id: AppPolicyId) -> StoreResult<()>;
}
