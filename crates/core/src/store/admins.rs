//! Admin accounts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::StoreResult;
use crate::types::{AdminId, AdminType, Email};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
    pub id: AdminId,
    pub username: String,
    pub email: Email,
    pub hashed_password: String,
    pub admin_type: AdminType,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAdminParams {
    pub username: String,
    pub email: Email,
    pub hashed_password: String,
    pub admin_type: AdminType,
}

#[async_trait]
pub trait AdminStore: Send + Sync {
    /// New admins start active.
    async fn create_admin(&self, params: CreateAdminParams) -> StoreResult<Admin>;

    async fn get_admin(&self, id: AdminId) -> StoreResult<Admin>;

    async fn get_admin_by_username(&self, username: String) -> StoreResult<Admin>;
}
