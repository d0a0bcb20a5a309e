//! Per-device notification preferences.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::StoreResult;
use crate::types::UserId;

/// Notification settings for one of a user's devices.
///
/// Keyed by `(user_id, device_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub user_id: UserId,
    pub device_id: String,
    pub enabled: bool,
    pub order_updates: bool,
    pub promotions: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNotificationParams {
    pub user_id: UserId,
    pub device_id: String,
    pub enabled: bool,
    pub order_updates: bool,
    pub promotions: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationKey {
    pub user_id: UserId,
    pub device_id: String,
}

/// Partial update; `None` leaves the flag untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateNotificationParams {
    pub user_id: UserId,
    pub device_id: String,
    pub enabled: Option<bool>,
    pub order_updates: Option<bool>,
    pub promotions: Option<bool>,
}

#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Fails with a unique-constraint error if the device is already registered.
    async fn create_notification(
        &self,
        params: CreateNotificationParams,
    ) -> StoreResult<Notification>;

    async fn get_notification(&self, key: NotificationKey) -> StoreResult<Notification>;

    async fn update_notification(
        &self,
        params: UpdateNotificationParams,
    ) -> StoreResult<Notification>;

    async fn delete_notification(&self, key: NotificationKey) -> StoreResult<()>;
}
