//! Per-device notification preferences.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;
use validator::Validate;

use bazaar_core::store::{
    CreateNotificationParams, Notification, NotificationKey, UpdateNotificationParams,
};
use bazaar_core::{Authorize, UserId};

use crate::error::Result;
use crate::extract::{ValidatedJson, ValidatedPath};
use crate::middleware::AuthUser;
use crate::routes::users::UserPath;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DevicePath {
    #[validate(range(min = 1))]
    pub user_id: i64,
    #[validate(length(min = 1, max = 255))]
    pub device_id: String,
}

impl DevicePath {
    fn key(self) -> NotificationKey {
        NotificationKey {
            user_id: UserId::new(self.user_id),
            device_id: self.device_id,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateNotificationRequest {
    #[validate(length(min = 1, max = 255))]
    pub device_id: String,
    #[serde(default = "enabled_by_default")]
    pub notifications_enabled: bool,
    #[serde(default = "enabled_by_default")]
    pub order_updates: bool,
    #[serde(default)]
    pub promotions: bool,
}

const fn enabled_by_default() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateNotificationRequest {
    pub notifications_enabled: Option<bool>,
    pub order_updates: Option<bool>,
    pub promotions: Option<bool>,
}

/// Register a device for notifications.
///
/// POST /usr/v1/users/{userId}/notification
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidatedPath(path): ValidatedPath<UserPath>,
    ValidatedJson(body): ValidatedJson<CreateNotificationRequest>,
) -> Result<Json<Notification>> {
    let user_id = UserId::new(path.user_id);
    caller.authorize(user_id)?;

    let notification = state
        .stores()
        .notifications
        .create_notification(CreateNotificationParams {
            user_id,
            device_id: body.device_id,
            enabled: body.notifications_enabled,
            order_updates: body.order_updates,
            promotions: body.promotions,
        })
        .await?;

    Ok(Json(notification))
}

/// GET /usr/v1/users/{userId}/notification/{deviceId}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidatedPath(path): ValidatedPath<DevicePath>,
) -> Result<Json<Notification>> {
    caller.authorize(UserId::new(path.user_id))?;

    let notification = state
        .stores()
        .notifications
        .get_notification(path.key())
        .await?;

    Ok(Json(notification))
}

/// PUT /usr/v1/users/{userId}/notification/{deviceId}
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidatedPath(path): ValidatedPath<DevicePath>,
    ValidatedJson(body): ValidatedJson<UpdateNotificationRequest>,
) -> Result<Json<Notification>> {
    caller.authorize(UserId::new(path.user_id))?;

    let key = path.key();
    let notification = state
        .stores()
        .notifications
        .update_notification(UpdateNotificationParams {
            user_id: key.user_id,
            device_id: key.device_id,
            enabled: body.notifications_enabled,
            order_updates: body.order_updates,
            promotions: body.promotions,
        })
        .await?;

    Ok(Json(notification))
}

/// DELETE /usr/v1/users/{userId}/notification/{deviceId}
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidatedPath(path): ValidatedPath<DevicePath>,
) -> Result<Json<Value>> {
    caller.authorize(UserId::new(path.user_id))?;

    state
        .stores()
        .notifications
        .delete_notification(path.key())
        .await?;

    Ok(Json(json!({})))
}
