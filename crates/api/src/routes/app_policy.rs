//! App policy route handlers.
//!
//! Super admins write the policy text; anyone can read the latest version.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;
use validator::Validate;

use bazaar_core::store::{AppPolicy, CreateAppPolicyParams, UpdateAppPolicyParams};
use bazaar_core::{AdminId, AppPolicyId, Authorize};

use crate::error::Result;
use crate::extract::{ValidatedJson, ValidatedPath};
use crate::middleware::AuthAdmin;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdminPath {
    #[validate(range(min = 1))]
    pub admin_id: i64,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AppPolicyPath {
    #[validate(range(min = 1))]
    pub admin_id: i64,
    #[validate(range(min = 1))]
    pub id: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAppPolicyRequest {
    #[validate(length(min = 1))]
    pub policy: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAppPolicyRequest {
    #[validate(length(min = 1))]
    pub policy: Option<String>,
}

/// Publish a new policy text.
///
/// POST /admin/v1/admins/{adminId}/app-policy
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    AuthAdmin(caller): AuthAdmin,
    ValidatedPath(path): ValidatedPath<AdminPath>,
    ValidatedJson(body): ValidatedJson<CreateAppPolicyRequest>,
) -> Result<Json<AppPolicy>> {
    let admin_id = AdminId::new(path.admin_id);
    caller.authorize(admin_id)?;

    let policy = state
        .stores()
        .app_policies
        .create_app_policy(CreateAppPolicyParams {
            policy: body.policy,
            admin_id,
        })
        .await?;

    tracing::info!(policy_id = %policy.id, "App policy created");
    Ok(Json(policy))
}

/// Latest published policy.
///
/// GET /api/v1/app-policy
#[instrument(skip(state))]
pub async fn show_latest(State(state): State<AppState>) -> Result<Json<AppPolicy>> {
    let policy = state.stores().app_policies.get_latest_app_policy().await?;
    Ok(Json(policy))
}

/// GET /admin/v1/admins/{adminId}/app-policy/{id}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    AuthAdmin(caller): AuthAdmin,
    ValidatedPath(path): ValidatedPath<AppPolicyPath>,
) -> Result<Json<AppPolicy>> {
    caller.authorize(AdminId::new(path.admin_id))?;

    let policy = state
        .stores()
        .app_policies
        .get_app_policy(AppPolicyId::new(path.id))
        .await?;

    Ok(Json(policy))
}

/// PUT /admin/v1/admins/{adminId}/app-policy/{id}
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    AuthAdmin(caller): AuthAdmin,
    ValidatedPath(path): ValidatedPath<AppPolicyPath>,
    ValidatedJson(body): ValidatedJson<UpdateAppPolicyRequest>,
) -> Result<Json<AppPolicy>> {
    let admin_id = AdminId::new(path.admin_id);
    caller.authorize(admin_id)?;

    let policy = state
        .stores()
        .app_policies
        .update_app_policy(UpdateAppPolicyParams {
            id: AppPolicyId::new(path.id),
            policy: body.policy,
            admin_id,
        })
        .await?;

    Ok(Json(policy))
}

/// DELETE /admin/v1/admins/{adminId}/app-policy/{id}
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    AuthAdmin(caller): AuthAdmin,
    ValidatedPath(path): ValidatedPath<AppPolicyPath>,
) -> Result<Json<Value>> {
    caller.authorize(AdminId::new(path.admin_id))?;

    state
        .stores()
        .app_policies
        .delete_app_policy(AppPolicyId::new(path.id))
        .await?;

    Ok(Json(json!({})))
}
