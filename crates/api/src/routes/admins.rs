//! Admin account route handlers.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use bazaar_core::store::Admin;
use bazaar_core::{AdminId, AdminType, Authorize, Email};

use crate::error::Result;
use crate::extract::{USERNAME_RE, ValidatedJson, ValidatedPath};
use crate::middleware::AuthAdmin;
use crate::routes::app_policy::AdminPath;
use crate::services::auth::{AuthService, IssuedToken, Registration};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginAdminRequest {
    #[validate(regex(path = *USERNAME_RE))]
    pub username: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAdminRequest {
    #[validate(regex(path = *USERNAME_RE))]
    pub username: String,
    pub email: Email,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    pub admin_type: AdminType,
}

/// An admin account as shown to clients; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminResponse {
    pub id: AdminId,
    pub username: String,
    pub email: Email,
    pub admin_type: AdminType,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Admin> for AdminResponse {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id,
            username: admin.username,
            email: admin.email,
            admin_type: admin.admin_type,
            active: admin.active,
            created_at: admin.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginAdminResponse {
    #[serde(flatten)]
    pub token: IssuedToken,
    pub admin: AdminResponse,
}

/// POST /admin/v1/admins/login
#[instrument(skip(state, body), fields(username = %body.username))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<LoginAdminRequest>,
) -> Result<Json<LoginAdminResponse>> {
    let (admin, token) = AuthService::new(&state)
        .login_admin(&body.username, &body.password)
        .await?;

    Ok(Json(LoginAdminResponse {
        token,
        admin: admin.into(),
    }))
}

/// The calling super admin's own account.
///
/// GET /admin/v1/admins/{adminId}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    AuthAdmin(caller): AuthAdmin,
    ValidatedPath(path): ValidatedPath<AdminPath>,
) -> Result<Json<AdminResponse>> {
    let admin_id = AdminId::new(path.admin_id);
    caller.authorize(admin_id)?;

    let admin = state.stores().admins.get_admin(admin_id).await?;
    Ok(Json(admin.into()))
}

/// A super admin adds another admin.
///
/// POST /admin/v1/admins/{adminId}/admins
#[instrument(skip(state, body), fields(username = %body.username))]
pub async fn create(
    State(state): State<AppState>,
    AuthAdmin(caller): AuthAdmin,
    ValidatedPath(path): ValidatedPath<AdminPath>,
    ValidatedJson(body): ValidatedJson<CreateAdminRequest>,
) -> Result<Json<AdminResponse>> {
    caller.authorize(AdminId::new(path.admin_id))?;

    let admin = AuthService::new(&state)
        .register_admin(
            Registration {
                username: body.username,
                email: body.email,
                telephone: None,
                password: body.password,
            },
            body.admin_type,
        )
        .await?;

    tracing::info!(new_admin_id = %admin.id, admin_type = %admin.admin_type, "Admin created");
    Ok(Json(admin.into()))
}
