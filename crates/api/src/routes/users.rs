//! User account route handlers.
//!
//! Sign-up and login are public. Reading, updating and deleting an account
//! require the owner's token; listing accounts requires a super admin.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::instrument;
use validator::Validate;

use bazaar_core::store::{ListUsersParams, UpdateUserParams, User};
use bazaar_core::{AdminId, Authorize, Email, ShoppingCartId, UserId, WishListId};

use crate::error::Result;
use crate::extract::{MAX_PAGE_SIZE, USERNAME_RE, ValidatedJson, ValidatedPath, ValidatedQuery};
use crate::middleware::{AuthAdmin, AuthUser};
use crate::routes::app_policy::AdminPath;
use crate::services::auth::{AuthService, IssuedToken, Registration, hash_password};
use crate::services::tasks::SendVerifyEmailPayload;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserPath {
    #[validate(range(min = 1))]
    pub user_id: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PageQuery {
    #[validate(range(min = 1))]
    pub page_id: i32,
    #[validate(range(min = 1, max = MAX_PAGE_SIZE))]
    pub page_size: i32,
}

impl PageQuery {
    fn params(&self) -> ListUsersParams {
        ListUsersParams {
            limit: i64::from(self.page_size),
            offset: i64::from(self.page_id - 1) * i64::from(self.page_size),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(regex(path = *USERNAME_RE))]
    pub username: String,
    pub email: Email,
    #[validate(length(min = 7, max = 20))]
    pub telephone: Option<String>,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginUserRequest {
    #[validate(regex(path = *USERNAME_RE))]
    pub username: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(regex(path = *USERNAME_RE))]
    pub username: Option<String>,
    pub email: Option<Email>,
    #[validate(length(min = 7, max = 20))]
    pub telephone: Option<String>,
    #[validate(length(min = 8, max = 128))]
    pub password: Option<String>,
}

/// A user account as shown to clients; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub email: Email,
    pub telephone: Option<String>,
    pub is_blocked: bool,
    pub is_email_verified: bool,
    pub shopping_cart_id: ShoppingCartId,
    pub wish_list_id: WishListId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            telephone: user.telephone,
            is_blocked: user.is_blocked,
            is_email_verified: user.is_email_verified,
            shopping_cart_id: user.shopping_cart_id,
            wish_list_id: user.wish_list_id,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginUserResponse {
    #[serde(flatten)]
    pub token: IssuedToken,
    pub user: UserResponse,
}

/// Sign up.
///
/// POST /api/v1/users
///
/// Queues the verification email once the account exists.
#[instrument(skip(state, body), fields(username = %body.username))]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateUserRequest>,
) -> Result<Json<UserResponse>> {
    let user = AuthService::new(&state)
        .register_user(Registration {
            username: body.username,
            email: body.email,
            telephone: body.telephone,
            password: body.password,
        })
        .await?;

    state
        .tasks()
        .distribute_send_verify_email(SendVerifyEmailPayload {
            user_id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        })
        .await?;

    tracing::info!(user_id = %user.id, "User registered");
    Ok(Json(user.into()))
}

/// POST /api/v1/users/login
#[instrument(skip(state, body), fields(username = %body.username))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<LoginUserRequest>,
) -> Result<Json<LoginUserResponse>> {
    let (user, token) = AuthService::new(&state)
        .login_user(&body.username, &body.password)
        .await?;

    Ok(Json(LoginUserResponse {
        token,
        user: user.into(),
    }))
}

/// GET /api/v1/users/{userId}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidatedPath(path): ValidatedPath<UserPath>,
) -> Result<Json<UserResponse>> {
    let user_id = UserId::new(path.user_id);
    caller.authorize(user_id)?;

    let user = state.stores().users.get_user(user_id).await?;
    Ok(Json(user.into()))
}

/// PUT /api/v1/users/{userId}
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidatedPath(path): ValidatedPath<UserPath>,
    ValidatedJson(body): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>> {
    let user_id = UserId::new(path.user_id);
    caller.authorize(user_id)?;

    let hashed_password = body.password.as_deref().map(hash_password).transpose()?;

    let user = state
        .stores()
        .users
        .update_user(UpdateUserParams {
            id: user_id,
            username: body.username,
            email: body.email,
            telephone: body.telephone,
            hashed_password,
        })
        .await?;

    Ok(Json(user.into()))
}

/// DELETE /api/v1/users/{userId}
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    ValidatedPath(path): ValidatedPath<UserPath>,
) -> Result<Json<Value>> {
    let user_id = UserId::new(path.user_id);
    caller.authorize(user_id)?;

    state.stores().users.delete_user(user_id).await?;

    tracing::info!(%user_id, "User deleted");
    Ok(Json(json!({})))
}

/// Page through all accounts.
///
/// GET /api/admin/{adminId}/v1/users?page_id=&page_size=
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    AuthAdmin(caller): AuthAdmin,
    ValidatedPath(path): ValidatedPath<AdminPath>,
    ValidatedQuery(query): ValidatedQuery<PageQuery>,
) -> Result<Json<Vec<UserResponse>>> {
    caller.authorize(AdminId::new(path.admin_id))?;

    let users = state.stores().users.list_users(query.params()).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
