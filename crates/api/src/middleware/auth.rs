//! Bearer token extractors.
//!
//! Each extractor verifies the `Authorization: Bearer <token>` header through
//! the application's [`TokenMaker`](crate::services::TokenMaker) and hands the
//! handler a typed identity. Any failure rejects the request with 401 before
//! the handler body runs.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use bazaar_core::{AdminIdentity, Identity, UserIdentity};

use crate::error::{AppError, set_sentry_user};
use crate::state::AppState;

const BEARER_PREFIX: &str = "bearer ";

/// Extractor that requires an end-user token.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(AuthUser(caller): AuthUser) -> impl IntoResponse {
///     format!("Hello, user {}!", caller.user_id)
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub UserIdentity);

/// Extractor that requires an admin token.
#[derive(Debug, Clone, Copy)]
pub struct AuthAdmin(pub AdminIdentity);

/// Read and verify the bearer token on a request.
fn identify(parts: &Parts, state: &AppState) -> Result<Identity, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("authorization header is not provided".into()))?
        .to_str()
        .map_err(|_| AppError::Unauthorized("invalid authorization header format".into()))?;

    let token = split_bearer(header)
        .ok_or_else(|| AppError::Unauthorized("invalid authorization header format".into()))?;

    let claims = state.token_maker().verify_token(token).map_err(|err| {
        tracing::debug!(error = %err, "Rejected bearer token");
        AppError::Unauthorized(err.to_string())
    })?;

    Ok(claims.identity)
}

/// Split `Bearer <token>`, accepting any casing of the scheme.
fn split_bearer(header: &str) -> Option<&str> {
    let scheme = header.get(..BEARER_PREFIX.len())?;
    if !scheme.eq_ignore_ascii_case(BEARER_PREFIX) {
        return None;
    }
    let token = header.get(BEARER_PREFIX.len()..)?.trim();
    (!token.is_empty()).then_some(token)
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let user = identify(parts, &state)?
            .as_user()
            .ok_or_else(|| AppError::Unauthorized("token does not belong to a user".into()))?;

        set_sentry_user(&user.user_id, None);
        Ok(Self(user))
    }
}

impl<S> FromRequestParts<S> for AuthAdmin
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let admin = identify(parts, &state)?
            .as_admin()
            .ok_or_else(|| AppError::Unauthorized("token does not belong to an admin".into()))?;

        set_sentry_user(&format!("admin:{}", admin.admin_id), None);
        Ok(Self(admin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_bearer() {
        assert_eq!(split_bearer("Bearer abc.def"), Some("abc.def"));
        assert_eq!(split_bearer("bearer abc.def"), Some("abc.def"));
        assert_eq!(split_bearer("BEARER  abc.def "), Some("abc.def"));
        assert_eq!(split_bearer("Bearer "), None);
        assert_eq!(split_bearer("Basic dXNlcjpwYXNz"), None);
        assert_eq!(split_bearer("abc"), None);
    }
}
