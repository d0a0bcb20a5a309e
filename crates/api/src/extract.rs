//! Validating request extractors.
//!
//! Each wrapper runs the matching axum extractor, then `validator::Validate`.
//! Either failure becomes `AppError::BadRequest`, so a handler body only ever
//! sees well-formed input and no store call happens for rejected requests.

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Query, Request, rejection::JsonRejection},
    http::request::Parts,
};
use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError};

use bazaar_core::Money;

use crate::error::AppError;

/// Largest page a listing endpoint will return.
pub const MAX_PAGE_SIZE: i32 = 50;

/// Usernames: 3 to 30 ASCII letters, digits or underscores.
pub static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]{3,30}$").expect("Invalid regex"));

/// Largest order total accepted at checkout, in cents.
pub const MAX_ORDER_TOTAL_CENTS: i64 = 100_000_000;

/// Accept order totals from zero up to [`MAX_ORDER_TOTAL_CENTS`].
///
/// # Errors
///
/// Returns a `negative_amount` or `amount_too_large` validation error.
pub fn order_total_in_range(amount: &Money) -> Result<(), ValidationError> {
    if amount.is_negative() {
        return Err(ValidationError::new("negative_amount"));
    }
    if *amount > Money::from_cents(MAX_ORDER_TOTAL_CENTS) {
        return Err(ValidationError::new("amount_too_large"));
    }
    Ok(())
}

/// Path parameters that passed validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedPath<T>(pub T);

/// Query string that passed validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

/// JSON body that passed validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

fn check<T: Validate>(value: T) -> Result<T, AppError> {
    value
        .validate()
        .map_err(|errors| AppError::BadRequest(errors.to_string()))?;
    Ok(value)
}

impl<S, T> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(Self(check(value)?))
    }
}

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(Self(check(value)?))
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(Self(check(value)?))
    }
}
