use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;
use uuid::Uuid;

use super::{claims::Role, jwt::JwtKeys};
use crate::error::AppError;

/// Authenticated user (role `user`). Gate for reading food listings.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

/// Authenticated food partner (role `food_partner`). Gate for uploads.
#[derive(Debug, Clone, Copy)]
pub struct AuthFoodPartner(pub Uuid);

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let auth_header = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized("missing Authorization header"))?;

    auth_header
        .strip_prefix("Bearer ")
        .or_else(|| auth_header.strip_prefix("bearer "))
        .ok_or(AppError::Unauthorized("invalid auth scheme"))
}

fn authenticate(parts: &Parts, keys: &JwtKeys, required: Role) -> Result<Uuid, AppError> {
    let token = bearer_token(parts)?;

    let claims = keys.verify(token).map_err(|e| {
        warn!(error = %e, "invalid or expired token");
        AppError::Unauthorized("invalid or expired token")
    })?;

    if claims.role != required {
        warn!(subject = %claims.sub, role = ?claims.role, required = ?required, "role mismatch");
        return Err(AppError::Forbidden(required.required_message()));
    }

    Ok(claims.sub)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        authenticate(parts, &keys, Role::User).map(AuthUser)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthFoodPartner
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        authenticate(parts, &keys, Role::FoodPartner).map(AuthFoodPartner)
    }
}
