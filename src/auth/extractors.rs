use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use jsonwebtoken::errors::ErrorKind;
use tracing::warn;

use crate::{
    auth::jwt::{Claims, JwtKeys},
    employees::repo::Role,
    error::ApiError,
};

/// Authenticated guard: accepts any syntactically valid, signed, unexpired
/// token and hands the verified claims to the handler.
#[derive(Debug)]
pub struct AuthUser(pub Claims);

/// Admin guard: the authenticated guard plus `role == admin`.
#[derive(Debug)]
pub struct AdminUser(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);

        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthorized("Invalid Authorization header"))?;

        let claims = keys.verify(token).map_err(|e| {
            warn!(error = %e, "token rejected");
            match e.kind() {
                ErrorKind::ExpiredSignature => ApiError::Unauthorized("Token expired"),
                _ => ApiError::Unauthorized("Invalid token"),
            }
        })?;

        Ok(AuthUser(claims))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;

        if claims.role != Role::Admin {
            warn!(user_id = %claims.sub, "admin route rejected for employee");
            return Err(ApiError::Forbidden);
        }

        Ok(AdminUser(claims))
    }
}
