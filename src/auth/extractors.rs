use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;
use uuid::Uuid;

use super::jwt::{JwtKeys, TokenError};
use crate::error::ApiError;

/// Authenticated caller, resolved from the bearer token. A handler taking
/// this parameter cannot run without a verified token.
#[derive(Debug)]
pub struct AuthUser(pub Uuid);

/// Accepts both `Bearer <token>` and a bare token as the header value.
fn extract_token(header: &str) -> Option<&str> {
    let mut parts = header.split_whitespace();
    let first = parts.next()?;
    Some(parts.next().unwrap_or(first))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let token = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(extract_token)
            .ok_or_else(|| ApiError::Unauthorized("No token provided".into()))?;

        let claims = keys.verify(token).map_err(|e| {
            match e {
                TokenError::Expired => warn!("expired token"),
                TokenError::Invalid => warn!("invalid token"),
            }
            ApiError::Unauthorized("Invalid token".into())
        })?;

        Ok(AuthUser(claims.sub))
    }
}
