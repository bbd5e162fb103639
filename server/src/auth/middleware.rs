use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
};
use serde::{Deserialize, Serialize};

use crate::auth::jwt;

/// Claims carried by an access token.
///
/// Doubles as an axum extractor: any handler that takes a `Claims` argument
/// requires a valid `Authorization: Bearer` token and gets 401 otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id (UUIDv7)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

impl<S> FromRequestParts<S> for Claims
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(StatusCode::UNAUTHORIZED)?;

        // The signing key travels in request extensions, put there by the
        // inject_jwt_secret layer. Its absence is a wiring bug, not a bad
        // request.
        let JwtSecret(secret) = parts
            .extensions
            .get::<JwtSecret>()
            .ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;

        jwt::validate_access_token(secret, token).map_err(|_| StatusCode::UNAUTHORIZED)
    }
}

/// JWT signing key, injected into request extensions for the extractor.
#[derive(Clone)]
pub struct JwtSecret(pub Vec<u8>);
