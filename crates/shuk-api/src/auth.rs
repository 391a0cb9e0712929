use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;

use shuk_types::api::Claims;

use crate::error::ApiError;
use crate::state::AppState;

/// Identity resolved from the bearer token. Handlers take this instead of
/// reading any owner field from the request body.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn id(&self) -> &str {
        &self.0.sub
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(ApiError::MissingCredential)?;

        let token = auth_header
            .to_str()
            .ok()
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(ApiError::InvalidCredential)?;

        verify_token(&state.jwt_secret, token).map(AuthUser)
    }
}

pub fn verify_token(secret: &str, token: &str) -> Result<Claims, ApiError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        debug!("Rejected bearer token: {}", e);
        ApiError::InvalidCredential
    })?;

    if token_data.claims.sub.trim().is_empty() {
        return Err(ApiError::InvalidCredential);
    }
    Ok(token_data.claims)
}

/// Sign a token the way the identity provider does. Used by tests and
/// local tooling; production tokens come from the provider.
pub fn issue_token(secret: &str, subject: &str, ttl: chrono::Duration) -> anyhow::Result<String> {
    let claims = Claims {
        sub: subject.to_string(),
        exp: (chrono::Utc::now() + ttl).timestamp() as usize,
        email: None,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}
