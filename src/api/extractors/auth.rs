use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, StatusCode},
};
use crate::state::AppState;
use crate::domain::models::account::CallerIdentity;
use std::sync::Arc;
use tracing::Span;

/// A request that must carry a valid bearer token.
pub struct AuthUser(pub CallerIdentity);

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(StatusCode::UNAUTHORIZED)?;

        let caller = state.auth_service.authenticate(token)
            .map_err(|_| StatusCode::UNAUTHORIZED)?;

        Span::current().record("account_id", caller.account_id.as_str());

        Ok(AuthUser(caller))
    }
}

/// The token part of an `Authorization: Bearer <token>` header, if present.
pub fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
