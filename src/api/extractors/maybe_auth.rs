use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use crate::state::AppState;
use crate::domain::models::account::CallerIdentity;
use super::auth::bearer_token;
use std::sync::Arc;
use tracing::{debug, Span};

/// The caller if the request carries a valid bearer token, otherwise a guest.
pub struct MaybeAuthUser(pub Option<CallerIdentity>);

impl FromRequestParts<Arc<AppState>> for MaybeAuthUser {
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let token = match bearer_token(parts) {
            Some(token) => token,
            None => return Ok(MaybeAuthUser(None)),
        };

        match state.auth_service.authenticate(token) {
            Ok(caller) => {
                Span::current().record("account_id", caller.account_id.as_str());
                Ok(MaybeAuthUser(Some(caller)))
            }
            Err(_) => {
                // Invalid token (expired, bad signature) -> Treat as guest
                debug!("MaybeAuth: rejected bearer token, continuing as guest");
                Ok(MaybeAuthUser(None))
            }
        }
    }
}
