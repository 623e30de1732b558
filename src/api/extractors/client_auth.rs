use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use crate::state::AppState;
use crate::error::{AppError, OAuthError};
use std::sync::Arc;
use base64::{Engine as _, engine::general_purpose};

/// An OAuth2 client authenticated with HTTP Basic credentials.
pub struct OAuthClient(pub String);

impl FromRequestParts<Arc<AppState>> for OAuthClient {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let invalid = || AppError::OAuth(OAuthError::InvalidClient);

        let auth_header = parts.headers.get(header::AUTHORIZATION)
            .ok_or_else(invalid)?
            .to_str()
            .map_err(|_| invalid())?;

        let credentials = auth_header.strip_prefix("Basic ").ok_or_else(invalid)?;
        let decoded = general_purpose::STANDARD
            .decode(credentials.trim())
            .map_err(|_| invalid())?;

        let creds_str = String::from_utf8(decoded).map_err(|_| invalid())?;

        let (client_id, client_secret) = creds_str.split_once(':').ok_or_else(invalid)?;

        if state.auth_service.verify_client(client_id, client_secret) {
            Ok(OAuthClient(client_id.to_string()))
        } else {
            Err(invalid())
        }
    }
}
