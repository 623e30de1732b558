use axum::{extract::State, response::IntoResponse, Form, Json};
use crate::state::AppState;
use crate::error::{AppError, OAuthError};
use crate::api::extractors::client_auth::OAuthClient;
use crate::api::dtos::requests::TokenRequest;
use std::sync::Arc;
use tracing::info;

/// OAuth2 token endpoint. Only the resource owner password grant is offered.
pub async fn issue_token(
    State(state): State<Arc<AppState>>,
    OAuthClient(client_id): OAuthClient,
    Form(payload): Form<TokenRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.grant_type != "password" {
        return Err(AppError::OAuth(OAuthError::UnsupportedGrantType));
    }

    let (Some(username), Some(password)) = (payload.username, payload.password) else {
        return Err(AppError::OAuth(OAuthError::InvalidRequest));
    };

    info!("Password grant requested by client {} for {}", client_id, username);

    let token = state.auth_service.password_grant(&username, &password).await?;
    Ok(Json(token))
}
