use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::IntoResponse,
};
use crate::state::AppState;
use crate::api::extractors::{
    auth::AuthUser,
    maybe_auth::MaybeAuthUser,
    params::{EventId, PageQuery},
    submission::Submission,
};
use crate::api::dtos::responses::Hal;
use crate::domain::models::event::EventSubmission;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
    Submission(payload): Submission<EventSubmission>,
) -> Result<impl IntoResponse, AppError> {
    info!("Creating event {:?} for account: {}", payload.name, caller.account_id);

    let created = state.event_service.create(&payload, &caller).await?;

    let location = HeaderValue::from_str(&state.paths().event(created.content.id))
        .map_err(|e| AppError::InternalWithMsg(format!("invalid Location header: {}", e)))?;

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Hal(created)))
}

pub async fn list_events(
    State(state): State<Arc<AppState>>,
    MaybeAuthUser(caller): MaybeAuthUser,
    PageQuery(request): PageQuery,
) -> Result<impl IntoResponse, AppError> {
    let page = state.event_service.list(&request, caller.as_ref()).await?;
    Ok(Hal(page))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    MaybeAuthUser(caller): MaybeAuthUser,
    EventId(id): EventId,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_service.get(id, caller.as_ref()).await?;
    Ok(Hal(event))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
    EventId(id): EventId,
    Submission(payload): Submission<EventSubmission>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state.event_service.update(id, &payload, &caller).await?;
    info!("Event {} updated by account: {}", id, caller.account_id);
    Ok(Hal(updated))
}
