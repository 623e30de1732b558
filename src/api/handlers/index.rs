use axum::{extract::State, response::IntoResponse};
use crate::state::AppState;
use crate::api::dtos::responses::Hal;
use crate::domain::models::hal::Resource;
use crate::domain::services::links::index_links;
use serde_json::json;
use std::sync::Arc;

/// API root: a link-only resource pointing at the collections.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Hal(Resource::new(json!({}), index_links(state.paths())))
}
