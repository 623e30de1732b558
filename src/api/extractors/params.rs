use axum::extract::{FromRequestParts, Path, Query};
use axum::http::request::Parts;
use crate::state::AppState;
use crate::api::dtos::requests::PageParams;
use crate::domain::models::{page::PageRequest, validation::ValidationError};
use crate::error::AppError;
use std::sync::Arc;

/// `?page=&size=&sort=` parsed into a `PageRequest`. Bad values are reported
/// against the parameter that carried them.
pub struct PageQuery(pub PageRequest);

impl FromRequestParts<Arc<AppState>> for PageQuery {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let reject = |error: ValidationError| state.event_service.rejection(vec![error]);

        let Query(params) = Query::<PageParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| reject(ValidationError::deserialization("query", "malformed", e.body_text())))?;

        let page = whole_number("page", params.page.as_deref()).map_err(reject)?;
        let size = whole_number("size", params.size.as_deref()).map_err(reject)?;

        PageRequest::parse(page, size, params.sort.as_deref())
            .map(PageQuery)
            .map_err(reject)
    }
}

/// The `{id}` segment of an event URI.
pub struct EventId(pub i64);

impl FromRequestParts<Arc<AppState>> for EventId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        Path::<i64>::from_request_parts(parts, state)
            .await
            .map(|Path(id)| EventId(id))
            .map_err(|e| {
                state.event_service.rejection(vec![ValidationError::deserialization(
                    "id",
                    "typeMismatch",
                    e.body_text(),
                )])
            })
    }
}

fn whole_number(field: &str, raw: Option<&str>) -> Result<Option<u32>, ValidationError> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(None);
    };

    raw.parse::<u32>().map(Some).map_err(|_| match raw.parse::<i64>() {
        Ok(n) if n < 0 => ValidationError::field(
            field,
            "Min",
            format!("{} must be greater than or equal to 0", field),
        ),
        _ => ValidationError::deserialization(
            field,
            "typeMismatch",
            format!("{} must be a whole number, got '{}'", field, raw),
        ),
    })
}
