use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use crate::state::AppState;
use crate::domain::models::validation::ValidationError;
use crate::error::AppError;
use std::sync::Arc;

/// A JSON request body. Anything that fails to deserialize (bad syntax,
/// wrong types, unknown fields) is reported the same way as a failed
/// validation: a 400 with field attributed errors.
pub struct Submission<T>(pub T);

impl<T> FromRequest<Arc<AppState>> for Submission<T>
where
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let reject = |error: ValidationError| state.event_service.rejection(vec![error]);

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| reject(ValidationError::deserialization("body", "unreadable", e.body_text())))?;

        serde_json::from_slice::<T>(&bytes)
            .map(Submission)
            .map_err(|e| reject(describe(&e)))
    }
}

fn describe(error: &serde_json::Error) -> ValidationError {
    let message = error.to_string();

    if let Some(field) = unknown_field(&message) {
        return ValidationError::deserialization(field, "unknownField", message.clone());
    }

    let code = match error.classify() {
        Category::Data => "typeMismatch",
        Category::Syntax | Category::Eof | Category::Io => "malformed",
    };
    ValidationError::deserialization("body", code, message)
}

/// serde reports unknown fields as "unknown field `name`, expected ...".
fn unknown_field(message: &str) -> Option<&str> {
    let rest = message.strip_prefix("unknown field `")?;
    let end = rest.find('`')?;
    Some(&rest[..end])
}
