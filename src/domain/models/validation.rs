use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// A single field is missing or out of range.
    Field,
    /// A relation between two or more fields does not hold.
    CrossField,
    /// The payload could not be read into a submission at all.
    Deserialization,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub code: String,
    pub message: String,
    pub kind: ErrorKind,
}

impl ValidationError {
    pub fn field(field: &str, code: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Field, field, code, message)
    }

    pub fn cross_field(field: &str, code: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CrossField, field, code, message)
    }

    pub fn deserialization(field: &str, code: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Deserialization, field, code, message)
    }

    fn new(kind: ErrorKind, field: &str, code: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            code: code.to_string(),
            message: message.into(),
            kind,
        }
    }
}
