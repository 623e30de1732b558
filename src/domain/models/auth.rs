use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub exp: usize,
    pub iat: usize,
    pub jti: String,
    pub scope: String,

    #[serde(rename = "https://events.api/claims/email")]
    pub email: String,

    #[serde(rename = "https://events.api/claims/roles")]
    pub roles: Vec<String>,
}

/// Body of a successful `/oauth/token` response.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub scope: String,
}
