use std::env;
use crate::domain::services::event_service::OwnershipPolicy;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Scheme and authority prefixed to every link the API emits.
    pub public_base_url: String,
    pub jwt_secret_key: String, // Private key (PEM)
    pub jwt_public_key: String, // Public key (PEM)
    pub auth_issuer: String,
    pub access_token_ttl_secs: i64,
    pub oauth_client_id: String,
    pub oauth_client_secret: String,
    pub admin_username: String,
    pub admin_password: String,
    pub user_username: String,
    pub user_password: String,
    pub ownership_policy: OwnershipPolicy,
}

impl Config {
    pub fn from_env() -> Self {
        let port: u16 = env::var("PORT").unwrap_or_else(|_| "8080".to_string()).parse().expect("PORT must be a number");

        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port,
            public_base_url: env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| format!("http://localhost:{}", port)),
            jwt_secret_key: env::var("JWT_SECRET_KEY").expect("JWT_SECRET_KEY must be set (Ed25519 Private Key)"),
            jwt_public_key: env::var("JWT_PUBLIC_KEY").expect("JWT_PUBLIC_KEY must be set (Ed25519 Public Key)"),
            auth_issuer: env::var("AUTH_ISSUER").unwrap_or_else(|_| "https://api.events.local".to_string()),
            access_token_ttl_secs: env::var("ACCESS_TOKEN_TTL_SECS").unwrap_or_else(|_| "600".to_string()).parse().expect("ACCESS_TOKEN_TTL_SECS must be a number"),
            oauth_client_id: env::var("OAUTH_CLIENT_ID").unwrap_or_else(|_| "myApp".to_string()),
            oauth_client_secret: env::var("OAUTH_CLIENT_SECRET").unwrap_or_else(|_| "pass".to_string()),
            admin_username: env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin@events.local".to_string()),
            admin_password: env::var("ADMIN_PASSWORD").expect("ADMIN_PASSWORD must be set"),
            user_username: env::var("USER_USERNAME").unwrap_or_else(|_| "user@events.local".to_string()),
            user_password: env::var("USER_PASSWORD").expect("USER_PASSWORD must be set"),
            ownership_policy: env::var("EVENT_OWNERSHIP_POLICY")
                .map(|v| v.parse().expect("EVENT_OWNERSHIP_POLICY must be manager-only or reject-manager"))
                .unwrap_or_default(),
        }
    }
}
