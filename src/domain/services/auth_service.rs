use std::sync::Arc;
use crate::domain::{
    models::{
        account::{AccountRole, CallerIdentity},
        auth::{Claims, TokenResponse},
    },
    ports::AccountRepository,
};
use crate::error::{AppError, OAuthError};
use crate::config::Config;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use uuid::Uuid;
use chrono::{Utc, Duration};
use tracing::{error, info};

pub const TOKEN_AUDIENCE: &str = "events-api";
pub const TOKEN_SCOPE: &str = "read write";

/// Issues and verifies bearer tokens for the OAuth2 password grant.
pub struct AuthService {
    accounts: Arc<dyn AccountRepository>,
    config: Config,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthService {
    pub fn new(accounts: Arc<dyn AccountRepository>, config: Config) -> Self {
        let encoding_key = EncodingKey::from_ed_pem(config.jwt_secret_key.as_bytes())
            .expect("Invalid JWT Private Key PEM");
        let decoding_key = DecodingKey::from_ed_pem(config.jwt_public_key.as_bytes())
            .expect("Invalid JWT Public Key PEM");

        Self { accounts, config, encoding_key, decoding_key }
    }

    pub fn verify_client(&self, client_id: &str, client_secret: &str) -> bool {
        client_id == self.config.oauth_client_id && client_secret == self.config.oauth_client_secret
    }

    /// Resource owner password credentials grant.
    pub async fn password_grant(&self, username: &str, password: &str) -> Result<TokenResponse, AppError> {
        let account = self.accounts.find_by_email(username).await?
            .ok_or(AppError::OAuth(OAuthError::InvalidGrant))?;

        let parsed_hash = PasswordHash::new(&account.password_hash)
            .map_err(|_| AppError::Internal)?;

        Argon2::default().verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| AppError::OAuth(OAuthError::InvalidGrant))?;

        let response = self.issue_token(&account.identity())?;
        info!("Token issued for account: {}", account.id);
        Ok(response)
    }

    pub fn issue_token(&self, identity: &CallerIdentity) -> Result<TokenResponse, AppError> {
        let now = Utc::now();
        let ttl = self.config.access_token_ttl_secs;

        let claims = Claims {
            iss: self.config.auth_issuer.clone(),
            sub: identity.account_id.clone(),
            aud: TOKEN_AUDIENCE.to_string(),
            exp: (now + Duration::seconds(ttl)).timestamp() as usize,
            iat: now.timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
            scope: TOKEN_SCOPE.to_string(),
            email: identity.email.clone(),
            roles: identity.roles.iter().map(|r| r.as_str().to_string()).collect(),
        };

        let access_token = encode(&Header::new(Algorithm::EdDSA), &claims, &self.encoding_key)
            .map_err(|e| {
                error!("JWT encoding failed: {}", e);
                AppError::Internal
            })?;

        Ok(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
            expires_in: ttl,
            scope: TOKEN_SCOPE.to_string(),
        })
    }

    /// Resolves a bearer token to the caller it was issued for.
    pub fn authenticate(&self, token: &str) -> Result<CallerIdentity, AppError> {
        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.set_audience(&[TOKEN_AUDIENCE]);
        validation.set_issuer(&[self.config.auth_issuer.as_str()]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| AppError::Unauthorized)?;

        let claims = token_data.claims;
        Ok(CallerIdentity {
            account_id: claims.sub,
            email: claims.email,
            roles: claims.roles.iter().filter_map(|r| AccountRole::parse(r)).collect(),
        })
    }
}
