use crate::domain::{
    models::account::{Account, AccountRole},
    ports::AccountRepository,
};
use crate::error::AppError;
use argon2::{password_hash::SaltString, Argon2, PasswordHasher};
use tracing::info;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AppError::Internal)?
        .to_string();
    Ok(hash)
}

/// Returns the account registered under `email`, creating it first if needed.
/// An existing account keeps its password and roles.
pub async fn ensure_account(
    repo: &dyn AccountRepository,
    email: &str,
    password: &str,
    roles: &[AccountRole],
) -> Result<Account, AppError> {
    if let Some(existing) = repo.find_by_email(email).await? {
        return Ok(existing);
    }

    let account = Account::new(email.to_string(), hash_password(password)?, roles);
    let created = repo.create(&account).await?;
    info!("Account created: {} ({})", created.email, created.roles);
    Ok(created)
}
