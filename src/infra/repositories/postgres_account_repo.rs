use crate::domain::{models::account::Account, ports::AccountRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresAccountRepo {
    pool: PgPool,
}

impl PostgresAccountRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepo {
    async fn create(&self, account: &Account) -> Result<Account, AppError> {
        sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (id, email, password_hash, roles, created_at) VALUES ($1, $2, $3, $4, $5) RETURNING id, email, password_hash, roles, created_at",
        )
            .bind(&account.id)
            .bind(&account.email)
            .bind(&account.password_hash)
            .bind(&account.roles)
            .bind(account.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        sqlx::query_as::<_, Account>(
            "SELECT id, email, password_hash, roles, created_at FROM accounts WHERE email = $1",
        )
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
