use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::domain::models::account::AccountRole;
use crate::domain::ports::AccountRepository;
use crate::domain::services::account_service::ensure_account;
use crate::error::AppError;
use crate::infra::repositories::{
    postgres_account_repo::PostgresAccountRepo, postgres_event_repo::PostgresEventRepo,
    sqlite_account_repo::SqliteAccountRepo, sqlite_event_repo::SqliteEventRepo,
};

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    let state = if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        AppState::new(
            config.clone(),
            Arc::new(PostgresEventRepo::new(pool.clone())),
            Arc::new(PostgresAccountRepo::new(pool)),
        )
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        AppState::new(
            config.clone(),
            Arc::new(SqliteEventRepo::new(pool.clone())),
            Arc::new(SqliteAccountRepo::new(pool)),
        )
    };

    seed_accounts(state.account_repo.as_ref(), config)
        .await
        .expect("Failed to seed default accounts");

    state
}

/// Makes sure the configured admin and user accounts exist.
pub async fn seed_accounts(repo: &dyn AccountRepository, config: &Config) -> Result<(), AppError> {
    ensure_account(
        repo,
        &config.admin_username,
        &config.admin_password,
        &[AccountRole::Admin, AccountRole::User],
    ).await?;
    ensure_account(repo, &config.user_username, &config.user_password, &[AccountRole::User]).await?;
    Ok(())
}

pub async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

pub async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
