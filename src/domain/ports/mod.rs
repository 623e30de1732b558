use crate::domain::models::{
    account::Account,
    event::{Event, NewEvent},
    page::{Page, PageRequest},
};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Persists a new event and returns it with its store assigned id.
    async fn create(&self, event: &NewEvent) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Event>, AppError>;
    async fn find_page(&self, request: &PageRequest) -> Result<Page<Event>, AppError>;
    /// Last write wins; no version check is performed.
    async fn update(&self, event: &Event) -> Result<Event, AppError>;
}

#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn create(&self, account: &Account) -> Result<Account, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError>;
}
