use std::sync::Arc;
use crate::domain::ports::{AccountRepository, EventRepository};
use crate::domain::services::{
    auth_service::AuthService,
    event_service::EventService,
    links::ApiPaths,
};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub event_repo: Arc<dyn EventRepository>,
    pub account_repo: Arc<dyn AccountRepository>,
    pub auth_service: Arc<AuthService>,
    pub event_service: Arc<EventService>,
}

impl AppState {
    pub fn new(
        config: Config,
        event_repo: Arc<dyn EventRepository>,
        account_repo: Arc<dyn AccountRepository>,
    ) -> Self {
        let auth_service = Arc::new(AuthService::new(account_repo.clone(), config.clone()));
        let event_service = Arc::new(EventService::new(
            event_repo.clone(),
            ApiPaths::new(config.public_base_url.clone()),
            config.ownership_policy,
        ));

        Self {
            config,
            event_repo,
            account_repo,
            auth_service,
            event_service,
        }
    }

    pub fn paths(&self) -> &ApiPaths {
        self.event_service.paths()
    }
}
