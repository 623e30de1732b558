use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::models::{
    account::CallerIdentity,
    event::{Event, EventSubmission, NewEvent},
    hal::{EmbeddedEvents, ErrorsModel, PagedEvents, Resource},
    page::PageRequest,
    validation::ValidationError,
};
use crate::domain::ports::EventRepository;
use crate::domain::services::links::{self, ApiPaths, LinkContext};
use crate::domain::services::validation::validate;
use crate::error::AppError;

/// Who may update an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OwnershipPolicy {
    /// Only the event's manager may update it.
    #[default]
    ManagerOnly,
    /// Legacy behaviour: the manager is refused and everyone else is let
    /// through. Kept selectable for deployments that depend on it.
    RejectManager,
}

impl OwnershipPolicy {
    pub fn permits(&self, caller: &CallerIdentity, event: &Event) -> bool {
        let is_manager = event.is_managed_by(&caller.account_id);
        match self {
            OwnershipPolicy::ManagerOnly => is_manager,
            OwnershipPolicy::RejectManager => !is_manager,
        }
    }
}

impl FromStr for OwnershipPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manager-only" => Ok(OwnershipPolicy::ManagerOnly),
            "reject-manager" => Ok(OwnershipPolicy::RejectManager),
            other => Err(format!("unknown ownership policy '{}'", other)),
        }
    }
}

pub struct EventService {
    repo: Arc<dyn EventRepository>,
    paths: ApiPaths,
    ownership: OwnershipPolicy,
}

impl EventService {
    pub fn new(repo: Arc<dyn EventRepository>, paths: ApiPaths, ownership: OwnershipPolicy) -> Self {
        Self { repo, paths, ownership }
    }

    pub fn paths(&self) -> &ApiPaths {
        &self.paths
    }

    pub async fn create(
        &self,
        submission: &EventSubmission,
        caller: &CallerIdentity,
    ) -> Result<Resource<Event>, AppError> {
        self.check(submission)?;

        let schedule = submission.schedule().ok_or_else(|| {
            AppError::InternalWithMsg("validated submission is missing a date-time".into())
        })?;
        let draft = NewEvent::new(submission, schedule, caller.account_id.clone());

        let created = self.repo.create(&draft).await?;
        info!(event_id = created.id, manager = %caller.account_id, "Event created");

        let links = links::build_links(&self.paths, &created, Some(caller), LinkContext::JustCreated);
        Ok(Resource::new(created, links))
    }

    pub async fn list(
        &self,
        request: &PageRequest,
        caller: Option<&CallerIdentity>,
    ) -> Result<PagedEvents, AppError> {
        let page = self.repo.find_page(request).await?;
        debug!(page = page.number, size = page.size, total = page.total_elements, "Listing events");

        let collection = links::collection_links(&self.paths, &page, request, caller);
        let metadata = page.metadata();
        let items: Vec<_> = page
            .content
            .into_iter()
            .map(|event| {
                let links = links::build_links(&self.paths, &event, caller, LinkContext::ListItem);
                Resource::new(event, links)
            })
            .collect();

        Ok(PagedEvents {
            embedded: (!items.is_empty()).then_some(EmbeddedEvents { event_list: items }),
            links: collection,
            page: metadata,
        })
    }

    pub async fn get(&self, id: i64, caller: Option<&CallerIdentity>) -> Result<Resource<Event>, AppError> {
        let event = self.repo.find_by_id(id).await?.ok_or(AppError::NotFound)?;
        let links = links::build_links(&self.paths, &event, caller, LinkContext::SingleFetch);
        Ok(Resource::new(event, links))
    }

    pub async fn update(
        &self,
        id: i64,
        submission: &EventSubmission,
        caller: &CallerIdentity,
    ) -> Result<Resource<Event>, AppError> {
        let mut event = self.repo.find_by_id(id).await?.ok_or(AppError::NotFound)?;

        self.check(submission)?;

        if !self.ownership.permits(caller, &event) {
            info!(event_id = id, caller = %caller.account_id, policy = ?self.ownership, "Update refused");
            return Err(AppError::Unauthorized);
        }

        event.apply(submission);
        // Absent fields fall back to stored values, so the merged record can
        // break a cross-field rule the submission alone passed.
        self.check(&EventSubmission::from(&event))?;

        let saved = self.repo.update(&event).await?;
        info!(event_id = saved.id, "Event updated");

        let links = links::build_links(&self.paths, &saved, Some(caller), LinkContext::Updated);
        Ok(Resource::new(saved, links))
    }

    fn check(&self, submission: &EventSubmission) -> Result<(), AppError> {
        let errors = validate(submission);
        if errors.is_empty() {
            return Ok(());
        }
        debug!(count = errors.len(), "Submission rejected");
        Err(self.rejection(errors))
    }

    /// A 400 carrying the given errors and a link back to the API root.
    pub fn rejection(&self, errors: Vec<ValidationError>) -> AppError {
        AppError::InvalidSubmission(ErrorsModel {
            errors,
            links: links::failure_links(&self.paths),
        })
    }
}
