//! Link assembly for event resources.
//!
//! Which links a representation carries depends only on the event, the caller
//! (if any) and the operation that produced it.

use crate::domain::models::{
    account::CallerIdentity,
    event::Event,
    hal::Links,
    page::{Page, PageRequest},
};

pub const PROFILE_CREATE: &str = "/docs/index.html#resources-events-create";
pub const PROFILE_GET: &str = "/docs/index.html#resources-events-get";
pub const PROFILE_LIST: &str = "/docs/index.html#resources-events-list";
pub const PROFILE_UPDATE: &str = "/docs/index.html#resources-events-update";
pub const PROFILE_INDEX: &str = "/docs/index.html#overview";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkContext {
    JustCreated,
    SingleFetch,
    ListItem,
    Updated,
}

/// Absolute locations of the API's resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiPaths {
    base: String,
}

impl ApiPaths {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self { base: base.trim_end_matches('/').to_string() }
    }

    pub fn index(&self) -> String {
        format!("{}/api", self.base)
    }

    pub fn events(&self) -> String {
        format!("{}/api/events", self.base)
    }

    pub fn event(&self, id: i64) -> String {
        format!("{}/api/events/{}", self.base, id)
    }

    pub fn events_page(&self, request: &PageRequest) -> String {
        let mut href = format!("{}?page={}&size={}", self.events(), request.page, request.size);
        if let Some(sort) = &request.sort {
            href.push_str("&sort=");
            href.push_str(&sort.to_param());
        }
        href
    }
}

pub fn build_links(
    paths: &ApiPaths,
    event: &Event,
    caller: Option<&CallerIdentity>,
    context: LinkContext,
) -> Links {
    let own = paths.event(event.id);
    let mut links = Links::new().with("self", own.clone());

    match context {
        LinkContext::JustCreated => {
            links.push("query-events", paths.events());
            links.push("update-event", own);
            links.push("profile", PROFILE_CREATE);
        }
        LinkContext::SingleFetch => {
            if caller.is_some_and(|c| event.is_managed_by(&c.account_id)) {
                links.push("update-event", own);
            }
            links.push("profile", PROFILE_GET);
        }
        LinkContext::ListItem => {}
        LinkContext::Updated => {
            links.push("profile", PROFILE_UPDATE);
        }
    }

    links
}

/// Links on the collection itself, not on its items.
pub fn collection_links<T>(
    paths: &ApiPaths,
    page: &Page<T>,
    request: &PageRequest,
    caller: Option<&CallerIdentity>,
) -> Links {
    let mut links = Links::new();
    let last = page.total_pages().saturating_sub(1);

    if page.total_pages() > 1 {
        links.push("first", paths.events_page(&request.with_page(0)));
    }
    // A page past the end steps back to the last real page.
    if page.has_previous() {
        let prev = (page.number - 1).min(last);
        links.push("prev", paths.events_page(&request.with_page(prev)));
    }
    links.push("self", paths.events_page(request));
    if page.has_next() {
        links.push("next", paths.events_page(&request.with_page(page.number.saturating_add(1))));
    }
    if page.total_pages() > 1 {
        links.push("last", paths.events_page(&request.with_page(last)));
    }

    links.push("profile", PROFILE_LIST);
    if caller.is_some() {
        links.push("create-event", paths.events());
    }

    links
}

/// Links attached to a rejected submission.
pub fn failure_links(paths: &ApiPaths) -> Links {
    Links::new().with("index", paths.index())
}

pub fn index_links(paths: &ApiPaths) -> Links {
    Links::new()
        .with("self", paths.index())
        .with("events", paths.events())
        .with("profile", PROFILE_INDEX)
}
