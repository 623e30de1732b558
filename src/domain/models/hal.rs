//! HAL representation types: named links and resource wrappers.

use serde::ser::{Serialize, SerializeMap, Serializer};
use super::{event::Event, page::PageMetadata, validation::ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Link {
    pub href: String,
}

/// Named links in the order they were added. A relation appears at most once;
/// adding it again replaces the earlier href in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Links(Vec<(&'static str, Link)>);

impl Links {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rel: &'static str, href: impl Into<String>) {
        let link = Link { href: href.into() };
        match self.0.iter_mut().find(|(r, _)| *r == rel) {
            Some(slot) => slot.1 = link,
            None => self.0.push((rel, link)),
        }
    }

    pub fn with(mut self, rel: &'static str, href: impl Into<String>) -> Self {
        self.push(rel, href);
        self
    }

    pub fn get(&self, rel: &str) -> Option<&Link> {
        self.0.iter().find(|(r, _)| *r == rel).map(|(_, l)| l)
    }

    pub fn rels(&self) -> Vec<&'static str> {
        self.0.iter().map(|(r, _)| *r).collect()
    }
}

impl Serialize for Links {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (rel, link) in &self.0 {
            map.serialize_entry(rel, link)?;
        }
        map.end()
    }
}

/// A single resource with its `_links`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Resource<T> {
    #[serde(flatten)]
    pub content: T,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl<T> Resource<T> {
    pub fn new(content: T, links: Links) -> Self {
        Self { content, links }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct EmbeddedEvents {
    #[serde(rename = "eventList")]
    pub event_list: Vec<Resource<Event>>,
}

/// A page of events. `_embedded` is left out entirely for an empty page.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PagedEvents {
    #[serde(rename = "_embedded", skip_serializing_if = "Option::is_none")]
    pub embedded: Option<EmbeddedEvents>,
    #[serde(rename = "_links")]
    pub links: Links,
    pub page: PageMetadata,
}

/// Body of a 400 response: field attributed errors plus navigation back to
/// the API root.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ErrorsModel {
    pub errors: Vec<ValidationError>,
    #[serde(rename = "_links")]
    pub links: Links,
}
