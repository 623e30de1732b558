use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    #[default]
    Draft,
    Published,
    BeganEnrollment,
    ClosedEnrollment,
    Started,
    Ended,
}

#[derive(Debug, Error)]
#[error("unknown event status: {0}")]
pub struct UnknownEventStatus(pub String);

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Draft => "DRAFT",
            EventStatus::Published => "PUBLISHED",
            EventStatus::BeganEnrollment => "BEGAN_ENROLLMENT",
            EventStatus::ClosedEnrollment => "CLOSED_ENROLLMENT",
            EventStatus::Started => "STARTED",
            EventStatus::Ended => "ENDED",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = UnknownEventStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(EventStatus::Draft),
            "PUBLISHED" => Ok(EventStatus::Published),
            "BEGAN_ENROLLMENT" => Ok(EventStatus::BeganEnrollment),
            "CLOSED_ENROLLMENT" => Ok(EventStatus::ClosedEnrollment),
            "STARTED" => Ok(EventStatus::Started),
            "ENDED" => Ok(EventStatus::Ended),
            other => Err(UnknownEventStatus(other.to_string())),
        }
    }
}

impl TryFrom<String> for EventStatus {
    type Error = UnknownEventStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Client payload for create and update. Every field is optional on the wire
/// so that missing values are reported as field errors by the validator.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EventSubmission {
    pub name: Option<String>,
    pub description: Option<String>,
    pub begin_enrollment_date_time: Option<NaiveDateTime>,
    pub close_enrollment_date_time: Option<NaiveDateTime>,
    pub begin_event_date_time: Option<NaiveDateTime>,
    pub end_event_date_time: Option<NaiveDateTime>,
    pub location: Option<String>,
    pub base_price: Option<i32>,
    pub max_price: Option<i32>,
    pub limit_of_enrollment: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub begin_enrollment: NaiveDateTime,
    pub close_enrollment: NaiveDateTime,
    pub begin_event: NaiveDateTime,
    pub end_event: NaiveDateTime,
}

impl Schedule {
    /// True when the event ends before any of the other three instants.
    pub fn ends_too_early(&self) -> bool {
        self.end_event < self.begin_event
            || self.end_event < self.close_enrollment
            || self.end_event < self.begin_enrollment
    }
}

impl EventSubmission {
    /// All four date-times, or `None` if any of them is missing.
    pub fn schedule(&self) -> Option<Schedule> {
        Some(Schedule {
            begin_enrollment: self.begin_enrollment_date_time?,
            close_enrollment: self.close_enrollment_date_time?,
            begin_event: self.begin_event_date_time?,
            end_event: self.end_event_date_time?,
        })
    }
}

/// An event that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub name: String,
    pub description: String,
    pub location: Option<String>,
    pub schedule: Schedule,
    pub base_price: i32,
    pub max_price: i32,
    pub limit_of_enrollment: i32,
    pub offline: bool,
    pub free: bool,
    pub event_status: EventStatus,
    pub manager_id: String,
}

impl NewEvent {
    pub fn new(
        submission: &EventSubmission,
        schedule: Schedule,
        manager_id: String,
    ) -> Self {
        let base_price = submission.base_price.unwrap_or(0);
        let max_price = submission.max_price.unwrap_or(0);
        let location = submission.location.clone();

        Self {
            name: submission.name.clone().unwrap_or_default(),
            description: submission.description.clone().unwrap_or_default(),
            offline: is_offline(location.as_deref()),
            free: is_free(base_price, max_price),
            location,
            schedule,
            base_price,
            max_price,
            limit_of_enrollment: submission.limit_of_enrollment.unwrap_or(0),
            event_status: EventStatus::Draft,
            manager_id,
        }
    }
}

#[derive(Debug, Serialize, FromRow, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub begin_enrollment_date_time: NaiveDateTime,
    pub close_enrollment_date_time: NaiveDateTime,
    pub begin_event_date_time: NaiveDateTime,
    pub end_event_date_time: NaiveDateTime,
    pub location: Option<String>,
    pub base_price: i32,
    pub max_price: i32,
    pub limit_of_enrollment: i32,
    pub offline: bool,
    pub free: bool,
    #[sqlx(try_from = "String")]
    pub event_status: EventStatus,
    pub manager_id: String,
}

impl Event {
    /// Overwrites every field the submission carries. Absent fields keep
    /// their stored value.
    pub fn apply(&mut self, submission: &EventSubmission) {
        if let Some(val) = &submission.name {
            self.name = val.clone();
        }
        if let Some(val) = &submission.description {
            self.description = val.clone();
        }
        if let Some(val) = submission.begin_enrollment_date_time {
            self.begin_enrollment_date_time = val;
        }
        if let Some(val) = submission.close_enrollment_date_time {
            self.close_enrollment_date_time = val;
        }
        if let Some(val) = submission.begin_event_date_time {
            self.begin_event_date_time = val;
        }
        if let Some(val) = submission.end_event_date_time {
            self.end_event_date_time = val;
        }
        if let Some(val) = &submission.location {
            self.location = Some(val.clone());
        }
        if let Some(val) = submission.base_price {
            self.base_price = val;
        }
        if let Some(val) = submission.max_price {
            self.max_price = val;
        }
        if let Some(val) = submission.limit_of_enrollment {
            self.limit_of_enrollment = val;
        }

        self.refresh_derived();
    }

    pub fn refresh_derived(&mut self) {
        self.free = is_free(self.base_price, self.max_price);
        self.offline = is_offline(self.location.as_deref());
    }

    pub fn is_managed_by(&self, account_id: &str) -> bool {
        self.manager_id == account_id
    }
}

impl From<&Event> for EventSubmission {
    fn from(event: &Event) -> Self {
        Self {
            name: Some(event.name.clone()),
            description: Some(event.description.clone()),
            begin_enrollment_date_time: Some(event.begin_enrollment_date_time),
            close_enrollment_date_time: Some(event.close_enrollment_date_time),
            begin_event_date_time: Some(event.begin_event_date_time),
            end_event_date_time: Some(event.end_event_date_time),
            location: event.location.clone(),
            base_price: Some(event.base_price),
            max_price: Some(event.max_price),
            limit_of_enrollment: Some(event.limit_of_enrollment),
        }
    }
}

pub fn is_free(base_price: i32, max_price: i32) -> bool {
    base_price == 0 && max_price == 0
}

pub fn is_offline(location: Option<&str>) -> bool {
    location.is_some_and(|l| !l.trim().is_empty())
}
