//! Invite payload types
//!
//! An [`InvitePayload`] is built fresh for every lifecycle action and handed
//! to exactly one backend writer. Nothing here is persisted.

use chrono::{DateTime, Duration, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// A resolved invite attendee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub display_name: String,
    pub address: String,
}

/// Where attendees join the event. Exactly one variant applies per modality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InviteVenue {
    Physical { location: String },
    LiveStream { url: String },
    OnlineMeeting { join_url: String },
}

impl InviteVenue {
    /// Calendar location; only physical events carry one.
    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Physical { location } => Some(location),
            _ => None,
        }
    }

    /// External live-stream link.
    pub fn meeting_link(&self) -> Option<&str> {
        match self {
            Self::LiveStream { url } => Some(url),
            _ => None,
        }
    }

    /// Online-meeting join link.
    pub fn join_link(&self) -> Option<&str> {
        match self {
            Self::OnlineMeeting { join_url } => Some(join_url),
            _ => None,
        }
    }
}

/// Daily recurrence bounded by an occurrence count.
///
/// The occurrence count is the only bound sent to a backend; `end_date` is
/// derived for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceDescriptor {
    pub interval_days: u32,
    pub start_date: NaiveDate,
    pub occurrences: u32,
}

impl RecurrenceDescriptor {
    /// Daily recurrence starting at `start_date`.
    pub fn daily(start_date: NaiveDate, occurrences: u32) -> Self {
        Self { interval_days: 1, start_date, occurrences }
    }

    /// Date of the last occurrence.
    pub fn end_date(&self) -> NaiveDate {
        let span = i64::from(self.occurrences.saturating_sub(1)) * i64::from(self.interval_days);
        self.start_date + Duration::days(span)
    }
}

/// Backend-neutral invite content.
#[derive(Debug, Clone, PartialEq)]
pub struct InvitePayload {
    pub subject: String,
    pub body_html: String,
    pub attendees: Vec<Attendee>,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub recurrence: Option<RecurrenceDescriptor>,
    pub venue: InviteVenue,
}

impl InvitePayload {
    pub fn time_zone(&self) -> Tz {
        self.start.timezone()
    }
}

/// Identifier of the calendar item a backend created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarItemId(pub String);

impl CalendarItemId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CalendarItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
