//! Training event entity
//!
//! Events are created and persisted by the controller/repository layer; the
//! invite workflow only reads them to derive an [`InvitePayload`].
//!
//! [`InvitePayload`]: super::invite::InvitePayload

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::ATTENDEE_SEPARATOR;
use crate::errors::{Result, TraincastError};

/// How a training event is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "i32", into = "i32")]
pub enum EventModality {
    /// Physical venue.
    InPerson,
    /// External live-stream link.
    LiveEvent,
    /// Platform-hosted online meeting created per invite.
    #[default]
    OnlineMeeting,
}

impl EventModality {
    pub fn code(self) -> i32 {
        match self {
            Self::InPerson => 0,
            Self::LiveEvent => 1,
            Self::OnlineMeeting => 2,
        }
    }
}

impl TryFrom<i32> for EventModality {
    type Error = TraincastError;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(Self::InPerson),
            1 => Ok(Self::LiveEvent),
            2 => Ok(Self::OnlineMeeting),
            other if other < 0 => {
                Err(TraincastError::InvalidInput(format!("invalid event modality code: {other}")))
            }
            // Unknown positive codes take the online-meeting branch.
            _ => Ok(Self::OnlineMeeting),
        }
    }
}

impl From<EventModality> for i32 {
    fn from(value: EventModality) -> Self {
        value.code()
    }
}

crate::impl_domain_status_conversions!(EventModality {
    InPerson => "in_person",
    LiveEvent => "live_event",
    OnlineMeeting => "online_meeting",
});

/// A training event as stored by the repository layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventEntity {
    pub event_id: String,
    pub title: String,
    pub description: String,
    pub modality: EventModality,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Physical location, used by [`EventModality::InPerson`].
    pub venue: Option<String>,
    /// Live-stream URL, used by [`EventModality::LiveEvent`].
    pub meeting_link: Option<String>,
    pub number_of_occurrences: u32,
    /// Semicolon-delimited user identifiers.
    pub registered_attendees: Option<String>,
    /// Semicolon-delimited user identifiers.
    pub auto_registered_attendees: Option<String>,
    pub organizer_id: Option<String>,
    /// Backend calendar item id, written back after the invite is created.
    pub graph_event_id: Option<String>,
}

impl EventEntity {
    /// Organizer identifier, or a bad-request error when it is missing.
    pub fn require_organizer(&self) -> Result<&str> {
        non_blank(self.organizer_id.as_deref()).ok_or_else(|| {
            TraincastError::InvalidInput(format!("event {} has no organizer", self.event_id))
        })
    }

    /// Backend item id, or a bad-request error when the invite was never created.
    pub fn require_calendar_item_id(&self) -> Result<&str> {
        non_blank(self.graph_event_id.as_deref()).ok_or_else(|| {
            TraincastError::InvalidInput(format!(
                "event {} has no calendar item identifier",
                self.event_id
            ))
        })
    }

    pub fn require_event_id(&self) -> Result<&str> {
        non_blank(Some(self.event_id.as_str()))
            .ok_or_else(|| TraincastError::InvalidInput("event identifier is missing".into()))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Split a delimited identifier list, trimming and dropping empty entries.
pub fn split_identifiers(list: Option<&str>) -> Vec<String> {
    list.map(|raw| {
        raw.split(ATTENDEE_SEPARATOR)
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_owned)
            .collect()
    })
    .unwrap_or_default()
}
