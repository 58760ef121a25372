use chrono::{TimeZone, Utc};
use traincast_domain::{EventEntity, EventModality};

pub const ORGANIZER: &str = "organizer@contoso.com";

/// Single-occurrence in-person event on 2024-03-01 09:00-10:30 UTC.
pub fn in_person_event() -> EventEntity {
    EventEntity {
        event_id: "evt-100".into(),
        title: "Leadership essentials".into(),
        description: "Module 1: feedback & coaching".into(),
        modality: EventModality::InPerson,
        start_date: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        end_date: Utc.with_ymd_and_hms(2024, 3, 5, 10, 30, 0).unwrap(),
        venue: Some("Building 7, Room 12".into()),
        meeting_link: None,
        number_of_occurrences: 1,
        registered_attendees: Some("a@x.com;b@x.com".into()),
        auto_registered_attendees: Some(String::new()),
        organizer_id: Some(ORGANIZER.into()),
        graph_event_id: None,
    }
}

pub fn live_event() -> EventEntity {
    EventEntity {
        modality: EventModality::LiveEvent,
        venue: None,
        meeting_link: Some("https://stream.contoso.com/live/townhall".into()),
        ..in_person_event()
    }
}

pub fn online_event() -> EventEntity {
    EventEntity { modality: EventModality::OnlineMeeting, venue: None, ..in_person_event() }
}
