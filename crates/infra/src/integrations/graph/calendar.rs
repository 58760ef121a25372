//! Cloud mailbox invites through the Graph calendar API

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::debug;
use traincast_core::InviteWriter;
use traincast_domain::{CalendarItemId, InvitePayload, MailboxRouting, Result};

use super::{encode_segment, GraphClient};
use crate::http::RetryPolicy;

const GRAPH_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Writes invites into Exchange Online mailboxes.
#[derive(Clone)]
pub struct GraphCalendarWriter {
    client: GraphClient,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphEvent<'a> {
    subject: &'a str,
    body: ItemBody<'a>,
    start: DateTimeTimeZone,
    end: DateTimeTimeZone,
    attendees: Vec<GraphAttendee<'a>>,
    /// `None` clears the location on update.
    location: Option<Location<'a>>,
    /// `None` clears any previous recurrence on update.
    recurrence: Option<PatternedRecurrence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transaction_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ItemBody<'a> {
    content_type: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DateTimeTimeZone {
    date_time: String,
    time_zone: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphAttendee<'a> {
    email_address: EmailAddress<'a>,
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct EmailAddress<'a> {
    address: &'a str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Location<'a> {
    display_name: &'a str,
}

#[derive(Debug, Serialize)]
struct PatternedRecurrence {
    pattern: RecurrencePattern,
    range: RecurrenceRange,
}

#[derive(Debug, Serialize)]
struct RecurrencePattern {
    #[serde(rename = "type")]
    kind: &'static str,
    interval: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecurrenceRange {
    #[serde(rename = "type")]
    kind: &'static str,
    start_date: String,
    number_of_occurrences: u32,
    recurrence_time_zone: String,
}

#[derive(Serialize)]
struct CancelBody<'a> {
    comment: &'a str,
}

#[derive(Deserialize)]
struct CreatedEvent {
    id: String,
}

fn graph_event<'a>(payload: &'a InvitePayload, transaction_id: Option<&'a str>) -> GraphEvent<'a> {
    let zone = payload.time_zone().name().to_string();
    GraphEvent {
        subject: &payload.subject,
        body: ItemBody { content_type: "HTML", content: &payload.body_html },
        start: DateTimeTimeZone {
            date_time: payload.start.format(GRAPH_DATETIME_FORMAT).to_string(),
            time_zone: zone.clone(),
        },
        end: DateTimeTimeZone {
            date_time: payload.end.format(GRAPH_DATETIME_FORMAT).to_string(),
            time_zone: zone.clone(),
        },
        attendees: payload
            .attendees
            .iter()
            .map(|a| GraphAttendee {
                email_address: EmailAddress { address: &a.address, name: &a.display_name },
                kind: "required",
            })
            .collect(),
        location: payload.venue.location().map(|display_name| Location { display_name }),
        recurrence: payload.recurrence.map(|rule| PatternedRecurrence {
            pattern: RecurrencePattern { kind: "daily", interval: rule.interval_days },
            range: RecurrenceRange {
                kind: "numbered",
                start_date: rule.start_date.format("%Y-%m-%d").to_string(),
                number_of_occurrences: rule.occurrences,
                recurrence_time_zone: zone.clone(),
            },
        }),
        transaction_id,
    }
}

fn prefer_time_zone(payload: &InvitePayload) -> String {
    format!("outlook.timezone=\"{}\"", payload.time_zone().name())
}

impl GraphCalendarWriter {
    pub fn new(client: GraphClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl InviteWriter for GraphCalendarWriter {
    fn backend(&self) -> MailboxRouting {
        MailboxRouting::Cloud
    }

    async fn create_invite(
        &self,
        organizer: &str,
        payload: &InvitePayload,
        transaction_id: &str,
    ) -> Result<CalendarItemId> {
        let path = format!("/users/{}/events", encode_segment(organizer));
        let builder = self
            .client
            .request(Method::POST, &path)
            .await?
            .header("Prefer", prefer_time_zone(payload))
            .json(&graph_event(payload, Some(transaction_id)));

        let created: CreatedEvent = self.client.send_json(builder).await?;
        debug!(organizer, item_id = %created.id, "created Graph event");
        Ok(CalendarItemId(created.id))
    }

    async fn update_invite(
        &self,
        organizer: &str,
        item_id: &CalendarItemId,
        payload: &InvitePayload,
    ) -> Result<()> {
        let path = format!(
            "/users/{}/events/{}",
            encode_segment(organizer),
            encode_segment(item_id.as_str())
        );
        let builder = self
            .client
            .request(Method::PATCH, &path)
            .await?
            .header("Prefer", prefer_time_zone(payload))
            .json(&graph_event(payload, None));

        self.client.send(builder).await?;
        Ok(())
    }

    async fn cancel_invite(
        &self,
        organizer: &str,
        item_id: &CalendarItemId,
        comment: &str,
    ) -> Result<()> {
        let path = format!(
            "/users/{}/events/{}/cancel",
            encode_segment(organizer),
            encode_segment(item_id.as_str())
        );
        let builder =
            self.client.request(Method::POST, &path).await?.json(&CancelBody { comment });

        // A replayed cancel after a lost 202 would fail on an already cancelled event.
        self.client.send_with(builder, RetryPolicy::ThrottlingOnly).await?;
        Ok(())
    }
}
