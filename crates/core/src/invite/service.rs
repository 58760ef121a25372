//! Invite lifecycle service - core business logic

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use chrono_tz::Tz;
use tracing::{info, warn};
use traincast_domain::constants::DEFAULT_CANCEL_COMMENT;
use traincast_domain::{
    CalendarItemId, EventEntity, InvitePayload, MailboxRouting, Result, TraincastError,
};

use super::attendees::resolve_attendees;
use super::body::{self, BodyFlow};
use super::ports::{DirectoryLookup, OnlineMeetingService};
use super::recurrence;
use super::writer::InviteWriters;

/// Lifecycle action performed on an event's invite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InviteAction {
    Create,
    Update,
    Cancel,
}

traincast_domain::impl_domain_status_conversions!(InviteAction {
    Create => "create",
    Update => "update",
    Cancel => "cancel",
});

/// Invite materialization service
///
/// Every action runs sequentially: validate, resolve attendees, compose the
/// body, encode recurrence, resolve the organizer's mailbox backend and
/// dispatch to exactly one writer. External failures abort the action.
pub struct InviteService {
    directory: Arc<dyn DirectoryLookup>,
    meetings: Arc<dyn OnlineMeetingService>,
    writers: InviteWriters,
    time_zone: Tz,
    cancel_comment: String,
}

impl InviteService {
    /// Create a new invite service rendering times in `time_zone`
    pub fn new(
        directory: Arc<dyn DirectoryLookup>,
        meetings: Arc<dyn OnlineMeetingService>,
        writers: InviteWriters,
        time_zone: Tz,
    ) -> Self {
        Self {
            directory,
            meetings,
            writers,
            time_zone,
            cancel_comment: DEFAULT_CANCEL_COMMENT.to_string(),
        }
    }

    /// Comment sent to attendees when an invite is cancelled.
    pub fn with_cancel_comment(mut self, comment: impl Into<String>) -> Self {
        self.cancel_comment = comment.into();
        self
    }

    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    /// Create the calendar invite for `event` and return the backend item id.
    pub async fn create_invite(&self, event: &EventEntity) -> Result<CalendarItemId> {
        let started = Instant::now();
        let result = self.create_inner(event).await;
        log_outcome(
            InviteAction::Create,
            event,
            started.elapsed(),
            result.as_ref().map(|(routing, _)| *routing),
        );
        result.map(|(_, id)| id)
    }

    /// Overwrite the existing invite of `event`.
    pub async fn update_invite(&self, event: &EventEntity) -> Result<()> {
        let started = Instant::now();
        let result = self.update_inner(event).await;
        log_outcome(InviteAction::Update, event, started.elapsed(), result.as_ref().copied());
        result.map(|_| ())
    }

    /// Cancel the invite of `event`.
    pub async fn cancel_invite(&self, event: &EventEntity) -> Result<()> {
        let started = Instant::now();
        let result = self.cancel_inner(event).await;
        log_outcome(InviteAction::Cancel, event, started.elapsed(), result.as_ref().copied());
        result.map(|_| ())
    }

    /// Resolve which mailbox backend serves `organizer`.
    pub async fn resolve_routing(&self, organizer: &str) -> Result<MailboxRouting> {
        let user = self
            .directory
            .resolve_user(organizer)
            .await
            .map_err(|err| err.context("resolving organizer mailbox"))?;
        Ok(user.routing())
    }

    /// Build the backend-neutral payload for `event`.
    pub async fn build_payload(
        &self,
        event: &EventEntity,
        flow: BodyFlow,
        organizer: &str,
    ) -> Result<InvitePayload> {
        let subject = event.title.trim();
        if subject.is_empty() {
            return Err(TraincastError::InvalidInput(format!(
                "event {} has no title",
                event.event_id
            )));
        }

        let (start, end) =
            recurrence::normalize_times(event.start_date, event.end_date, self.time_zone)?;

        let attendees = resolve_attendees(
            self.directory.as_ref(),
            event.registered_attendees.as_deref(),
            event.auto_registered_attendees.as_deref(),
        )
        .await?;

        let composed = body::compose(
            self.meetings.as_ref(),
            event,
            flow,
            organizer,
            (start.with_timezone(&Utc), end.with_timezone(&Utc)),
        )
        .await?;

        let recurrence = recurrence::encode(start.date_naive(), event.number_of_occurrences);

        Ok(InvitePayload {
            subject: subject.to_string(),
            body_html: composed.body_html,
            attendees,
            start,
            end,
            recurrence,
            venue: composed.venue,
        })
    }

    async fn create_inner(&self, event: &EventEntity) -> Result<(MailboxRouting, CalendarItemId)> {
        let event_id = event.require_event_id()?;
        let organizer = event.require_organizer()?;

        let payload = self.build_payload(event, BodyFlow::Create, organizer).await?;
        let routing = self.resolve_routing(organizer).await?;
        let id = self
            .writers
            .select(routing)
            .create_invite(organizer, &payload, event_id)
            .await
            .map_err(|err| err.context(&format!("creating {routing} invite")))?;
        Ok((routing, id))
    }

    async fn update_inner(&self, event: &EventEntity) -> Result<MailboxRouting> {
        event.require_event_id()?;
        let organizer = event.require_organizer()?;
        let item_id = CalendarItemId(event.require_calendar_item_id()?.to_string());

        let payload = self.build_payload(event, BodyFlow::Update, organizer).await?;
        let routing = self.resolve_routing(organizer).await?;
        self.writers
            .select(routing)
            .update_invite(organizer, &item_id, &payload)
            .await
            .map_err(|err| err.context(&format!("updating {routing} invite")))?;
        Ok(routing)
    }

    async fn cancel_inner(&self, event: &EventEntity) -> Result<MailboxRouting> {
        event.require_event_id()?;
        let organizer = event.require_organizer()?;
        let item_id = CalendarItemId(event.require_calendar_item_id()?.to_string());

        let routing = self.resolve_routing(organizer).await?;
        self.writers
            .select(routing)
            .cancel_invite(organizer, &item_id, &self.cancel_comment)
            .await
            .map_err(|err| err.context(&format!("cancelling {routing} invite")))?;
        Ok(routing)
    }
}

fn log_outcome(
    action: InviteAction,
    event: &EventEntity,
    elapsed: Duration,
    result: std::result::Result<MailboxRouting, &TraincastError>,
) {
    let duration_ms = elapsed.as_millis() as u64;
    let event_id = event.event_id.as_str();

    match result {
        Ok(routing) => {
            info!(
                action = %action,
                event_id,
                backend = %routing,
                duration_ms,
                "invite_action_success"
            );
        }
        Err(err) => {
            warn!(
                action = %action,
                event_id,
                duration_ms,
                error_type = err.label(),
                error = %err,
                "invite_action_failure"
            );
        }
    }
}
