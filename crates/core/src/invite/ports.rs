//! Port interfaces for invite materialization
//!
//! These traits define the boundaries between the invite workflow and the
//! directory, online-meeting and mail backends implemented in infra.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use traincast_domain::{CalendarItemId, DirectoryUser, InvitePayload, MailboxRouting, Result};

/// Trait for resolving user identifiers against the directory service
#[async_trait]
pub trait DirectoryLookup: Send + Sync {
    /// Resolve a single user, including the on-premises mailbox flag.
    async fn resolve_user(&self, identifier: &str) -> Result<DirectoryUser>;

    /// Resolve a list of users in one batched call.
    ///
    /// Implementations must return one record per identifier, in input
    /// order, or fail the whole call.
    async fn resolve_users(&self, identifiers: &[String]) -> Result<Vec<DirectoryUser>>;
}

/// Identity an online meeting is created under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetingIdentity<'a> {
    /// The event organizer's account.
    Organizer(&'a str),
    /// Whoever the service is currently authenticated as.
    Current,
}

/// Online meeting creation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnlineMeetingRequest {
    pub subject: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Online meeting as returned by the meeting service
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnlineMeeting {
    pub join_web_url: Option<String>,
    /// Raw join-information fragment (usually a `data:text/html,` URL).
    pub join_information: Option<String>,
}

/// Trait for creating online meeting resources
#[async_trait]
pub trait OnlineMeetingService: Send + Sync {
    async fn create_online_meeting(
        &self,
        identity: MeetingIdentity<'_>,
        request: &OnlineMeetingRequest,
    ) -> Result<OnlineMeeting>;
}

/// Calendar backend capable of writing invites for an organizer
#[async_trait]
pub trait InviteWriter: Send + Sync {
    /// Backend this writer serves.
    fn backend(&self) -> MailboxRouting;

    /// Create the invite. `transaction_id` is stable across retries of the
    /// same event.
    async fn create_invite(
        &self,
        organizer: &str,
        payload: &InvitePayload,
        transaction_id: &str,
    ) -> Result<CalendarItemId>;

    /// Overwrite an existing invite.
    async fn update_invite(
        &self,
        organizer: &str,
        item_id: &CalendarItemId,
        payload: &InvitePayload,
    ) -> Result<()>;

    /// Cancel an invite and notify attendees.
    async fn cancel_invite(
        &self,
        organizer: &str,
        item_id: &CalendarItemId,
        comment: &str,
    ) -> Result<()>;
}
