//! Event-to-calendar-invite materialization
//!
//! Attendee resolution, body composition and recurrence encoding feed a
//! backend-neutral [`InvitePayload`](traincast_domain::InvitePayload) that a
//! routing-selected [`InviteWriter`](ports::InviteWriter) writes.

pub mod attendees;
pub mod body;
pub mod ports;
pub mod recurrence;
pub mod service;
pub mod writer;

pub use attendees::resolve_attendees;
pub use body::{compose, extract_join_url, BodyFlow, ComposedBody};
pub use ports::{
    DirectoryLookup, InviteWriter, MeetingIdentity, OnlineMeeting, OnlineMeetingRequest,
    OnlineMeetingService,
};
pub use service::{InviteAction, InviteService};
pub use writer::InviteWriters;
