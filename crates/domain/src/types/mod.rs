//! Domain types and models

pub mod directory;
pub mod event;
pub mod invite;

pub use directory::{DirectoryUser, MailboxRouting};
pub use event::{split_identifiers, EventEntity, EventModality};
pub use invite::{Attendee, CalendarItemId, InvitePayload, InviteVenue, RecurrenceDescriptor};
