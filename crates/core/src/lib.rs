//! # Traincast Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces for the directory, online-meeting and mail backends
//! - The invite workflow (attendees, body, recurrence, backend selection)
//!
//! ## Architecture Principles
//! - Only depends on `traincast-domain`
//! - No HTTP or SOAP code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod invite;

// Re-export specific items to avoid ambiguity
pub use invite::ports::{DirectoryLookup, InviteWriter, OnlineMeetingService};
pub use invite::{InviteAction, InviteService, InviteWriters};
