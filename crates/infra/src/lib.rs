//! # Traincast Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - HTTP client with retry and backoff
//! - Microsoft Graph adapters (directory, online meetings, cloud calendar)
//! - Exchange Web Services adapter for on-premises mailboxes
//! - Configuration loading and service wiring
//!
//! ## Architecture
//! - Implements traits defined in `traincast-core`
//! - Contains all "impure" code (network I/O, environment, files)

pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;
pub mod logging;
pub mod wiring;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::*;
pub use integrations::*;
pub use logging::init_tracing;
pub use wiring::{build_invite_service, build_invite_stack, client_credentials, InviteStack};
