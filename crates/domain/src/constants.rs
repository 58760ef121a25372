//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Attendee lists
pub const ATTENDEE_SEPARATOR: char = ';';

// Microsoft Graph
pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.microsoft.com/v1.0";
pub const DEFAULT_AUTHORITY_URL: &str = "https://login.microsoftonline.com";
pub const GRAPH_BATCH_LIMIT: usize = 20; // Hard limit of the JSON $batch endpoint

// Invites
pub const DEFAULT_TIME_ZONE: &str = "UTC";
pub const DEFAULT_CANCEL_COMMENT: &str = "This training event has been cancelled.";

// HTTP
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_HTTP_MAX_ATTEMPTS: usize = 3;
pub const DEFAULT_HTTP_BACKOFF_MS: u64 = 200;

// Routing cache
pub const DEFAULT_ROUTING_CACHE_CAPACITY: u64 = 1000;
