//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_AUTHORITY_URL, DEFAULT_CANCEL_COMMENT, DEFAULT_GRAPH_BASE_URL,
    DEFAULT_HTTP_BACKOFF_MS, DEFAULT_HTTP_MAX_ATTEMPTS, DEFAULT_HTTP_TIMEOUT_SECS,
    DEFAULT_ROUTING_CACHE_CAPACITY, DEFAULT_TIME_ZONE,
};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub graph: GraphConfig,
    pub exchange: ExchangeConfig,
    #[serde(default)]
    pub invite: InviteConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub routing_cache: RoutingCacheConfig,
}

/// Microsoft Graph application registration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphConfig {
    #[serde(default = "default_graph_base_url")]
    pub base_url: String,
    #[serde(default = "default_authority_url")]
    pub authority_url: String,
    pub tenant_id: String,
    pub client_id: String,
    #[serde(skip_serializing, default)]
    pub client_secret: String,
    /// Mailbox that hosts online meetings created outside an organizer's
    /// identity. Required with app-only tokens, which cannot address `/me`.
    #[serde(default)]
    pub meeting_account: String,
}

/// On-premises Exchange Web Services endpoint and service account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExchangeConfig {
    pub endpoint: String,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    /// EWS CreateItem is not idempotent, so retries are off unless asked for.
    #[serde(default = "default_exchange_attempts")]
    pub max_attempts: usize,
}

/// Invite rendering options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InviteConfig {
    /// IANA time zone the invite times are expressed in.
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    #[serde(default = "default_cancel_comment")]
    pub cancel_comment: String,
}

/// Outbound HTTP behaviour
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    #[serde(default = "default_backoff_ms")]
    pub base_backoff_ms: u64,
}

/// Organizer routing cache; a zero TTL disables caching.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutingCacheConfig {
    #[serde(default)]
    pub ttl_seconds: u64,
    #[serde(default = "default_cache_capacity")]
    pub max_capacity: u64,
}

impl Default for InviteConfig {
    fn default() -> Self {
        Self { time_zone: default_time_zone(), cancel_comment: default_cancel_comment() }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            max_attempts: default_max_attempts(),
            base_backoff_ms: default_backoff_ms(),
        }
    }
}

impl Default for RoutingCacheConfig {
    fn default() -> Self {
        Self { ttl_seconds: 0, max_capacity: default_cache_capacity() }
    }
}

fn default_graph_base_url() -> String {
    DEFAULT_GRAPH_BASE_URL.to_string()
}

fn default_authority_url() -> String {
    DEFAULT_AUTHORITY_URL.to_string()
}

fn default_exchange_attempts() -> usize {
    1
}

fn default_time_zone() -> String {
    DEFAULT_TIME_ZONE.to_string()
}

fn default_cancel_comment() -> String {
    DEFAULT_CANCEL_COMMENT.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}

fn default_max_attempts() -> usize {
    DEFAULT_HTTP_MAX_ATTEMPTS
}

fn default_backoff_ms() -> u64 {
    DEFAULT_HTTP_BACKOFF_MS
}

fn default_cache_capacity() -> u64 {
    DEFAULT_ROUTING_CACHE_CAPACITY
}
