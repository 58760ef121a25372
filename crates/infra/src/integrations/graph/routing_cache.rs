//! Organizer routing cache with moka
//!
//! Wraps any [`DirectoryLookup`] and keeps single-user resolutions (the
//! organizer lookups that decide mailbox routing) for a configurable TTL.
//!
//! - Batch attendee lookups always go to the inner directory
//! - Only successful resolutions are cached, never errors
//! - Concurrent misses for the same organizer share one lookup

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use tracing::debug;
use traincast_core::DirectoryLookup;
use traincast_domain::{DirectoryUser, Result, RoutingCacheConfig};

pub struct CachedDirectory {
    inner: Arc<dyn DirectoryLookup>,
    users: Cache<String, DirectoryUser>,
}

impl CachedDirectory {
    /// `None` when caching is disabled (`ttl_seconds == 0`).
    pub fn new(inner: Arc<dyn DirectoryLookup>, config: &RoutingCacheConfig) -> Option<Self> {
        if config.ttl_seconds == 0 {
            return None;
        }

        tracing::info!(
            ttl_seconds = config.ttl_seconds,
            max_capacity = config.max_capacity,
            "routing cache configuration loaded"
        );

        let users = Cache::builder()
            .time_to_live(Duration::from_secs(config.ttl_seconds))
            .max_capacity(config.max_capacity)
            .build();
        Some(Self { inner, users })
    }

    /// Drop the cached entry for one organizer, e.g. after a mailbox move.
    pub async fn invalidate(&self, identifier: &str) {
        self.users.invalidate(&normalize(identifier)).await;
    }

    pub fn entry_count(&self) -> u64 {
        self.users.entry_count()
    }

    async fn sync(&self) {
        self.users.run_pending_tasks().await;
    }
}

fn normalize(identifier: &str) -> String {
    identifier.trim().to_lowercase()
}

#[async_trait]
impl DirectoryLookup for CachedDirectory {
    async fn resolve_user(&self, identifier: &str) -> Result<DirectoryUser> {
        let key = normalize(identifier);
        let inner = Arc::clone(&self.inner);
        let lookup = identifier.to_string();

        let result = self
            .users
            .try_get_with(key.clone(), async move { inner.resolve_user(&lookup).await })
            .await
            .map_err(|err| (*err).clone());

        self.sync().await;
        debug!(identifier = %key, cached_entries = self.entry_count(), "resolved organizer routing");
        result
    }

    async fn resolve_users(&self, identifiers: &[String]) -> Result<Vec<DirectoryUser>> {
        self.inner.resolve_users(identifiers).await
    }
}
