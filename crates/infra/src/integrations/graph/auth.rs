//! Access tokens for Microsoft Graph

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;
use traincast_domain::{GraphConfig, Result, TraincastError};

use crate::errors::status_error;
use crate::http::HttpClient;

const GRAPH_DEFAULT_SCOPE: &str = "https://graph.microsoft.com/.default";
/// Tokens are refreshed this long before the reported expiry.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Provides OAuth access tokens for Graph calls.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Retrieve a bearer token to authorize Graph API calls.
    async fn access_token(&self) -> Result<String>;

    /// App-only tokens carry no signed-in user, so `/me` is unavailable.
    fn is_app_only(&self) -> bool {
        false
    }
}

/// A token supplied by the caller, e.g. a delegated token from the Teams
/// client after an on-behalf-of exchange.
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}

/// App-only tokens from the OAuth2 client-credentials grant, cached until
/// shortly before they expire.
pub struct ClientCredentialsTokenProvider {
    http: HttpClient,
    token_url: String,
    client_id: String,
    client_secret: String,
    cached: Mutex<Option<CachedToken>>,
}

struct CachedToken {
    value: String,
    refresh_at: Instant,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

impl ClientCredentialsTokenProvider {
    pub fn new(http: HttpClient, config: &GraphConfig) -> Result<Self> {
        if config.tenant_id.trim().is_empty() || config.client_id.trim().is_empty() {
            return Err(TraincastError::Config("graph tenant_id and client_id are required".into()));
        }
        Ok(Self {
            http,
            token_url: format!(
                "{}/{}/oauth2/v2.0/token",
                config.authority_url.trim_end_matches('/'),
                config.tenant_id
            ),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            cached: Mutex::new(None),
        })
    }

    async fn fetch(&self) -> Result<CachedToken> {
        let request = self.http.request(Method::POST, &self.token_url).form(&[
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("scope", GRAPH_DEFAULT_SCOPE),
            ("grant_type", "client_credentials"),
        ]);

        let response = self.http.send(request).await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(match status_error("Token endpoint", status, &body) {
                TraincastError::External(message) => TraincastError::Auth(message),
                other => other,
            });
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            TraincastError::Auth(format!("Failed to parse token response: {}", e))
        })?;

        debug!(expires_in = token.expires_in, "acquired Graph app token");
        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(EXPIRY_MARGIN);
        Ok(CachedToken { value: token.access_token, refresh_at: Instant::now() + lifetime })
    }
}

#[async_trait]
impl AccessTokenProvider for ClientCredentialsTokenProvider {
    fn is_app_only(&self) -> bool {
        true
    }

    async fn access_token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.refresh_at {
                return Ok(token.value.clone());
            }
        }

        let fresh = self.fetch().await?;
        let value = fresh.value.clone();
        *cached = Some(fresh);
        Ok(value)
    }
}
