//! Microsoft Graph adapters: directory, online meetings and cloud calendar

pub mod auth;
pub mod calendar;
pub mod directory;
pub mod meetings;
pub mod routing_cache;

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use traincast_domain::Result;

pub use auth::{AccessTokenProvider, ClientCredentialsTokenProvider, StaticTokenProvider};
pub use calendar::GraphCalendarWriter;
pub use directory::GraphDirectory;
pub use meetings::GraphOnlineMeetings;
pub use routing_cache::CachedDirectory;

use crate::errors::{status_error, InfraError};
use crate::http::{HttpClient, RetryPolicy};

const GRAPH_SERVICE: &str = "Graph";

/// Authorized access to one Graph deployment, shared by the Graph adapters.
#[derive(Clone)]
pub struct GraphClient {
    http: HttpClient,
    base_url: String,
    tokens: Arc<dyn AccessTokenProvider>,
}

impl GraphClient {
    pub fn new(
        http: HttpClient,
        base_url: impl Into<String>,
        tokens: Arc<dyn AccessTokenProvider>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url, tokens }
    }

    /// Bearer-authorized request for `path`, relative to the base URL.
    pub async fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let token = self.tokens.access_token().await?;
        Ok(self.http.request(method, format!("{}{}", self.base_url, path)).bearer_auth(token))
    }

    /// Send an idempotent request and map non-success statuses to domain
    /// errors.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        self.send_with(builder, RetryPolicy::Idempotent).await
    }

    pub async fn send_with(&self, builder: RequestBuilder, policy: RetryPolicy) -> Result<Response> {
        let response = self.http.send_with(builder, policy).await?;
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
        Err(status_error(GRAPH_SERVICE, status, &body))
    }

    /// Send an idempotent request and decode the JSON response body.
    pub async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        self.send_json_with(builder, RetryPolicy::Idempotent).await
    }

    pub async fn send_json_with<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        policy: RetryPolicy,
    ) -> Result<T> {
        let response = self.send_with(builder, policy).await?;
        let bytes = response.bytes().await.map_err(InfraError::from)?;
        let value = serde_json::from_slice(&bytes).map_err(InfraError::from)?;
        Ok(value)
    }
}

/// Percent-encode a single path segment such as a user principal name.
pub(crate) fn encode_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes()).collect::<String>().replace('+', "%20")
}
