//! Outbound HTTP with bounded retries

use std::time::Duration;

use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response, StatusCode};
use tracing::debug;
use traincast_domain::{HttpConfig, TraincastError};

use crate::errors::InfraError;

const USER_AGENT: &str = concat!("traincast/", env!("CARGO_PKG_VERSION"));

/// Which failures a request may be replayed after.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryPolicy {
    /// Safe to replay: retry server errors, throttling and transport failures.
    Idempotent,
    /// Side-effecting calls: replay only when the server provably did no
    /// work, i.e. a 429 or a connection that was never established.
    ThrottlingOnly,
}

impl RetryPolicy {
    fn retries_status(self, status: StatusCode) -> bool {
        match self {
            RetryPolicy::Idempotent => {
                status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
            }
            RetryPolicy::ThrottlingOnly => status == StatusCode::TOO_MANY_REQUESTS,
        }
    }

    fn retries_error(self, err: &reqwest::Error) -> bool {
        match self {
            RetryPolicy::Idempotent => err.is_timeout() || err.is_request() || err.is_connect(),
            RetryPolicy::ThrottlingOnly => err.is_connect(),
        }
    }
}

/// HTTP client with a timeout and exponential-backoff retries.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    max_attempts: usize,
    base_backoff: Duration,
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Client with default timeout and retry settings.
    pub fn new() -> Result<Self, TraincastError> {
        Self::builder().build()
    }

    /// Builder seeded from the `[http]` configuration section.
    pub fn from_config(config: &HttpConfig) -> HttpClientBuilder {
        Self::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .max_attempts(config.max_attempts)
            .base_backoff(Duration::from_millis(config.base_backoff_ms))
    }

    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Send an idempotent request; see [`HttpClient::send_with`].
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, TraincastError> {
        self.send_with(builder, RetryPolicy::Idempotent).await
    }

    /// Send `builder`, replaying it per `policy` up to the attempt limit.
    ///
    /// The last response is returned as-is; status mapping is the caller's.
    pub async fn send_with(
        &self,
        builder: RequestBuilder,
        policy: RetryPolicy,
    ) -> Result<Response, TraincastError> {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let request = builder
                .try_clone()
                .ok_or_else(|| {
                    TraincastError::Internal("streaming request bodies cannot be retried".into())
                })?
                .build()
                .map_err(|err| TraincastError::from(InfraError::from(err)))?;

            let method = request.method().clone();
            let url = request.url().clone();
            let last = attempt >= attempts;
            debug!(attempt, %method, %url, ?policy, "sending HTTP request");

            match self.client.execute(request).await {
                Ok(response) => {
                    let status = response.status();
                    debug!(attempt, %method, %url, %status, "received HTTP response");
                    if last || !policy.retries_status(status) {
                        return Ok(response);
                    }
                }
                Err(err) => {
                    debug!(attempt, %method, %url, error = %err, "HTTP request failed");
                    if last || !policy.retries_error(&err) {
                        return Err(InfraError::from(err).into());
                    }
                }
            }

            self.sleep_with_backoff(attempt).await;
            attempt += 1;
        }
    }

    fn backoff_delay(&self, retry_number: usize) -> Duration {
        let shift = retry_number.saturating_sub(1).min(8) as u32;
        self.base_backoff.saturating_mul(1u32 << shift)
    }

    async fn sleep_with_backoff(&self, retry_number: usize) {
        let delay = self.backoff_delay(retry_number);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    max_attempts: usize,
    base_backoff: Duration,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_attempts: 3,
            base_backoff: Duration::from_millis(200),
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Total number of attempts, the first try included.
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    pub fn build(self) -> Result<HttpClient, TraincastError> {
        let client = ReqwestClient::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| TraincastError::from(InfraError::from(err)))?;

        Ok(HttpClient { client, max_attempts: self.max_attempts, base_backoff: self.base_backoff })
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use reqwest::{Method, StatusCode};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_with_defaults() -> HttpClient {
        HttpClient::builder()
            .base_backoff(Duration::from_millis(10))
            .max_attempts(3)
            .build()
            .expect("http client")
    }

    #[tokio::test]
    async fn returns_successful_response_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_with_defaults();
        let response =
            client.send(client.request(Method::GET, server.uri())).await.expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
    }

    #[tokio::test]
    async fn retries_server_errors_until_success() {
        let server = MockServer::start().await;
        let attempts = Arc::new(AtomicUsize::new(0));
        let attempts_clone = attempts.clone();
        Mock::given(method("POST"))
            .respond_with(move |_req: &wiremock::Request| -> ResponseTemplate {
                let current = attempts_clone.fetch_add(1, Ordering::SeqCst);
                if current == 0 {
                    ResponseTemplate::new(503)
                } else if current == 1 {
                    ResponseTemplate::new(429)
                } else {
                    ResponseTemplate::new(201)
                }
            })
            .expect(3)
            .mount(&server)
            .await;

        let client = client_with_defaults();
        let request =
            client.request(Method::POST, server.uri()).json(&serde_json::json!({"subject": "x"}));
        let response = client.send(request).await.expect("response");

        assert_eq!(response.status(), StatusCode::CREATED);
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 3);
        assert!(requests.iter().all(|r| r.body == br#"{"subject":"x"}"#.to_vec()));
    }

    #[tokio::test]
    async fn does_not_retry_client_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_with_defaults();
        let response =
            client.send(client.request(Method::GET, server.uri())).await.expect("response");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
    }

    #[tokio::test]
    async fn single_attempt_client_returns_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpClient::builder().max_attempts(1).build().expect("http client");
        let response =
            client.send(client.request(Method::POST, server.uri())).await.expect("response");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn retries_on_network_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener); // release the port so that requests fail with ECONNREFUSED
        let url = format!("http://{}", addr);

        let client = HttpClient::builder()
            .base_backoff(Duration::from_millis(5))
            .max_attempts(2)
            .build()
            .expect("http client");

        let result = client.send(client.request(Method::GET, &url)).await;
        match result {
            Err(TraincastError::Network(msg)) => {
                assert!(msg.to_lowercase().contains("http"));
            }
            other => panic!("expected network error, got {:?}", other.map(|r| r.status())),
        }
    }

    #[tokio::test]
    async fn throttling_only_policy_does_not_replay_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_with_defaults();
        let request = client.request(Method::POST, server.uri()).body("{}");
        let response =
            client.send_with(request, RetryPolicy::ThrottlingOnly).await.expect("response");

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn throttling_only_policy_replays_429() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST")).respond_with(ResponseTemplate::new(202)).mount(&server).await;

        let client = client_with_defaults();
        let request = client.request(Method::POST, server.uri()).body("{}");
        let response =
            client.send_with(request, RetryPolicy::ThrottlingOnly).await.expect("response");

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }

    #[test]
    fn backoff_doubles_per_retry() {
        let client = HttpClient::builder()
            .base_backoff(Duration::from_millis(100))
            .build()
            .expect("http client");
        assert_eq!(client.backoff_delay(1), Duration::from_millis(100));
        assert_eq!(client.backoff_delay(2), Duration::from_millis(200));
        assert_eq!(client.backoff_delay(3), Duration::from_millis(400));
    }
}
