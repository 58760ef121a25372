//! One authenticated EWS conversation on behalf of a single mailbox

use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use tracing::debug;
use traincast_domain::{Result, TraincastError};

use super::soap::{self, ItemRef};
use crate::errors::{status_error, InfraError};
use crate::http::HttpClient;

const EWS_SERVICE: &str = "EWS";
const SOAP_ACTION_BASE: &str = "http://schemas.microsoft.com/exchange/services/2006/messages";

/// Service-account credentials used for every session.
#[derive(Clone)]
pub struct ExchangeCredentials {
    pub endpoint: String,
    pub username: String,
    pub password: String,
}

/// Impersonates `mailbox` for the duration of one invite operation.
///
/// Sessions are cheap and never shared between operations, so the
/// impersonated identity cannot leak across organizers.
pub struct ExchangeSession<'a> {
    http: &'a HttpClient,
    credentials: &'a ExchangeCredentials,
    mailbox: &'a str,
}

impl<'a> ExchangeSession<'a> {
    pub fn new(http: &'a HttpClient, credentials: &'a ExchangeCredentials, mailbox: &'a str) -> Self {
        Self { http, credentials, mailbox }
    }

    /// Post one SOAP operation and return the first item reference in the
    /// response.
    pub async fn call(&self, action: &str, body: &str) -> Result<Option<ItemRef>> {
        let request = self
            .http
            .request(Method::POST, &self.credentials.endpoint)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .header("SOAPAction", format!("{SOAP_ACTION_BASE}/{action}"))
            .body(soap::envelope(self.mailbox, body));

        debug!(action, mailbox = self.mailbox, "calling EWS");
        let response = self.http.send(request).await?;
        let status = response.status();
        let text = response.text().await.map_err(InfraError::from)?;

        if status.is_success() {
            return soap::parse_response(&text);
        }

        // EWS reports most failures as SOAP faults with HTTP 500.
        if status.is_server_error() {
            if let Some(fault) = soap::parse_fault(&text) {
                return Err(fault);
            }
        }
        Err(status_error(EWS_SERVICE, status, &text))
    }

    /// `call` for operations that must name an item in their response.
    pub async fn call_for_item(&self, action: &str, body: &str) -> Result<ItemRef> {
        self.call(action, body).await?.ok_or_else(|| {
            TraincastError::External(format!("EWS {action} response carried no item id"))
        })
    }
}
