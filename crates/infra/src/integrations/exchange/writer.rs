//! On-premises invites through Exchange Web Services

use async_trait::async_trait;
use tracing::debug;
use traincast_core::InviteWriter;
use traincast_domain::{
    CalendarItemId, ExchangeConfig, InvitePayload, MailboxRouting, Result, TraincastError,
};

use super::session::{ExchangeCredentials, ExchangeSession};
use super::soap;
use crate::http::HttpClient;

/// Writes invites into on-premises mailboxes by impersonating the organizer.
pub struct ExchangeInviteWriter {
    http: HttpClient,
    credentials: ExchangeCredentials,
}

impl ExchangeInviteWriter {
    pub fn new(http: HttpClient, config: &ExchangeConfig) -> Result<Self> {
        if config.endpoint.trim().is_empty() {
            return Err(TraincastError::Config("exchange endpoint is required".into()));
        }
        url::Url::parse(&config.endpoint).map_err(|e| {
            TraincastError::Config(format!("invalid exchange endpoint '{}': {e}", config.endpoint))
        })?;

        Ok(Self {
            http,
            credentials: ExchangeCredentials {
                endpoint: config.endpoint.clone(),
                username: config.username.clone(),
                password: config.password.clone(),
            },
        })
    }

    fn session<'a>(&'a self, organizer: &'a str) -> ExchangeSession<'a> {
        ExchangeSession::new(&self.http, &self.credentials, organizer)
    }
}

#[async_trait]
impl InviteWriter for ExchangeInviteWriter {
    fn backend(&self) -> MailboxRouting {
        MailboxRouting::OnPremises
    }

    async fn create_invite(
        &self,
        organizer: &str,
        payload: &InvitePayload,
        transaction_id: &str,
    ) -> Result<CalendarItemId> {
        let session = self.session(organizer);
        let created = session.call_for_item("CreateItem", &soap::create_item(payload)?).await?;
        debug!(organizer, transaction_id, item_id = %created.id, "created EWS meeting");
        Ok(CalendarItemId(created.id))
    }

    async fn update_invite(
        &self,
        organizer: &str,
        item_id: &CalendarItemId,
        payload: &InvitePayload,
    ) -> Result<()> {
        let session = self.session(organizer);
        let current = session.call_for_item("GetItem", &soap::get_item(item_id.as_str())).await?;
        session.call("UpdateItem", &soap::update_item(&current, payload)?).await?;
        Ok(())
    }

    async fn cancel_invite(
        &self,
        organizer: &str,
        item_id: &CalendarItemId,
        comment: &str,
    ) -> Result<()> {
        // DeleteItem has no slot for a cancellation note.
        debug!(organizer, comment_len = comment.len(), "cancelling EWS meeting");
        let session = self.session(organizer);
        session.call("DeleteItem", &soap::delete_item(item_id.as_str())).await?;
        Ok(())
    }
}
