//! Backend selection
//!
//! One [`InviteWriter`] per mailbox backend; the routing value resolved for
//! the organizer picks exactly one of them.

use std::sync::Arc;

use traincast_domain::{MailboxRouting, Result, TraincastError};

use super::ports::InviteWriter;

/// Cloud and on-premises writers
#[derive(Clone)]
pub struct InviteWriters {
    cloud: Arc<dyn InviteWriter>,
    on_premises: Arc<dyn InviteWriter>,
}

impl InviteWriters {
    /// Pair the two writers, checking each serves the backend it is wired to.
    pub fn new(cloud: Arc<dyn InviteWriter>, on_premises: Arc<dyn InviteWriter>) -> Result<Self> {
        if cloud.backend() != MailboxRouting::Cloud {
            return Err(TraincastError::Config(format!(
                "cloud slot wired to a {} writer",
                cloud.backend()
            )));
        }
        if on_premises.backend() != MailboxRouting::OnPremises {
            return Err(TraincastError::Config(format!(
                "on-premises slot wired to a {} writer",
                on_premises.backend()
            )));
        }
        Ok(Self { cloud, on_premises })
    }

    /// Writer serving `routing`.
    pub fn select(&self, routing: MailboxRouting) -> &dyn InviteWriter {
        match routing {
            MailboxRouting::Cloud => self.cloud.as_ref(),
            MailboxRouting::OnPremises => self.on_premises.as_ref(),
        }
    }
}
