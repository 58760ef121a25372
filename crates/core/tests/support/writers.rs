use std::sync::Mutex;

use async_trait::async_trait;
use traincast_core::InviteWriter;
use traincast_domain::{CalendarItemId, InvitePayload, MailboxRouting, Result, TraincastError};

/// A write observed by [`RecordingWriter`].
#[derive(Debug, Clone)]
pub enum RecordedWrite {
    Create { organizer: String, payload: InvitePayload, transaction_id: String },
    Update { organizer: String, item_id: CalendarItemId, payload: InvitePayload },
    Cancel { organizer: String, item_id: CalendarItemId, comment: String },
}

/// Writer that records every call instead of talking to a backend.
pub struct RecordingWriter {
    backend: MailboxRouting,
    fail: bool,
    pub writes: Mutex<Vec<RecordedWrite>>,
}

impl RecordingWriter {
    pub fn new(backend: MailboxRouting) -> Self {
        Self { backend, fail: false, writes: Mutex::new(Vec::new()) }
    }

    pub fn failing(backend: MailboxRouting) -> Self {
        Self { backend, fail: true, writes: Mutex::new(Vec::new()) }
    }

    pub fn writes(&self) -> Vec<RecordedWrite> {
        self.writes.lock().unwrap().clone()
    }

    fn check(&self) -> Result<()> {
        if self.fail {
            Err(TraincastError::External(format!("{} backend rejected the call", self.backend)))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl InviteWriter for RecordingWriter {
    fn backend(&self) -> MailboxRouting {
        self.backend
    }

    async fn create_invite(
        &self,
        organizer: &str,
        payload: &InvitePayload,
        transaction_id: &str,
    ) -> Result<CalendarItemId> {
        self.writes.lock().unwrap().push(RecordedWrite::Create {
            organizer: organizer.to_string(),
            payload: payload.clone(),
            transaction_id: transaction_id.to_string(),
        });
        self.check()?;
        Ok(CalendarItemId(format!("{}-{transaction_id}", self.backend)))
    }

    async fn update_invite(
        &self,
        organizer: &str,
        item_id: &CalendarItemId,
        payload: &InvitePayload,
    ) -> Result<()> {
        self.writes.lock().unwrap().push(RecordedWrite::Update {
            organizer: organizer.to_string(),
            item_id: item_id.clone(),
            payload: payload.clone(),
        });
        self.check()
    }

    async fn cancel_invite(
        &self,
        organizer: &str,
        item_id: &CalendarItemId,
        comment: &str,
    ) -> Result<()> {
        self.writes.lock().unwrap().push(RecordedWrite::Cancel {
            organizer: organizer.to_string(),
            item_id: item_id.clone(),
            comment: comment.to_string(),
        });
        self.check()
    }
}
