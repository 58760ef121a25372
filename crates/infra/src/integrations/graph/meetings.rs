//! Teams online meetings via Graph

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use traincast_core::invite::{MeetingIdentity, OnlineMeeting, OnlineMeetingRequest};
use traincast_core::OnlineMeetingService;
use traincast_domain::Result;

use super::{encode_segment, GraphClient};
use crate::http::RetryPolicy;

/// Creates Teams meetings for invites.
///
/// The current identity is the token's signed-in user (`/me`) unless a
/// meeting account is set. App-only tokens need one.
#[derive(Clone)]
pub struct GraphOnlineMeetings {
    client: GraphClient,
    meeting_account: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateMeetingBody<'a> {
    subject: &'a str,
    start_date_time: String,
    end_date_time: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MeetingResponse {
    join_web_url: Option<String>,
    join_information: Option<JoinInformation>,
}

#[derive(Deserialize)]
struct JoinInformation {
    content: Option<String>,
}

impl GraphOnlineMeetings {
    pub fn new(client: GraphClient) -> Self {
        Self { client, meeting_account: None }
    }

    /// Host meetings for the current identity in `account`'s mailbox.
    pub fn with_meeting_account(mut self, account: impl Into<String>) -> Self {
        let account = account.into().trim().to_string();
        self.meeting_account = Some(account).filter(|a| !a.is_empty());
        self
    }

    fn meetings_path(&self, identity: MeetingIdentity<'_>) -> String {
        let user = match identity {
            MeetingIdentity::Organizer(organizer) => Some(organizer),
            MeetingIdentity::Current => self.meeting_account.as_deref(),
        };
        match user {
            Some(user) => format!("/users/{}/onlineMeetings", encode_segment(user)),
            None => "/me/onlineMeetings".to_string(),
        }
    }
}

#[async_trait]
impl OnlineMeetingService for GraphOnlineMeetings {
    async fn create_online_meeting(
        &self,
        identity: MeetingIdentity<'_>,
        request: &OnlineMeetingRequest,
    ) -> Result<OnlineMeeting> {
        let body = CreateMeetingBody {
            subject: &request.subject,
            start_date_time: request.start.to_rfc3339(),
            end_date_time: request.end.to_rfc3339(),
        };

        let path = self.meetings_path(identity);
        let builder = self.client.request(Method::POST, &path).await?.json(&body);
        // Each replay would create another meeting resource.
        let response: MeetingResponse =
            self.client.send_json_with(builder, RetryPolicy::ThrottlingOnly).await?;

        Ok(OnlineMeeting {
            join_web_url: response.join_web_url,
            join_information: response.join_information.and_then(|info| info.content),
        })
    }
}
