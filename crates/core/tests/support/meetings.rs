use std::sync::Mutex;

use async_trait::async_trait;
use traincast_core::invite::{MeetingIdentity, OnlineMeeting, OnlineMeetingRequest};
use traincast_core::OnlineMeetingService;
use traincast_domain::{Result, TraincastError};

pub const JOIN_URL: &str = "https://teams.microsoft.com/l/meetup-join/19%3ameeting_test";

/// Meeting service that hands out a fixed join link.
#[derive(Default)]
pub struct FixedMeetings {
    pub organizer_fails: bool,
    pub requests: Mutex<Vec<(String, OnlineMeetingRequest)>>,
}

impl FixedMeetings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for_organizer() -> Self {
        Self { organizer_fails: true, ..Self::default() }
    }

    pub fn identities(&self) -> Vec<String> {
        self.requests.lock().unwrap().iter().map(|(who, _)| who.clone()).collect()
    }
}

#[async_trait]
impl OnlineMeetingService for FixedMeetings {
    async fn create_online_meeting(
        &self,
        identity: MeetingIdentity<'_>,
        request: &OnlineMeetingRequest,
    ) -> Result<OnlineMeeting> {
        let who = match identity {
            MeetingIdentity::Organizer(id) => id.to_string(),
            MeetingIdentity::Current => "me".to_string(),
        };
        self.requests.lock().unwrap().push((who, request.clone()));

        if self.organizer_fails && matches!(identity, MeetingIdentity::Organizer(_)) {
            return Err(TraincastError::Auth("application access policy missing".into()));
        }

        Ok(OnlineMeeting {
            join_web_url: None,
            join_information: Some(format!(
                "data:text/html,{}",
                urlencode(&format!("<a href=\"{JOIN_URL}\">Join Microsoft Teams Meeting</a>"))
            )),
        })
    }
}

fn urlencode(raw: &str) -> String {
    raw.bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                (b as char).to_string()
            }
            other => format!("%{other:02X}"),
        })
        .collect()
}
