//! Meeting body composition
//!
//! Each modality owns its body layout and the single venue field it
//! populates, so create and update share one code path.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};
use traincast_domain::{EventEntity, EventModality, InviteVenue, Result, TraincastError};
use url::Url;

use super::ports::{MeetingIdentity, OnlineMeeting, OnlineMeetingRequest, OnlineMeetingService};

/// Marker some meeting services wrap join information in.
const JOIN_INFO_DATA_PREFIX: &str = "data:text/html,";

static HREF_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"href\s*=\s*["']([^"']+)["']"#).expect("valid href regex"));

/// Which lifecycle action the body is composed for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFlow {
    Create,
    Update,
}

/// Invite body and the venue field chosen by modality
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedBody {
    pub body_html: String,
    pub venue: InviteVenue,
}

/// Build the invite body for `event`.
///
/// Online events create a fresh meeting resource. On update the meeting is
/// created as the organizer first and as the current identity if that fails.
pub async fn compose(
    meetings: &dyn OnlineMeetingService,
    event: &EventEntity,
    flow: BodyFlow,
    organizer: &str,
    window: (DateTime<Utc>, DateTime<Utc>),
) -> Result<ComposedBody> {
    let description = escape_description(&event.description);

    match event.modality {
        EventModality::InPerson => {
            let location = required_field(event.venue.as_deref(), "venue", &event.event_id)?;
            Ok(ComposedBody {
                body_html: description,
                venue: InviteVenue::Physical { location: location.to_string() },
            })
        }
        EventModality::LiveEvent => {
            let link = required_field(event.meeting_link.as_deref(), "meeting link", &event.event_id)?;
            let url = validate_link(link).map_err(|reason| {
                TraincastError::InvalidInput(format!(
                    "event {} has an invalid meeting link: {reason}",
                    event.event_id
                ))
            })?;
            Ok(ComposedBody {
                body_html: append_link(&description, &url),
                venue: InviteVenue::LiveStream { url },
            })
        }
        EventModality::OnlineMeeting => {
            let request = OnlineMeetingRequest {
                subject: event.title.clone(),
                start: window.0,
                end: window.1,
            };
            let meeting = create_meeting(meetings, flow, organizer, &request).await?;
            let join_url = extract_join_url(&meeting)?;
            debug!(event_id = %event.event_id, "online meeting created");
            Ok(ComposedBody {
                body_html: append_link(&description, &join_url),
                venue: InviteVenue::OnlineMeeting { join_url },
            })
        }
    }
}

async fn create_meeting(
    meetings: &dyn OnlineMeetingService,
    flow: BodyFlow,
    organizer: &str,
    request: &OnlineMeetingRequest,
) -> Result<OnlineMeeting> {
    match flow {
        BodyFlow::Create => meetings
            .create_online_meeting(MeetingIdentity::Current, request)
            .await
            .map_err(|err| err.context("creating online meeting")),
        BodyFlow::Update => {
            match meetings
                .create_online_meeting(MeetingIdentity::Organizer(organizer), request)
                .await
            {
                Ok(meeting) => Ok(meeting),
                Err(err) => {
                    warn!(
                        organizer,
                        error = %err,
                        "online meeting as organizer failed, retrying as current identity"
                    );
                    meetings
                        .create_online_meeting(MeetingIdentity::Current, request)
                        .await
                        .map_err(|err| err.context("creating online meeting"))
                }
            }
        }
    }
}

/// Pull a validated join URL out of a meeting response.
///
/// `joinWebUrl` wins. Otherwise the join-information fragment is unwrapped
/// and the first `https` anchor is used. Percent-decoding applies only to
/// fragments behind the `data:text/html,` marker.
pub fn extract_join_url(meeting: &OnlineMeeting) -> Result<String> {
    if let Some(url) = meeting.join_web_url.as_deref().filter(|u| !u.trim().is_empty()) {
        if let Ok(valid) = validate_link(url) {
            return Ok(valid);
        }
        warn!("joinWebUrl is not a usable link, falling back to join information");
    }

    let content = meeting
        .join_information
        .as_deref()
        .ok_or_else(|| TraincastError::External("online meeting has no join information".into()))?;
    // Only the data URL form is percent-encoded; raw HTML already carries the final href.
    let decoded: Cow<'_, str> = match content.strip_prefix(JOIN_INFO_DATA_PREFIX) {
        Some(encoded) => urlencoding::decode(encoded).map_err(|err| {
            TraincastError::External(format!("join information is not valid URL encoding: {err}"))
        })?,
        None => Cow::Borrowed(content),
    };

    HREF_PATTERN
        .captures_iter(&decoded)
        .filter_map(|caps| caps.get(1))
        .map(|m| html_escape::decode_html_entities(m.as_str()).into_owned())
        .find_map(|candidate| validate_link(&candidate).ok().filter(|u| u.starts_with("https://")))
        .ok_or_else(|| {
            TraincastError::External("join information contains no https join link".into())
        })
}

fn escape_description(description: &str) -> String {
    html_escape::encode_text(description.trim()).replace("\r\n", "\n").replace('\n', "<br/>")
}

fn append_link(body: &str, url: &str) -> String {
    let href = html_escape::encode_double_quoted_attribute(url);
    let text = html_escape::encode_text(url);
    if body.is_empty() {
        format!("<a href=\"{href}\">{text}</a>")
    } else {
        format!("{body}<br/><br/><a href=\"{href}\">{text}</a>")
    }
}

fn required_field<'a>(value: Option<&'a str>, field: &str, event_id: &str) -> Result<&'a str> {
    value.map(str::trim).filter(|v| !v.is_empty()).ok_or_else(|| {
        TraincastError::InvalidInput(format!("event {event_id} requires a {field}"))
    })
}

fn validate_link(raw: &str) -> std::result::Result<String, String> {
    let url = Url::parse(raw.trim()).map_err(|err| err.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(url.to_string()),
        other => Err(format!("unsupported scheme {other}")),
    }
}
