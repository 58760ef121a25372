#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, TimeZone};
use chrono_tz::Tz;
use traincast_domain::{Attendee, ExchangeConfig, InvitePayload, InviteVenue, RecurrenceDescriptor};
use traincast_infra::http::HttpClient;
use traincast_infra::integrations::graph::{GraphClient, StaticTokenProvider};
use traincast_infra::ExchangeInviteWriter;
use wiremock::MockServer;

pub const ORGANIZER: &str = "organizer@contoso.com";
pub const ACCESS_TOKEN: &str = "test-token";
pub const EWS_USER: &str = "svc-traincast";
pub const EWS_PASSWORD: &str = "hunter2";

/// Client with quick retries so throttling tests stay fast.
pub fn http_client(max_attempts: usize) -> HttpClient {
    HttpClient::builder()
        .max_attempts(max_attempts)
        .base_backoff(Duration::from_millis(5))
        .build()
        .expect("http client")
}

/// Graph client rooted at `{server}/v1.0` with a static bearer token.
pub fn graph_client(server: &MockServer) -> GraphClient {
    GraphClient::new(
        http_client(3),
        format!("{}/v1.0", server.uri()),
        Arc::new(StaticTokenProvider::new(ACCESS_TOKEN)),
    )
}

pub fn ews_writer(server: &MockServer) -> ExchangeInviteWriter {
    let config = ExchangeConfig {
        endpoint: format!("{}/EWS/Exchange.asmx", server.uri()),
        username: EWS_USER.into(),
        password: EWS_PASSWORD.into(),
        max_attempts: 1,
    };
    ExchangeInviteWriter::new(http_client(1), &config).expect("ews writer")
}

/// Two-day in-person training in Berlin time.
pub fn payload() -> InvitePayload {
    let tz: Tz = "Europe/Berlin".parse().expect("time zone");
    InvitePayload {
        subject: "Forklift certification".into(),
        body_html: "Bring safety boots".into(),
        attendees: vec![
            Attendee { display_name: "Ada".into(), address: "ada@contoso.com".into() },
            Attendee { display_name: "Grace".into(), address: "grace@contoso.com".into() },
        ],
        start: tz.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap(),
        end: tz.with_ymd_and_hms(2024, 3, 4, 12, 0, 0).unwrap(),
        recurrence: Some(RecurrenceDescriptor::daily(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(), 2)),
        venue: InviteVenue::Physical { location: "Warehouse 3".into() },
    }
}

/// Successful EWS response wrapping one item id.
pub fn ews_item_response(operation: &str, id: &str, change_key: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
  <s:Body>
    <m:{operation}Response xmlns:m="http://schemas.microsoft.com/exchange/services/2006/messages" xmlns:t="http://schemas.microsoft.com/exchange/services/2006/types">
      <m:ResponseMessages>
        <m:{operation}ResponseMessage ResponseClass="Success">
          <m:ResponseCode>NoError</m:ResponseCode>
          <m:Items><t:CalendarItem><t:ItemId Id="{id}" ChangeKey="{change_key}"/></t:CalendarItem></m:Items>
        </m:{operation}ResponseMessage>
      </m:ResponseMessages>
    </m:{operation}Response>
  </s:Body>
</s:Envelope>"#
    )
}

/// Successful EWS response without items (update, delete).
pub fn ews_empty_response(operation: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
  <s:Body>
    <m:{operation}Response xmlns:m="http://schemas.microsoft.com/exchange/services/2006/messages">
      <m:ResponseMessages>
        <m:{operation}ResponseMessage ResponseClass="Success">
          <m:ResponseCode>NoError</m:ResponseCode>
        </m:{operation}ResponseMessage>
      </m:ResponseMessages>
    </m:{operation}Response>
  </s:Body>
</s:Envelope>"#
    )
}

pub fn ews_error_response(operation: &str, code: &str, text: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
  <s:Body>
    <m:{operation}Response xmlns:m="http://schemas.microsoft.com/exchange/services/2006/messages">
      <m:ResponseMessages>
        <m:{operation}ResponseMessage ResponseClass="Error">
          <m:MessageText>{text}</m:MessageText>
          <m:ResponseCode>{code}</m:ResponseCode>
        </m:{operation}ResponseMessage>
      </m:ResponseMessages>
    </m:{operation}Response>
  </s:Body>
</s:Envelope>"#
    )
}
