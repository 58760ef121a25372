//! EWS SOAP request bodies and response parsing

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use traincast_domain::{InvitePayload, Result, TraincastError};

use super::time_zones::windows_zone_id;
use crate::errors::InfraError;

pub const SEND_TO_ALL: &str = "SendToAllAndSaveCopy";
const SOAP_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
const TYPES_NS: &str = "http://schemas.microsoft.com/exchange/services/2006/types";
const MESSAGES_NS: &str = "http://schemas.microsoft.com/exchange/services/2006/messages";
const SERVER_VERSION: &str = "Exchange2013";

/// Reference to an item in the impersonated mailbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRef {
    pub id: String,
    pub change_key: Option<String>,
}

/// Full SOAP envelope impersonating `mailbox`.
pub fn envelope(mailbox: &str, body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="{SOAP_NS}" xmlns:t="{TYPES_NS}" xmlns:m="{MESSAGES_NS}">
  <soap:Header>
    <t:RequestServerVersion Version="{SERVER_VERSION}"/>
    <t:ExchangeImpersonation>
      <t:ConnectingSID>
        <t:SmtpAddress>{}</t:SmtpAddress>
      </t:ConnectingSID>
    </t:ExchangeImpersonation>
  </soap:Header>
  <soap:Body>
{body}
  </soap:Body>
</soap:Envelope>"#,
        text(mailbox)
    )
}

fn utc(value: &DateTime<Tz>) -> String {
    value.with_timezone(&Utc).format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

fn subject_element(payload: &InvitePayload) -> String {
    format!("<t:Subject>{}</t:Subject>", text(&payload.subject))
}

fn body_element(payload: &InvitePayload) -> String {
    format!(r#"<t:Body BodyType="HTML">{}</t:Body>"#, text(&payload.body_html))
}

fn start_element(payload: &InvitePayload) -> String {
    format!("<t:Start>{}</t:Start>", utc(&payload.start))
}

fn end_element(payload: &InvitePayload) -> String {
    format!("<t:End>{}</t:End>", utc(&payload.end))
}

fn location_element(payload: &InvitePayload) -> Option<String> {
    payload.venue.location().map(|location| format!("<t:Location>{}</t:Location>", text(location)))
}

fn attendees_element(payload: &InvitePayload) -> Option<String> {
    if payload.attendees.is_empty() {
        return None;
    }
    let mut xml = String::from("<t:RequiredAttendees>");
    for attendee in &payload.attendees {
        let _ = write!(
            xml,
            "<t:Attendee><t:Mailbox><t:Name>{}</t:Name><t:EmailAddress>{}</t:EmailAddress></t:Mailbox></t:Attendee>",
            text(&attendee.display_name),
            text(&attendee.address)
        );
    }
    xml.push_str("</t:RequiredAttendees>");
    Some(xml)
}

/// Windows id of the zone the payload's times are expressed in.
fn windows_zone(payload: &InvitePayload) -> Result<&'static str> {
    let tz = payload.start.timezone();
    windows_zone_id(tz).ok_or_else(|| {
        TraincastError::Config(format!("no Exchange time zone id for {}", tz.name()))
    })
}

fn start_zone_element(zone: &str) -> String {
    format!(r#"<t:StartTimeZone Id="{}"/>"#, attr(zone))
}

fn end_zone_element(zone: &str) -> String {
    format!(r#"<t:EndTimeZone Id="{}"/>"#, attr(zone))
}

fn recurrence_element(payload: &InvitePayload) -> Option<String> {
    payload.recurrence.map(|rule| {
        format!(
            "<t:Recurrence><t:DailyRecurrence><t:Interval>{}</t:Interval></t:DailyRecurrence>\
             <t:NumberedRecurrence><t:StartDate>{}</t:StartDate><t:NumberOfOccurrences>{}</t:NumberOfOccurrences></t:NumberedRecurrence></t:Recurrence>",
            rule.interval_days,
            rule.start_date.format("%Y-%m-%d"),
            rule.occurrences
        )
    })
}

/// `CreateItem` for a meeting request sent to every attendee.
///
/// Instants travel as UTC; the start and end zones pin the series to the
/// configured wall clock so recurrences follow its DST rules.
pub fn create_item(payload: &InvitePayload) -> Result<String> {
    let zone = windows_zone(payload)?;
    // CalendarItemType is a sequence; element order matters.
    let mut item = String::new();
    item.push_str(&subject_element(payload));
    item.push_str(&body_element(payload));
    item.push_str(&start_element(payload));
    item.push_str(&end_element(payload));
    if let Some(location) = location_element(payload) {
        item.push_str(&location);
    }
    if let Some(attendees) = attendees_element(payload) {
        item.push_str(&attendees);
    }
    if let Some(recurrence) = recurrence_element(payload) {
        item.push_str(&recurrence);
    }
    item.push_str(&start_zone_element(zone));
    item.push_str(&end_zone_element(zone));

    Ok(format!(
        r#"<m:CreateItem SendMeetingInvitations="{SEND_TO_ALL}"><m:SavedItemFolderId><t:DistinguishedFolderId Id="calendar"/></m:SavedItemFolderId><m:Items><t:CalendarItem>{item}</t:CalendarItem></m:Items></m:CreateItem>"#
    ))
}

/// `GetItem` returning only the id and current change key.
pub fn get_item(item_id: &str) -> String {
    format!(
        r#"<m:GetItem><m:ItemShape><t:BaseShape>IdOnly</t:BaseShape></m:ItemShape><m:ItemIds><t:ItemId Id="{}"/></m:ItemIds></m:GetItem>"#,
        attr(item_id)
    )
}

fn set_field(uri: &str, element: &str) -> String {
    format!(
        r#"<t:SetItemField><t:FieldURI FieldURI="{uri}"/><t:CalendarItem>{element}</t:CalendarItem></t:SetItemField>"#
    )
}

fn delete_field(uri: &str) -> String {
    format!(r#"<t:DeleteItemField><t:FieldURI FieldURI="{uri}"/></t:DeleteItemField>"#)
}

/// `UpdateItem` overwriting every invite field; absent optional fields are
/// deleted so stale values do not linger.
pub fn update_item(item: &ItemRef, payload: &InvitePayload) -> Result<String> {
    let zone = windows_zone(payload)?;
    let mut updates = String::new();
    updates.push_str(&set_field("item:Subject", &subject_element(payload)));
    updates.push_str(&set_field("item:Body", &body_element(payload)));
    updates.push_str(&set_field("calendar:StartTimeZone", &start_zone_element(zone)));
    updates.push_str(&set_field("calendar:EndTimeZone", &end_zone_element(zone)));
    updates.push_str(&set_field("calendar:Start", &start_element(payload)));
    updates.push_str(&set_field("calendar:End", &end_element(payload)));
    updates.push_str(&match location_element(payload) {
        Some(location) => set_field("calendar:Location", &location),
        None => delete_field("calendar:Location"),
    });
    updates.push_str(&match attendees_element(payload) {
        Some(attendees) => set_field("calendar:RequiredAttendees", &attendees),
        None => delete_field("calendar:RequiredAttendees"),
    });
    updates.push_str(&match recurrence_element(payload) {
        Some(recurrence) => set_field("calendar:Recurrence", &recurrence),
        None => delete_field("calendar:Recurrence"),
    });

    let change_key = item
        .change_key
        .as_deref()
        .map(|key| format!(r#" ChangeKey="{}""#, attr(key)))
        .unwrap_or_default();

    Ok(format!(
        r#"<m:UpdateItem ConflictResolution="AlwaysOverwrite" SendMeetingInvitationsOrCancellations="{SEND_TO_ALL}"><m:ItemChanges><t:ItemChange><t:ItemId Id="{}"{change_key}/><t:Updates>{updates}</t:Updates></t:ItemChange></m:ItemChanges></m:UpdateItem>"#,
        attr(&item.id)
    ))
}

/// `DeleteItem` moving the meeting to Deleted Items and notifying attendees.
pub fn delete_item(item_id: &str) -> String {
    format!(
        r#"<m:DeleteItem DeleteType="MoveToDeletedItems" SendMeetingCancellations="{SEND_TO_ALL}"><m:ItemIds><t:ItemId Id="{}"/></m:ItemIds></m:DeleteItem>"#,
        attr(item_id)
    )
}

fn fault_error(doc: &roxmltree::Document<'_>) -> Option<TraincastError> {
    let fault = doc.descendants().find(|n| n.tag_name().name() == "Fault")?;
    let reason = fault
        .descendants()
        .find(|n| n.tag_name().name() == "faultstring")
        .and_then(|n| n.text())
        .unwrap_or("unknown fault");
    let code =
        fault.descendants().find(|n| n.tag_name().name() == "ResponseCode").and_then(|n| n.text());
    Some(TraincastError::External(match code {
        Some(code) => format!("EWS fault {code}: {}", reason.trim()),
        None => format!("EWS fault: {}", reason.trim()),
    }))
}

/// The SOAP fault carried by `xml`, if it is one.
pub fn parse_fault(xml: &str) -> Option<TraincastError> {
    roxmltree::Document::parse(xml).ok().and_then(|doc| fault_error(&doc))
}

/// Parse an EWS response, failing on SOAP faults and error response classes.
///
/// Returns the first item reference in the response, if any.
pub fn parse_response(xml: &str) -> Result<Option<ItemRef>> {
    let doc = roxmltree::Document::parse(xml).map_err(InfraError::from)?;
    if let Some(fault) = fault_error(&doc) {
        return Err(fault);
    }
    let root = doc.root_element();

    let message = root
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name().ends_with("ResponseMessage"))
        .ok_or_else(|| TraincastError::External("EWS response carried no response message".into()))?;

    if message.attribute("ResponseClass") == Some("Error") {
        let child_text = |name: &str| {
            message
                .descendants()
                .find(|n| n.tag_name().name() == name)
                .and_then(|n| n.text())
                .map(str::trim)
        };
        let code = child_text("ResponseCode").unwrap_or("ErrorUnknown");
        let detail = child_text("MessageText").unwrap_or("no message text");
        return Err(TraincastError::External(format!("EWS {code}: {detail}")));
    }

    Ok(message.descendants().find(|n| n.tag_name().name() == "ItemId").and_then(|n| {
        n.attribute("Id").map(|id| ItemRef {
            id: id.to_string(),
            change_key: n.attribute("ChangeKey").map(str::to_string),
        })
    }))
}
