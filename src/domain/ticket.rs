use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    domain::time::{is_overdue, remaining_text},
    error::{TicketError, TicketResult},
};

const RESOLVED_STATUS: &str = "resolved";

/// A ticket as the remote sheet reports it.
///
/// Decoding is lenient: spreadsheet cells may come back as numbers, `null`
/// or empty strings, and an unparseable timestamp is treated as absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    #[serde(deserialize_with = "wire::text")]
    pub ticket_no: String,
    #[serde(default, deserialize_with = "wire::text")]
    pub raised_for: String,
    #[serde(default, deserialize_with = "wire::text")]
    pub concerned_person: String,
    #[serde(default, deserialize_with = "wire::text")]
    pub issue: String,
    #[serde(
        rename = "raisedOnISO",
        default,
        deserialize_with = "wire::instant",
        serialize_with = "wire::serialize_instant"
    )]
    pub raised_on: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "wire::optional_text")]
    pub raised_by: Option<String>,
    #[serde(
        rename = "deadlineAtISO",
        default,
        deserialize_with = "wire::instant",
        serialize_with = "wire::serialize_instant"
    )]
    pub deadline_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "wire::optional_text")]
    pub attachment_url: Option<String>,
    #[serde(default, deserialize_with = "wire::text")]
    pub status: String,
    #[serde(
        rename = "resolvedAtISO",
        default,
        deserialize_with = "wire::instant",
        serialize_with = "wire::serialize_instant"
    )]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "wire::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub raised_on_formatted: Option<String>,
    #[serde(
        default,
        deserialize_with = "wire::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub resolved_at_formatted: Option<String>,
}

impl Ticket {
    pub fn is_resolved(&self) -> bool {
        self.status.trim().eq_ignore_ascii_case(RESOLVED_STATUS)
    }

    pub fn has_deadline(&self) -> bool {
        self.deadline_at.is_some()
    }
}

/// Display state derived from `(status, deadline, now)`. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    Raised,
    Running,
    Overdue,
    Resolved,
}

impl ViewState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Raised => "raised",
            Self::Running => "running",
            Self::Overdue => "overdue",
            Self::Resolved => "resolved",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Raised => "Raised",
            Self::Running => "Running",
            Self::Overdue => "Overdue",
            Self::Resolved => "Resolved",
        }
    }

    pub fn can_set_deadline(&self) -> bool {
        !matches!(self, Self::Resolved)
    }

    /// Resolution is only offered once a deadline exists.
    pub fn can_mark_resolved(&self) -> bool {
        matches!(self, Self::Running | Self::Overdue)
    }
}

impl Display for ViewState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn resolve(ticket: &Ticket, now: DateTime<Utc>) -> ViewState {
    if ticket.is_resolved() {
        ViewState::Resolved
    } else if ticket.deadline_at.is_none() {
        ViewState::Raised
    } else if is_overdue(ticket.deadline_at, now) {
        ViewState::Overdue
    } else {
        ViewState::Running
    }
}

/// One ticket as rendered on a given tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketView<'a> {
    pub ticket: &'a Ticket,
    pub state: ViewState,
    pub remaining: String,
}

impl<'a> TicketView<'a> {
    pub fn new(ticket: &'a Ticket, now: DateTime<Utc>) -> Self {
        let state = resolve(ticket, now);
        let remaining = match state {
            ViewState::Running | ViewState::Overdue => remaining_text(ticket.deadline_at, now),
            ViewState::Raised | ViewState::Resolved => String::new(),
        };
        Self {
            ticket,
            state,
            remaining,
        }
    }
}

/// Image already encoded for transmission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub data_url: String,
}

/// Fields the user fills in to raise a ticket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTicket {
    pub raised_for: String,
    pub concerned_person: String,
    pub issue: String,
    pub attachment: Option<Attachment>,
}

impl NewTicket {
    /// Trims and checks the required fields, producing the wire request.
    pub fn to_request(&self) -> TicketResult<RaiseTicketRequest> {
        let raised_for = required(&self.raised_for, "Ticket Raised For required")?;
        let concerned_person = required(
            &self.concerned_person,
            "Concerned / Resolving Person required",
        )?;
        let issue = required(&self.issue, "Issue required")?;

        let (attachment_data_url, attachment_name) = match &self.attachment {
            Some(attachment) => (attachment.data_url.clone(), attachment.name.clone()),
            None => (String::new(), String::new()),
        };

        Ok(RaiseTicketRequest {
            raised_for,
            concerned_person,
            issue,
            attachment_data_url,
            attachment_name,
        })
    }
}

fn required(raw: &str, message: &str) -> TicketResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(TicketError::validation(message))
    } else {
        Ok(trimmed.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RaiseTicketRequest {
    pub raised_for: String,
    pub concerned_person: String,
    pub issue: String,
    pub attachment_data_url: String,
    pub attachment_name: String,
}

mod wire {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    use crate::domain::time::{format_instant, parse_instant};

    fn cell_to_string(value: Option<Value>) -> String {
        match value {
            Some(Value::String(raw)) => raw,
            Some(Value::Number(number)) => number.to_string(),
            Some(Value::Bool(flag)) => flag.to_string(),
            _ => String::new(),
        }
    }

    pub(super) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(cell_to_string(Option::<Value>::deserialize(deserializer)?))
    }

    pub(super) fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = cell_to_string(Option::<Value>::deserialize(deserializer)?);
        let trimmed = raw.trim();
        Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
    }

    pub(super) fn instant<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = cell_to_string(Option::<Value>::deserialize(deserializer)?);
        Ok(parse_instant(&raw))
    }

    pub(super) fn serialize_instant<S>(
        at: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match at {
            Some(at) => serializer.serialize_str(&format_instant(*at)),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{Ticket, TicketView, ViewState};

    #[test]
    fn lenient_decoding_handles_sheet_cells() {
        let ticket: Ticket = serde_json::from_value(serde_json::json!({
            "ticketNo": 1042,
            "raisedFor": " IT Support ",
            "concernedPerson": "Ravi",
            "issue": "Printer jammed",
            "raisedOnISO": "2025-01-08T06:30:00.000Z",
            "raisedBy": "",
            "deadlineAtISO": "",
            "attachmentUrl": null,
            "status": "Raised",
            "resolvedAtISO": "not a date"
        }))
        .unwrap();

        assert_eq!(ticket.ticket_no, "1042");
        assert_eq!(ticket.raised_for, " IT Support ");
        assert_eq!(
            ticket.raised_on,
            Some(Utc.with_ymd_and_hms(2025, 1, 8, 6, 30, 0).unwrap())
        );
        assert_eq!(ticket.raised_by, None);
        assert_eq!(ticket.deadline_at, None);
        assert_eq!(ticket.attachment_url, None);
        assert_eq!(ticket.resolved_at, None);
        assert!(!ticket.is_resolved());
    }

    #[test]
    fn resolved_marker_is_trimmed_and_case_insensitive() {
        let ticket: Ticket = serde_json::from_value(serde_json::json!({
            "ticketNo": "T-1",
            "status": "  RESOLVED "
        }))
        .unwrap();
        assert!(ticket.is_resolved());
    }

    #[test]
    fn serializes_instants_in_wire_form() {
        let ticket: Ticket = serde_json::from_value(serde_json::json!({
            "ticketNo": "T-1",
            "deadlineAtISO": "2025-01-08T12:00:00+05:30"
        }))
        .unwrap();

        let value = serde_json::to_value(&ticket).unwrap();
        assert_eq!(value["deadlineAtISO"], "2025-01-08T06:30:00.000Z");
        assert!(value["resolvedAtISO"].is_null());
        assert!(value.get("raisedOnFormatted").is_none());
    }

    #[test]
    fn countdown_text_is_empty_once_resolved() {
        let now = Utc.with_ymd_and_hms(2025, 1, 8, 9, 0, 0).unwrap();
        let ticket: Ticket = serde_json::from_value(serde_json::json!({
            "ticketNo": "T-1",
            "status": "Resolved",
            "deadlineAtISO": "2025-01-08T10:00:00Z",
            "resolvedAtISO": "2025-01-08T08:30:00Z"
        }))
        .unwrap();

        let view = TicketView::new(&ticket, now);
        assert_eq!(view.state, ViewState::Resolved);
        assert_eq!(view.remaining, "");
    }
}
