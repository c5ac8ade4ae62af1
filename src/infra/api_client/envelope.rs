use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    domain::ticket::Ticket,
    error::{TicketError, TicketResult, NON_JSON_RESPONSE_MESSAGE},
};

const DEFAULT_REMOTE_ERROR: &str = "API error";

#[derive(Debug, Serialize)]
pub(super) struct ActionRequest<'a, D: ?Sized> {
    pub(super) action: &'a str,
    pub(super) data: &'a D,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct TicketListData {
    #[serde(default)]
    tickets: Option<Vec<Ticket>>,
}

/// Unwraps `{ok, data, error}`; returns `data` (`null` when absent).
pub fn decode_envelope(body: &str) -> TicketResult<Value> {
    let value: Value = serde_json::from_str(body.trim())
        .map_err(|_| TicketError::Protocol(NON_JSON_RESPONSE_MESSAGE.to_string()))?;

    let envelope: Envelope = serde_json::from_value(value)
        .map_err(|err| TicketError::Protocol(format!("malformed response envelope: {err}")))?;

    if !envelope.ok {
        return Err(TicketError::Remote(remote_error_message(
            envelope.error.as_ref(),
        )));
    }

    Ok(envelope.data.unwrap_or(Value::Null))
}

pub fn decode_ticket_list(data: Value) -> TicketResult<Vec<Ticket>> {
    if data.is_null() {
        return Ok(Vec::new());
    }

    let list: TicketListData = serde_json::from_value(data)
        .map_err(|err| TicketError::Protocol(format!("invalid ticket list: {err}")))?;
    Ok(list.tickets.unwrap_or_default())
}

fn remote_error_message(error: Option<&Value>) -> String {
    let message = match error {
        Some(Value::String(message)) => Some(message.as_str()),
        Some(Value::Object(fields)) => fields.get("message").and_then(Value::as_str),
        _ => None,
    };

    message
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .unwrap_or(DEFAULT_REMOTE_ERROR)
        .to_string()
}
