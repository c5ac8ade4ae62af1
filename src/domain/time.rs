//! Conversions between absolute instants and the local representations the
//! board and CLI show or accept.
//!
//! Nothing here reads the wall clock: every function that needs "now" takes
//! it as an argument. Local-time helpers come in pairs, a `*_in` variant that
//! takes the zone explicitly and a plain variant bound to [`Local`].

use std::fmt::Display;

use chrono::{DateTime, Local, LocalResult, NaiveDateTime, SecondsFormat, TimeZone, Utc};

use crate::error::{TicketError, TicketResult};

/// `datetime-local` style value used for manual deadline entry.
pub const LOCAL_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

const LOCAL_INPUT_PARSE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

const ABSOLUTE_FORMAT: &str = "%d-%m-%y %I:%M %p";

pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|at| at.with_timezone(&Utc))
        .ok()
}

/// Canonical wire rendering, e.g. `2025-01-08T06:30:00.000Z`.
pub fn format_instant(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn format_absolute(at: Option<DateTime<Utc>>) -> String {
    format_absolute_in(at, &Local)
}

/// Renders `DD-MM-YY hh:mm AM/PM`; empty for an absent instant.
pub fn format_absolute_in<Tz>(at: Option<DateTime<Utc>>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.map(|at| at.with_timezone(tz).format(ABSOLUTE_FORMAT).to_string())
        .unwrap_or_default()
}

pub fn is_overdue(deadline: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    deadline.is_some_and(|deadline| now > deadline)
}

/// `HH:MM:SS` left until `deadline`, clamped at zero. Hours are not wrapped,
/// so a two-day deadline reads `48:00:00`.
pub fn remaining_text(deadline: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(deadline) = deadline else {
        return String::new();
    };

    let total_secs = (deadline - now).num_seconds().max(0);
    format!(
        "{:02}:{:02}:{:02}",
        total_secs / 3600,
        (total_secs % 3600) / 60,
        total_secs % 60
    )
}

pub fn to_local_input_value(at: Option<DateTime<Utc>>) -> String {
    to_local_input_value_in(at, &Local)
}

pub fn to_local_input_value_in<Tz>(at: Option<DateTime<Utc>>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.map(|at| at.with_timezone(tz).format(LOCAL_INPUT_FORMAT).to_string())
        .unwrap_or_default()
}

pub fn from_local_input_value(value: &str) -> TicketResult<DateTime<Utc>> {
    from_local_input_value_in(value, &Local)
}

/// Interprets a timezone-naive `YYYY-MM-DDTHH:mm` value in `tz`.
///
/// Ambiguous wall-clock times (DST fall-back) resolve to the earliest
/// instant; times skipped by a DST jump are rejected.
pub fn from_local_input_value_in<Tz: TimeZone>(
    value: &str,
    tz: &Tz,
) -> TicketResult<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TicketError::validation("Custom date & time is empty"));
    }

    let naive = LOCAL_INPUT_PARSE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| {
            TicketError::validation(format!(
                "invalid date & time '{trimmed}'; expected YYYY-MM-DDTHH:MM"
            ))
        })?;

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(at) => Ok(at.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(TicketError::validation(format!(
            "'{trimmed}' does not exist in the local timezone"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{format_instant, parse_instant};

    #[test]
    fn parse_instant_accepts_offsets_and_rejects_blank() {
        let at = parse_instant("2025-01-08T12:00:00+05:30").unwrap();
        assert_eq!(at, Utc.with_ymd_and_hms(2025, 1, 8, 6, 30, 0).unwrap());
        assert_eq!(parse_instant("   "), None);
        assert_eq!(parse_instant("08-01-25 12:00 PM"), None);
    }

    #[test]
    fn format_instant_uses_millisecond_zulu_form() {
        let at = Utc.with_ymd_and_hms(2025, 1, 8, 6, 30, 0).unwrap();
        assert_eq!(format_instant(at), "2025-01-08T06:30:00.000Z");
    }
}
