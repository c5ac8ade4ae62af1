use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    domain::time::{format_instant, from_local_input_value_in},
    error::{TicketError, TicketResult},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickPreset {
    pub label: &'static str,
    pub minutes: u32,
}

pub const QUICK_PRESETS: [QuickPreset; 5] = [
    QuickPreset {
        label: "10 mins",
        minutes: 10,
    },
    QuickPreset {
        label: "20 mins",
        minutes: 20,
    },
    QuickPreset {
        label: "30 mins",
        minutes: 30,
    },
    QuickPreset {
        label: "45 mins",
        minutes: 45,
    },
    QuickPreset {
        label: "1 hr",
        minutes: 60,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineMode {
    Quick,
    Manual,
}

/// The user's pending deadline choice. Quick preset and manual value are
/// mutually exclusive; whichever was set last wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeadlineSelection {
    quick_minutes: Option<u32>,
    manual: Option<String>,
}

impl DeadlineSelection {
    pub fn quick(minutes: u32) -> Self {
        let mut selection = Self::default();
        selection.pick_quick(minutes);
        selection
    }

    pub fn manual(value: impl Into<String>) -> Self {
        let mut selection = Self::default();
        selection.set_manual(value);
        selection
    }

    pub fn pick_quick(&mut self, minutes: u32) {
        self.quick_minutes = Some(minutes);
        self.manual = None;
    }

    /// Editing the manual value always drops the preset, even when the edit
    /// leaves the field empty.
    pub fn set_manual(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.quick_minutes = None;
        self.manual = (!value.trim().is_empty()).then_some(value);
    }

    pub fn clear(&mut self) {
        self.quick_minutes = None;
        self.manual = None;
    }

    pub fn quick_minutes(&self) -> Option<u32> {
        self.quick_minutes
    }

    pub fn manual_value(&self) -> Option<&str> {
        self.manual.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.quick_minutes.is_none() && self.manual.is_none()
    }
}

/// `SET_DEADLINE` payload. Exactly one of `minutes` / `deadline_at_iso` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineSubmission {
    pub ticket_no: String,
    pub mode: DeadlineMode,
    pub minutes: Option<u32>,
    #[serde(rename = "deadlineAtISO")]
    pub deadline_at_iso: Option<String>,
}

/// Wire payload plus the absolute instant it stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDeadline {
    pub submission: DeadlineSubmission,
    pub deadline_at: DateTime<Utc>,
}

pub fn normalize(
    ticket_no: &str,
    selection: &DeadlineSelection,
    submitted_at: DateTime<Utc>,
) -> TicketResult<NormalizedDeadline> {
    normalize_in(ticket_no, selection, submitted_at, &Local)
}

/// Turns a selection into a deadline anchored at `submitted_at`, the moment
/// the save action fires. Manual values are read as wall-clock time in `tz`.
pub fn normalize_in<Tz: TimeZone>(
    ticket_no: &str,
    selection: &DeadlineSelection,
    submitted_at: DateTime<Utc>,
    tz: &Tz,
) -> TicketResult<NormalizedDeadline> {
    let ticket_no = ticket_no.trim();
    if ticket_no.is_empty() {
        return Err(TicketError::validation("Ticket number is required"));
    }

    if let Some(minutes) = selection.quick_minutes() {
        if minutes == 0 {
            return Err(TicketError::validation(
                "Quick deadline must be at least 1 minute",
            ));
        }

        return Ok(NormalizedDeadline {
            submission: DeadlineSubmission {
                ticket_no: ticket_no.to_string(),
                mode: DeadlineMode::Quick,
                minutes: Some(minutes),
                deadline_at_iso: None,
            },
            deadline_at: submitted_at + Duration::minutes(i64::from(minutes)),
        });
    }

    if let Some(manual) = selection.manual_value() {
        let deadline_at = from_local_input_value_in(manual, tz)?;
        return Ok(NormalizedDeadline {
            submission: DeadlineSubmission {
                ticket_no: ticket_no.to_string(),
                mode: DeadlineMode::Manual,
                minutes: None,
                deadline_at_iso: Some(format_instant(deadline_at)),
            },
            deadline_at,
        });
    }

    Err(TicketError::validation(
        "Select a quick option or a custom date & time",
    ))
}
