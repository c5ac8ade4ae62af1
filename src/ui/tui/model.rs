use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tui_input::Input;

use crate::{
    app::{
        actions::{ActionKind, ResolveRequest},
        board::{Section, TicketBoard},
    },
    domain::{
        deadline::{DeadlineSelection, QUICK_PRESETS},
        filter::TicketFilter,
        ticket::{NewTicket, Ticket},
        toast::ToastQueue,
    },
    error::TicketResult,
    infra::attachment::encode_attachment,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RaiseField {
    #[default]
    RaisedFor,
    ConcernedPerson,
    Issue,
    Attachment,
}

impl RaiseField {
    pub const ALL: [RaiseField; 4] = [
        Self::RaisedFor,
        Self::ConcernedPerson,
        Self::Issue,
        Self::Attachment,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::RaisedFor => "Ticket Raised For",
            Self::ConcernedPerson => "Concerned / Resolving Person",
            Self::Issue => "Issue",
            Self::Attachment => "Attachment path (optional)",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::RaisedFor => 0,
            Self::ConcernedPerson => 1,
            Self::Issue => 2,
            Self::Attachment => 3,
        }
    }

    pub(crate) fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub(crate) fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub(crate) fn is_last(self) -> bool {
        self == Self::Attachment
    }
}

/// Draft kept across open/close of the raise dialog; cleared only after a
/// successful raise.
#[derive(Debug, Clone, Default)]
pub struct RaiseForm {
    inputs: [Input; 4],
    pub focus: RaiseField,
}

impl RaiseForm {
    pub fn input(&self, field: RaiseField) -> &Input {
        &self.inputs[field.index()]
    }

    pub fn input_mut(&mut self, field: RaiseField) -> &mut Input {
        &mut self.inputs[field.index()]
    }

    pub fn value(&self, field: RaiseField) -> &str {
        self.input(field).value()
    }

    pub fn set_value(&mut self, field: RaiseField, value: impl Into<String>) {
        *self.input_mut(field) = Input::new(value.into());
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn attachment_path(&self) -> Option<PathBuf> {
        let raw = self.value(RaiseField::Attachment).trim();
        (!raw.is_empty()).then(|| PathBuf::from(raw))
    }

    /// Encodes the attachment (size-checked) and collects the fields.
    pub fn to_new_ticket(&self, attachment_max_bytes: u64) -> TicketResult<NewTicket> {
        let attachment = self
            .attachment_path()
            .map(|path| encode_attachment(&path, attachment_max_bytes))
            .transpose()?;

        Ok(NewTicket {
            raised_for: self.value(RaiseField::RaisedFor).to_string(),
            concerned_person: self.value(RaiseField::ConcernedPerson).to_string(),
            issue: self.value(RaiseField::Issue).to_string(),
            attachment,
        })
    }
}

#[derive(Debug, Clone)]
pub struct DeadlineDialog {
    pub ticket_no: String,
    pub existing: Option<DateTime<Utc>>,
    pub selection: DeadlineSelection,
    pub manual: Input,
    pub editing_manual: bool,
}

impl DeadlineDialog {
    pub fn new(ticket: &Ticket) -> Self {
        Self {
            ticket_no: ticket.ticket_no.clone(),
            existing: ticket.deadline_at,
            selection: DeadlineSelection::default(),
            manual: Input::default(),
            editing_manual: false,
        }
    }

    /// Picking a preset wipes the manual field.
    pub fn pick_preset(&mut self, index: usize) -> bool {
        let Some(preset) = QUICK_PRESETS.get(index) else {
            return false;
        };
        self.selection.pick_quick(preset.minutes);
        self.manual = Input::default();
        self.editing_manual = false;
        true
    }

    pub fn sync_manual(&mut self) {
        self.selection.set_manual(self.manual.value());
    }
}

#[derive(Debug, Clone)]
pub enum Modal {
    Help,
    Raise,
    Deadline(DeadlineDialog),
    ConfirmResolve(ResolveRequest),
}

#[derive(Debug, Clone)]
pub struct BoardModel {
    pub active_section: Section,
    selected: [usize; 2],
    filters: [TicketFilter; 2],
    pub list_offset: usize,
    pub page_size: usize,
    pub toasts: ToastQueue,
    pub modal: Option<Modal>,
    pub raise_form: RaiseForm,
    pub status_line: String,
    pub failure_count: u64,
    pub last_success_at: Option<DateTime<Utc>>,
    pub busy: Option<ActionKind>,
    pub busy_since: Option<DateTime<Utc>>,
    pub queued_refresh: bool,
    pub esc_armed_until: Option<DateTime<Utc>>,
    pub attachment_max_bytes: u64,
}

impl BoardModel {
    pub fn new(toasts: ToastQueue, attachment_max_bytes: u64) -> Self {
        Self {
            active_section: Section::Live,
            selected: [0; 2],
            filters: [TicketFilter::default(), TicketFilter::default()],
            list_offset: 0,
            page_size: 1,
            toasts,
            modal: None,
            raise_form: RaiseForm::default(),
            status_line: "starting".to_string(),
            failure_count: 0,
            last_success_at: None,
            busy: None,
            busy_since: None,
            queued_refresh: false,
            esc_armed_until: None,
            attachment_max_bytes,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected[self.active_section.index()]
    }

    pub fn set_selected(&mut self, index: usize) {
        self.selected[self.active_section.index()] = index;
    }

    pub fn filter(&self) -> &TicketFilter {
        self.filter_for(self.active_section)
    }

    pub fn filter_mut(&mut self) -> &mut TicketFilter {
        &mut self.filters[self.active_section.index()]
    }

    pub fn filter_for(&self, section: Section) -> &TicketFilter {
        &self.filters[section.index()]
    }

    pub fn switch_section(&mut self) {
        self.active_section = self.active_section.toggle();
        self.list_offset = 0;
    }

    pub fn visible_tickets<'a>(&self, board: &'a TicketBoard) -> Vec<&'a Ticket> {
        board.visible(self.active_section, self.filter())
    }

    pub fn selected_ticket<'a>(&self, board: &'a TicketBoard) -> Option<&'a Ticket> {
        self.visible_tickets(board).get(self.selected()).copied()
    }

    pub fn clamp_selection(&mut self, visible_len: usize) {
        if visible_len == 0 {
            self.set_selected(0);
            self.list_offset = 0;
        } else if self.selected() >= visible_len {
            self.set_selected(visible_len - 1);
        }
    }

    pub(crate) fn page(&self) -> usize {
        self.page_size.max(1)
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }
}
