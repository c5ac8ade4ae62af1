use chrono::{DateTime, Utc};

use crate::domain::{
    filter::{self, FilterOptions, TicketFilter},
    ticket::{Ticket, TicketView},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Live,
    Resolved,
}

impl Section {
    pub fn of(ticket: &Ticket) -> Self {
        if ticket.is_resolved() {
            Self::Resolved
        } else {
            Self::Live
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Live => "Live Tickets",
            Self::Resolved => "Resolved Tickets",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Live => Self::Resolved,
            Self::Resolved => Self::Live,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::Live => 0,
            Self::Resolved => 1,
        }
    }
}

/// Live and resolved subsets, each in collection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition<'a> {
    pub live: Vec<&'a Ticket>,
    pub resolved: Vec<&'a Ticket>,
}

impl<'a> Partition<'a> {
    pub fn section(&self, section: Section) -> &[&'a Ticket] {
        match section {
            Section::Live => &self.live,
            Section::Resolved => &self.resolved,
        }
    }

    pub fn total(&self) -> usize {
        self.live.len() + self.resolved.len()
    }
}

/// Cached copy of the remote collection. It is only ever replaced whole.
#[derive(Debug, Clone, Default)]
pub struct TicketBoard {
    tickets: Vec<Ticket>,
    last_refreshed_at: Option<DateTime<Utc>>,
}

impl TicketBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_all(&mut self, tickets: Vec<Ticket>, refreshed_at: DateTime<Utc>) {
        self.tickets = tickets;
        self.last_refreshed_at = Some(refreshed_at);
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    pub fn last_refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.last_refreshed_at
    }

    pub fn find(&self, ticket_no: &str) -> Option<&Ticket> {
        let ticket_no = ticket_no.trim();
        self.tickets
            .iter()
            .find(|ticket| ticket.ticket_no.trim() == ticket_no)
    }

    pub fn partition(&self) -> Partition<'_> {
        let (resolved, live) = self
            .tickets
            .iter()
            .partition::<Vec<_>, _>(|ticket| ticket.is_resolved());
        Partition { live, resolved }
    }

    pub fn section(&self, section: Section) -> Vec<&Ticket> {
        self.tickets
            .iter()
            .filter(|ticket| Section::of(ticket) == section)
            .collect()
    }

    /// Section subset narrowed by `filter`, in collection order.
    pub fn visible(&self, section: Section, filter: &TicketFilter) -> Vec<&Ticket> {
        filter::apply(self.section(section), filter)
    }

    pub fn filter_options(&self, section: Section) -> FilterOptions {
        filter::options(self.section(section))
    }

    pub fn views(&self, now: DateTime<Utc>) -> Vec<TicketView<'_>> {
        self.tickets
            .iter()
            .map(|ticket| TicketView::new(ticket, now))
            .collect()
    }
}
