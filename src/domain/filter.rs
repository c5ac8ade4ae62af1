use std::collections::HashSet;

use crate::domain::ticket::Ticket;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    RaisedFor,
    ConcernedPerson,
}

impl FilterField {
    pub const ALL: [FilterField; 2] = [Self::RaisedFor, Self::ConcernedPerson];

    pub fn label(&self) -> &'static str {
        match self {
            Self::RaisedFor => "Raised For",
            Self::ConcernedPerson => "Concerned Person",
        }
    }

    pub fn value_of<'a>(&self, ticket: &'a Ticket) -> &'a str {
        match self {
            Self::RaisedFor => &ticket.raised_for,
            Self::ConcernedPerson => &ticket.concerned_person,
        }
    }
}

/// Selected value per field. `None` (or an empty value) means "All".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilter {
    pub raised_for: Option<String>,
    pub concerned_person: Option<String>,
}

impl TicketFilter {
    pub fn get(&self, field: FilterField) -> Option<&str> {
        let value = match field {
            FilterField::RaisedFor => self.raised_for.as_deref(),
            FilterField::ConcernedPerson => self.concerned_person.as_deref(),
        };
        value.map(str::trim).filter(|value| !value.is_empty())
    }

    pub fn set(&mut self, field: FilterField, value: Option<String>) {
        match field {
            FilterField::RaisedFor => self.raised_for = value,
            FilterField::ConcernedPerson => self.concerned_person = value,
        }
    }

    pub fn clear(&mut self) {
        self.raised_for = None;
        self.concerned_person = None;
    }

    pub fn is_empty(&self) -> bool {
        FilterField::ALL
            .iter()
            .all(|field| self.get(*field).is_none())
    }

    pub fn matches(&self, ticket: &Ticket) -> bool {
        FilterField::ALL.iter().all(|field| match self.get(*field) {
            Some(selected) => field.value_of(ticket).trim() == selected,
            None => true,
        })
    }
}

pub fn apply<'a, I>(tickets: I, filter: &TicketFilter) -> Vec<&'a Ticket>
where
    I: IntoIterator<Item = &'a Ticket>,
{
    tickets
        .into_iter()
        .filter(|ticket| filter.matches(ticket))
        .collect()
}

/// Choices offered for each filter field within a subset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub raised_for: Vec<String>,
    pub concerned_person: Vec<String>,
}

impl FilterOptions {
    pub fn get(&self, field: FilterField) -> &[String] {
        match field {
            FilterField::RaisedFor => &self.raised_for,
            FilterField::ConcernedPerson => &self.concerned_person,
        }
    }
}

pub fn options<'a, I>(tickets: I) -> FilterOptions
where
    I: IntoIterator<Item = &'a Ticket>,
{
    let tickets = tickets.into_iter().collect::<Vec<_>>();
    FilterOptions {
        raised_for: distinct_values(
            tickets
                .iter()
                .map(|ticket| FilterField::RaisedFor.value_of(ticket)),
        ),
        concerned_person: distinct_values(
            tickets
                .iter()
                .map(|ticket| FilterField::ConcernedPerson.value_of(ticket)),
        ),
    }
}

/// Trimmed, non-empty, de-duplicated values in first-seen order.
pub fn distinct_values<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}

/// Steps `All -> first -> ... -> last -> All`. A stale selection that is no
/// longer offered restarts at the first option.
pub fn cycle_option(options: &[String], current: Option<&str>) -> Option<String> {
    let next_index = match current {
        None => 0,
        Some(current) => match options.iter().position(|option| option == current) {
            Some(index) => index + 1,
            None => 0,
        },
    };
    options.get(next_index).cloned()
}

#[cfg(test)]
mod tests {
    use super::cycle_option;

    #[test]
    fn cycle_option_wraps_back_to_all() {
        let options = vec!["IT Support".to_string(), "HR".to_string()];
        assert_eq!(cycle_option(&options, None).as_deref(), Some("IT Support"));
        assert_eq!(
            cycle_option(&options, Some("IT Support")).as_deref(),
            Some("HR")
        );
        assert_eq!(cycle_option(&options, Some("HR")), None);
        assert_eq!(
            cycle_option(&options, Some("Gone")).as_deref(),
            Some("IT Support")
        );
        assert_eq!(cycle_option(&[], None), None);
    }
}
