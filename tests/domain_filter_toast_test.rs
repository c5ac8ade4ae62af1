use chrono::{Duration, TimeZone, Utc};
use serde_json::json;

use ticket_desk::domain::{
    filter::{apply, options, FilterField, TicketFilter},
    ticket::Ticket,
    toast::{ToastKind, ToastQueue},
};

fn ticket(no: &str, raised_for: &str, concerned_person: &str) -> Ticket {
    serde_json::from_value(json!({
        "ticketNo": no,
        "raisedFor": raised_for,
        "concernedPerson": concerned_person,
        "issue": "issue",
        "status": "Open",
    }))
    .unwrap()
}

fn tickets() -> Vec<Ticket> {
    vec![
        ticket("T-1", "Payroll", "Asha"),
        ticket("T-2", "Stores ", "Ravi"),
        ticket("T-3", "Payroll", "Ravi"),
        ticket("T-4", "Legal", ""),
    ]
}

#[test]
fn filters_combine_with_and_and_compare_trimmed_values() {
    let tickets = tickets();
    let mut filter = TicketFilter::default();

    filter.set(FilterField::RaisedFor, Some("Payroll".to_string()));
    let numbers = |filter: &TicketFilter| {
        apply(&tickets, filter)
            .into_iter()
            .map(|ticket| ticket.ticket_no.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(numbers(&filter), vec!["T-1", "T-3"]);

    filter.set(FilterField::ConcernedPerson, Some(" Ravi ".to_string()));
    assert_eq!(numbers(&filter), vec!["T-3"]);

    filter.set(FilterField::RaisedFor, Some("Stores".to_string()));
    assert_eq!(numbers(&filter), vec!["T-2"]);
}

#[test]
fn clearing_filters_restores_full_section() {
    let tickets = tickets();
    let mut filter = TicketFilter::default();
    filter.set(FilterField::RaisedFor, Some("Legal".to_string()));
    filter.clear();

    assert!(filter.is_empty());
    assert_eq!(apply(&tickets, &filter).len(), tickets.len());
}

#[test]
fn blank_filter_value_means_all() {
    let mut filter = TicketFilter::default();
    filter.set(FilterField::RaisedFor, Some("   ".to_string()));
    assert_eq!(filter.get(FilterField::RaisedFor), None);
}

#[test]
fn options_are_distinct_non_empty_in_first_seen_order() {
    let tickets = tickets();
    let options = options(&tickets);

    assert_eq!(
        options.get(FilterField::RaisedFor),
        ["Payroll", "Stores", "Legal"]
    );
    assert_eq!(options.get(FilterField::ConcernedPerson), ["Asha", "Ravi"]);
}

#[test]
fn toast_queue_keeps_newest_within_limit() {
    let now = Utc.with_ymd_and_hms(2025, 1, 8, 12, 0, 0).unwrap();
    let mut toasts = ToastQueue::default();

    for index in 0..6 {
        toasts.info(format!("toast {index}"), "", now);
    }

    let titles = toasts
        .iter()
        .map(|toast| toast.title.clone())
        .collect::<Vec<_>>();
    assert_eq!(titles, vec!["toast 5", "toast 4", "toast 3", "toast 2"]);
}

#[test]
fn toasts_expire_after_ttl() {
    let now = Utc.with_ymd_and_hms(2025, 1, 8, 12, 0, 0).unwrap();
    let mut toasts = ToastQueue::new(4, Duration::milliseconds(3200));
    toasts.success("Ticket Raised", "", now);
    toasts.error("Resolve failed", "boom", now + Duration::seconds(2));

    assert!(!toasts.expire(now + Duration::milliseconds(3199)));
    assert_eq!(toasts.len(), 2);

    assert!(toasts.expire(now + Duration::milliseconds(3200)));
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts.latest().unwrap().kind, ToastKind::Error);

    let id = toasts.latest().unwrap().id;
    assert!(toasts.dismiss(id));
    assert!(toasts.is_empty());
}

#[test]
fn huge_ttl_saturates_instead_of_overflowing() {
    let now = Utc.with_ymd_and_hms(2025, 1, 8, 12, 0, 0).unwrap();
    let mut toasts = ToastQueue::new(4, Duration::MAX);

    toasts.info("x", "", now);

    assert_eq!(toasts.latest().unwrap().expires_at, chrono::DateTime::<Utc>::MAX_UTC);
    assert!(!toasts.expire(now));
}
