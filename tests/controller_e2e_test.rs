use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use ticket_desk::{
    app::{
        actions::{RefreshOutcome, ResolveRequest},
        board::Section,
        controller::TicketListController,
    },
    domain::{
        deadline::{DeadlineMode, DeadlineSelection, DeadlineSubmission},
        ticket::{resolve, NewTicket, RaiseTicketRequest, Ticket, ViewState},
        time::{format_instant, to_local_input_value},
    },
    error::{TicketError, TicketResult},
    ports::{ClockPort, TicketApiPort},
};

#[derive(Clone)]
struct MutableClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl MutableClock {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl ClockPort for MutableClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// In-memory stand-in for the remote sheet. Records every call.
#[derive(Clone)]
struct FakeApi {
    clock: MutableClock,
    tickets: Arc<Mutex<Vec<Ticket>>>,
    calls: Arc<Mutex<Vec<String>>>,
    deadlines: Arc<Mutex<Vec<DeadlineSubmission>>>,
    fail_next_list: Arc<Mutex<Option<TicketError>>>,
    reject_next_mutation: Arc<Mutex<Option<TicketError>>>,
}

impl FakeApi {
    fn new(clock: MutableClock) -> Self {
        Self {
            clock,
            tickets: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            deadlines: Arc::new(Mutex::new(Vec::new())),
            fail_next_list: Arc::new(Mutex::new(None)),
            reject_next_mutation: Arc::new(Mutex::new(None)),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) -> TicketResult<()> {
        self.calls.lock().unwrap().push(call.into());
        match self.reject_next_mutation.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn with_ticket(&self, ticket_no: &str, update: impl FnOnce(&mut Ticket)) {
        let mut tickets = self.tickets.lock().unwrap();
        if let Some(ticket) = tickets.iter_mut().find(|t| t.ticket_no == ticket_no) {
            update(ticket);
        }
    }
}

#[async_trait]
impl TicketApiPort for FakeApi {
    async fn list_tickets(&self) -> TicketResult<Vec<Ticket>> {
        self.calls.lock().unwrap().push("list".to_string());
        if let Some(err) = self.fail_next_list.lock().unwrap().take() {
            return Err(err);
        }
        Ok(self.tickets.lock().unwrap().clone())
    }

    async fn raise_ticket(&self, request: &RaiseTicketRequest) -> TicketResult<()> {
        self.record("raise")?;
        let mut tickets = self.tickets.lock().unwrap();
        let ticket_no = format!("T-{}", tickets.len() + 1);
        tickets.push(Ticket {
            ticket_no,
            raised_for: request.raised_for.clone(),
            concerned_person: request.concerned_person.clone(),
            issue: request.issue.clone(),
            raised_on: Some(self.clock.now()),
            raised_by: None,
            deadline_at: None,
            attachment_url: None,
            status: "Raised".to_string(),
            resolved_at: None,
            raised_on_formatted: None,
            resolved_at_formatted: None,
        });
        Ok(())
    }

    async fn set_deadline(&self, submission: &DeadlineSubmission) -> TicketResult<()> {
        self.record(format!("set_deadline:{}", submission.ticket_no))?;
        self.deadlines.lock().unwrap().push(submission.clone());
        let deadline_at = match submission.mode {
            DeadlineMode::Quick => {
                self.clock.now() + Duration::minutes(i64::from(submission.minutes.unwrap_or(0)))
            }
            DeadlineMode::Manual => submission
                .deadline_at_iso
                .as_deref()
                .and_then(ticket_desk::domain::time::parse_instant)
                .ok_or_else(|| TicketError::Remote("bad deadline".to_string()))?,
        };
        self.with_ticket(&submission.ticket_no, |ticket| {
            ticket.deadline_at = Some(deadline_at);
            ticket.status = "Running".to_string();
        });
        Ok(())
    }

    async fn mark_resolved(&self, ticket_no: &str) -> TicketResult<()> {
        self.record(format!("mark_resolved:{ticket_no}"))?;
        let now = self.clock.now();
        self.with_ticket(ticket_no, |ticket| {
            ticket.status = "Resolved".to_string();
            ticket.resolved_at = Some(now);
        });
        Ok(())
    }
}

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 8, 9, 0, 0).unwrap()
}

fn new_ticket() -> NewTicket {
    NewTicket {
        raised_for: "Payroll".to_string(),
        concerned_person: "Asha".to_string(),
        issue: "Printer jammed".to_string(),
        attachment: None,
    }
}

#[tokio::test]
async fn ticket_moves_from_raised_to_overdue_to_resolved() {
    let clock = MutableClock::new(start());
    let api = FakeApi::new(clock.clone());
    let mut controller = TicketListController::new(&api, &clock);

    let outcome = controller.raise(&new_ticket()).await.unwrap();
    assert_eq!(outcome, RefreshOutcome::Refreshed(1));
    let ticket_no = controller.tickets()[0].ticket_no.clone();
    assert_eq!(
        resolve(&controller.tickets()[0], clock.now()),
        ViewState::Raised
    );

    controller
        .set_deadline(&ticket_no, &DeadlineSelection::quick(10))
        .await
        .unwrap();
    let views = controller.views();
    assert_eq!(views[0].state, ViewState::Running);
    assert_eq!(views[0].remaining, "00:10:00");

    clock.advance(Duration::minutes(10));
    assert_eq!(controller.views()[0].state, ViewState::Running);
    assert_eq!(controller.views()[0].remaining, "00:00:00");

    clock.advance(Duration::seconds(1));
    assert_eq!(controller.views()[0].state, ViewState::Overdue);

    let confirmed = ResolveRequest::new(ticket_no.clone()).confirm();
    controller.mark_resolved(confirmed).await.unwrap();
    assert_eq!(controller.views()[0].state, ViewState::Resolved);

    let partition = controller.partition();
    assert!(partition.section(Section::Live).is_empty());
    assert_eq!(partition.section(Section::Resolved).len(), 1);

    assert_eq!(
        api.calls(),
        vec![
            "raise".to_string(),
            "list".to_string(),
            format!("set_deadline:{ticket_no}"),
            "list".to_string(),
            format!("mark_resolved:{ticket_no}"),
            "list".to_string(),
        ]
    );
}

#[tokio::test]
async fn past_manual_deadline_is_overdue_until_resolved() {
    let clock = MutableClock::new(start());
    let api = FakeApi::new(clock.clone());
    let mut controller = TicketListController::new(&api, &clock);
    controller.raise(&new_ticket()).await.unwrap();

    let an_hour_ago = clock.now() - Duration::hours(1);
    let selection = DeadlineSelection::manual(to_local_input_value(Some(an_hour_ago)));
    controller.set_deadline("T-1", &selection).await.unwrap();

    let sent = api.deadlines.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].mode, DeadlineMode::Manual);
    assert_eq!(sent[0].minutes, None);
    assert_eq!(
        sent[0].deadline_at_iso.as_deref(),
        Some(format_instant(an_hour_ago).as_str())
    );

    controller.refresh().await.unwrap();
    let ticket = &controller.tickets()[0];
    assert_eq!(ticket.deadline_at, Some(an_hour_ago));
    assert_eq!(resolve(ticket, clock.now()), ViewState::Overdue);
    assert_eq!(controller.views()[0].remaining, "00:00:00");

    controller
        .mark_resolved(ResolveRequest::new("T-1").confirm())
        .await
        .unwrap();
    let ticket = &controller.tickets()[0];
    assert!(ticket.deadline_at.is_some_and(|deadline| deadline < clock.now()));
    assert_eq!(resolve(ticket, clock.now()), ViewState::Resolved);
}

#[tokio::test]
async fn validation_errors_never_reach_the_api() {
    let clock = MutableClock::new(start());
    let api = FakeApi::new(clock.clone());
    let mut controller = TicketListController::new(&api, &clock);

    let mut blank = new_ticket();
    blank.issue = "  ".to_string();
    let err = controller.raise(&blank).await.unwrap_err();
    assert_eq!(err.to_string(), "Issue required");

    let err = controller
        .set_deadline("T-1", &DeadlineSelection::default())
        .await
        .unwrap_err();
    assert!(err.is_validation());

    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn resolved_tickets_reject_further_changes_locally() {
    let clock = MutableClock::new(start());
    let api = FakeApi::new(clock.clone());
    let mut controller = TicketListController::new(&api, &clock);
    controller.raise(&new_ticket()).await.unwrap();
    controller
        .mark_resolved(ResolveRequest::new("T-1").confirm())
        .await
        .unwrap();
    let before = api.calls().len();

    let err = controller
        .set_deadline("T-1", &DeadlineSelection::quick(10))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("already resolved"));
    let err = controller
        .mark_resolved(ResolveRequest::new("T-1").confirm())
        .await
        .unwrap_err();
    assert!(err.is_validation());

    assert_eq!(api.calls().len(), before);
}

#[tokio::test]
async fn failed_refresh_keeps_previous_collection() {
    let clock = MutableClock::new(start());
    let api = FakeApi::new(clock.clone());
    let mut controller = TicketListController::new(&api, &clock);
    controller.raise(&new_ticket()).await.unwrap();
    assert_eq!(controller.tickets().len(), 1);

    *api.fail_next_list.lock().unwrap() = Some(TicketError::Timeout(25));
    let err = controller.refresh().await.unwrap_err();
    assert_eq!(err, TicketError::Timeout(25));
    assert_eq!(controller.tickets().len(), 1);
}

#[tokio::test]
async fn rejected_mutation_skips_the_follow_up_listing() {
    let clock = MutableClock::new(start());
    let api = FakeApi::new(clock.clone());
    let mut controller = TicketListController::new(&api, &clock);

    *api.reject_next_mutation.lock().unwrap() =
        Some(TicketError::Remote("Sheet locked".to_string()));
    let err = controller.raise(&new_ticket()).await.unwrap_err();

    assert_eq!(err.to_string(), "Sheet locked");
    assert_eq!(api.calls(), vec!["raise".to_string()]);
    assert!(controller.tickets().is_empty());
}

#[tokio::test]
async fn mutation_succeeds_even_when_listing_afterwards_fails() {
    let clock = MutableClock::new(start());
    let api = FakeApi::new(clock.clone());
    let mut controller = TicketListController::new(&api, &clock);

    *api.fail_next_list.lock().unwrap() = Some(TicketError::Network("reset".to_string()));
    let outcome = controller.raise(&new_ticket()).await.unwrap();

    assert!(matches!(outcome, RefreshOutcome::Stale(TicketError::Network(_))));
    assert!(controller.tickets().is_empty());
    assert_eq!(api.tickets.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn partition_covers_every_ticket_exactly_once() {
    let clock = MutableClock::new(start());
    let api = FakeApi::new(clock.clone());
    let mut controller = TicketListController::new(&api, &clock);
    for _ in 0..4 {
        controller.raise(&new_ticket()).await.unwrap();
    }
    controller
        .set_deadline("T-2", &DeadlineSelection::quick(20))
        .await
        .unwrap();
    controller
        .mark_resolved(ResolveRequest::new("T-2").confirm())
        .await
        .unwrap();

    let partition = controller.partition();
    assert_eq!(partition.total(), controller.tickets().len());
    let live = partition
        .live
        .iter()
        .map(|ticket| ticket.ticket_no.as_str())
        .collect::<Vec<_>>();
    assert_eq!(live, vec!["T-1", "T-3", "T-4"]);
    assert_eq!(partition.resolved[0].ticket_no, "T-2");
}
