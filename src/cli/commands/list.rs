use anyhow::{Context, Result};
use serde::Serialize;

use crate::{
    app::{board::Section, controller::TicketListController},
    cli::{args::ListFilterArgs, SystemClock},
    config::Config,
    domain::{
        filter::{apply, FilterField, TicketFilter},
        ticket::{Ticket, TicketView, ViewState},
        time::format_absolute,
    },
    infra::api_client::HttpTicketApi,
    ports::ClockPort,
};

#[derive(Debug, Serialize)]
struct ListedTicket<'a> {
    #[serde(flatten)]
    ticket: &'a Ticket,
    state: ViewState,
    remaining: String,
}

pub(crate) async fn run(cfg: Config, args: ListFilterArgs, json: bool) -> Result<()> {
    let api = HttpTicketApi::from_config(&cfg)?;
    let clock = SystemClock;
    let mut controller = TicketListController::new(&api, &clock);
    controller
        .refresh()
        .await
        .context("Unable to load tickets")?;

    let sections: &[Section] = if args.all {
        &[Section::Live, Section::Resolved]
    } else if args.resolved {
        &[Section::Resolved]
    } else {
        &[Section::Live]
    };

    let mut filter = TicketFilter::default();
    filter.set(FilterField::RaisedFor, args.raised_for);
    filter.set(FilterField::ConcernedPerson, args.concerned_person);

    let now = clock.now();
    let partition = controller.partition();
    let listed = sections
        .iter()
        .flat_map(|section| apply(partition.section(*section).iter().copied(), &filter))
        .map(|ticket| TicketView::new(ticket, now))
        .collect::<Vec<_>>();

    if json {
        let rows = listed
            .iter()
            .map(|view| ListedTicket {
                ticket: view.ticket,
                state: view.state,
                remaining: view.remaining.clone(),
            })
            .collect::<Vec<_>>();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if listed.is_empty() {
        println!("no tickets");
        return Ok(());
    }

    for view in &listed {
        println!("{}", format_text_row(view));
    }
    Ok(())
}

fn format_text_row(view: &TicketView<'_>) -> String {
    let ticket = view.ticket;
    let when = match view.state {
        ViewState::Resolved => format!("resolved {}", format_absolute(ticket.resolved_at)),
        ViewState::Raised => "no deadline".to_string(),
        ViewState::Running | ViewState::Overdue => format!(
            "due {} ({})",
            format_absolute(ticket.deadline_at),
            view.remaining
        ),
    };
    format!(
        "{}\t{}\t{} -> {}\t{}\t{}",
        ticket.ticket_no,
        view.state.label(),
        ticket.raised_for,
        ticket.concerned_person,
        when,
        ticket.issue.split_whitespace().collect::<Vec<_>>().join(" ")
    )
}
