use anyhow::{Context, Result};

use crate::{
    app::controller::TicketListController,
    cli::{commands::raise::report_refresh, SystemClock},
    config::Config,
    domain::{deadline::DeadlineSelection, time::format_absolute},
    infra::api_client::HttpTicketApi,
};

pub(crate) async fn run(
    cfg: Config,
    ticket_no: &str,
    minutes: Option<u32>,
    at: Option<String>,
) -> Result<()> {
    let selection = match (minutes, at) {
        (Some(minutes), _) => DeadlineSelection::quick(minutes),
        (None, Some(at)) => DeadlineSelection::manual(at),
        (None, None) => DeadlineSelection::default(),
    };

    let api = HttpTicketApi::from_config(&cfg)?;
    let clock = SystemClock;
    let mut controller = TicketListController::new(&api, &clock);
    controller
        .refresh()
        .await
        .context("Unable to load tickets")?;

    let outcome = controller
        .set_deadline(ticket_no, &selection)
        .await
        .context("Deadline update failed")?;

    let saved = controller
        .board()
        .find(ticket_no)
        .and_then(|ticket| ticket.deadline_at);
    match saved {
        Some(_) => println!("Deadline Saved: {} -> {}", ticket_no.trim(), format_absolute(saved)),
        None => println!("Deadline Saved: {}", ticket_no.trim()),
    }
    report_refresh(outcome);
    Ok(())
}
