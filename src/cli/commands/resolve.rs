use std::io::{self, BufRead, Write};

use anyhow::{anyhow, Context, Result};

use crate::{
    app::{actions::ResolveRequest, controller::TicketListController},
    cli::{commands::raise::report_refresh, SystemClock},
    config::Config,
    domain::ticket::resolve,
    infra::api_client::HttpTicketApi,
    ports::ClockPort,
};

pub(crate) async fn run(cfg: Config, ticket_no: &str, yes: bool) -> Result<()> {
    let api = HttpTicketApi::from_config(&cfg)?;
    let clock = SystemClock;
    let mut controller = TicketListController::new(&api, &clock);
    controller
        .refresh()
        .await
        .context("Unable to load tickets")?;

    if let Some(ticket) = controller.board().find(ticket_no) {
        let state = resolve(ticket, clock.now());
        if !state.can_mark_resolved() {
            return Err(anyhow!(
                "ticket {} is {} and cannot be marked resolved",
                ticket.ticket_no,
                state.label()
            ));
        }
    }

    let request = ResolveRequest::new(ticket_no.trim());
    if !yes && !confirm(&request)? {
        println!("cancelled");
        return Ok(());
    }

    let outcome = controller
        .mark_resolved(request.confirm())
        .await
        .context("Resolve failed")?;

    println!("Marked Resolved: {}", ticket_no.trim());
    report_refresh(outcome);
    Ok(())
}

fn confirm(request: &ResolveRequest) -> Result<bool> {
    let mut out = io::stdout();
    write!(out, "{}\n[y/N] ", request.prompt())?;
    out.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "YES"))
}
