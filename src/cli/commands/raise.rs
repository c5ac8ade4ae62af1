use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::{
    app::{actions::RefreshOutcome, controller::TicketListController},
    cli::SystemClock,
    config::Config,
    domain::ticket::NewTicket,
    infra::{api_client::HttpTicketApi, attachment::encode_attachment},
};

pub(crate) struct RaiseFields {
    pub(crate) raised_for: String,
    pub(crate) concerned_person: String,
    pub(crate) issue: String,
    pub(crate) attachment: Option<PathBuf>,
}

pub(crate) async fn run(cfg: Config, fields: RaiseFields) -> Result<()> {
    let attachment = fields
        .attachment
        .as_deref()
        .map(|path| encode_attachment(path, cfg.attachment_max_bytes))
        .transpose()?;
    let ticket = NewTicket {
        raised_for: fields.raised_for,
        concerned_person: fields.concerned_person,
        issue: fields.issue,
        attachment,
    };
    // Checked before the client is built so bad input never needs a URL.
    ticket.to_request()?;

    let api = HttpTicketApi::from_config(&cfg)?;
    let clock = SystemClock;
    let mut controller = TicketListController::new(&api, &clock);
    let outcome = controller
        .raise(&ticket)
        .await
        .context("Ticket raise failed")?;

    println!("Ticket Raised");
    report_refresh(outcome);
    Ok(())
}

pub(crate) fn report_refresh(outcome: RefreshOutcome) {
    match outcome {
        RefreshOutcome::Refreshed(count) => println!("tickets: {count}"),
        RefreshOutcome::Stale(err) => eprintln!("warning: Unable to load tickets: {err}"),
    }
}
