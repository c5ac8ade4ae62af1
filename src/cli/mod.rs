mod args;
mod commands;
mod logging;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;

use crate::{config::load_config_with_path, ports::ClockPort};

use args::{Cli, Commands};

#[derive(Debug, Clone, Copy)]
pub(crate) struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> chrono::DateTime<Utc> {
        Utc::now()
    }
}

pub fn exit_code_for_error(_err: &anyhow::Error) -> i32 {
    1
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Board { config } => {
            let loaded = load_config_with_path(config.as_deref())?;
            logging::init_board_logging(loaded.config.log_path.as_deref())?;
            commands::board::run(loaded.config, loaded.resolved_path).await
        }
        Commands::List {
            config,
            filter,
            json,
        } => {
            logging::init_cli_logging();
            let loaded = load_config_with_path(config.as_deref())?;
            commands::list::run(loaded.config, filter, json).await
        }
        Commands::Raise {
            config,
            raised_for,
            concerned_person,
            issue,
            attachment,
        } => {
            logging::init_cli_logging();
            let loaded = load_config_with_path(config.as_deref())?;
            let fields = commands::raise::RaiseFields {
                raised_for,
                concerned_person,
                issue,
                attachment,
            };
            commands::raise::run(loaded.config, fields).await
        }
        Commands::Deadline {
            config,
            ticket_no,
            minutes,
            at,
        } => {
            logging::init_cli_logging();
            let loaded = load_config_with_path(config.as_deref())?;
            commands::deadline::run(loaded.config, &ticket_no, minutes, at).await
        }
        Commands::Resolve {
            config,
            ticket_no,
            yes,
        } => {
            logging::init_cli_logging();
            let loaded = load_config_with_path(config.as_deref())?;
            commands::resolve::run(loaded.config, &ticket_no, yes).await
        }
        Commands::Init { path, force } => commands::init::run(path, force),
        Commands::Config { command } => commands::config::run(command),
    }
}
