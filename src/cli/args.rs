use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "ticket-desk",
    about = "Raise help-desk tickets, set deadlines and watch them count down"
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Interactive board with live countdowns.
    Board {
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the ticket list once.
    List {
        #[arg(long)]
        config: Option<PathBuf>,
        #[command(flatten)]
        filter: ListFilterArgs,
        #[arg(long)]
        json: bool,
    },
    /// Raise a new ticket.
    Raise {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        raised_for: String,
        #[arg(long)]
        concerned_person: String,
        #[arg(long)]
        issue: String,
        /// Image to attach (at most ~2.5MB).
        #[arg(long)]
        attachment: Option<PathBuf>,
    },
    /// Set or replace a ticket deadline.
    #[command(group(ArgGroup::new("when").required(true).args(["minutes", "at"])))]
    Deadline {
        #[arg(long)]
        config: Option<PathBuf>,
        ticket_no: String,
        /// Minutes from now.
        #[arg(long)]
        minutes: Option<u32>,
        /// Local date and time, YYYY-MM-DDTHH:MM.
        #[arg(long)]
        at: Option<String>,
    },
    /// Mark a ticket resolved.
    Resolve {
        #[arg(long)]
        config: Option<PathBuf>,
        ticket_no: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Write a starter config file.
    Init {
        #[arg(long)]
        path: Option<PathBuf>,
        #[arg(long)]
        force: bool,
    },
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Debug, Clone, Default, Args)]
#[command(group(ArgGroup::new("section").args(["resolved", "all"])))]
pub(crate) struct ListFilterArgs {
    /// Only resolved tickets (default: live only).
    #[arg(long)]
    pub(crate) resolved: bool,
    /// Live and resolved tickets.
    #[arg(long)]
    pub(crate) all: bool,
    #[arg(long)]
    pub(crate) raised_for: Option<String>,
    #[arg(long)]
    pub(crate) concerned_person: Option<String>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum ConfigCommands {
    /// Print the resolved config path and where it came from.
    Path,
}
