use anyhow::Result;

use crate::{
    app::board_loop::run_board,
    cli::SystemClock,
    config::{Config, ResolvedConfigPath},
    infra::api_client::HttpTicketApi,
};

pub(crate) async fn run(cfg: Config, resolved_config: ResolvedConfigPath) -> Result<()> {
    eprintln!(
        "config: {} (source: {})",
        resolved_config.path.display(),
        resolved_config.source
    );

    let api = HttpTicketApi::from_config(&cfg)?;
    run_board(&cfg, &api, &SystemClock).await
}
