use anyhow::Result;

use crate::{cli::args::ConfigCommands, config::resolve_config_path_with_source};

pub(crate) fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Path => run_path_cmd(),
    }
}

fn run_path_cmd() -> Result<()> {
    let resolved = resolve_config_path_with_source(None)?;
    println!("{} (source: {})", resolved.path.display(), resolved.source);
    Ok(())
}
