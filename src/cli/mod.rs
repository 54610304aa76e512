mod commands;
pub mod exit_codes;
pub mod output;

pub use commands::{Cli, Commands, ConfigCommands};

use anyhow::Result;
use env_logger::Env;

use crate::config::{self, DEFAULT_LOG_LEVEL};

pub fn run(cli: Cli) -> Result<()> {
    init_logging(&cli);
    commands::execute(cli)
}

/// RUST_LOG wins, then --verbose/--quiet, then settings.log_level
fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        "debug".to_string()
    } else if cli.quiet {
        "error".to_string()
    } else {
        configured_log_level(cli)
    };

    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}

// reads without creating the file, config commands must see it untouched
fn configured_log_level(cli: &Cli) -> String {
    config::resolve_path(cli.config.as_deref())
        .ok()
        .filter(|path| path.exists())
        .and_then(|path| config::load_from(&path).ok())
        .map(|config| config.settings.log_level)
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}
