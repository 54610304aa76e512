use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::conditions::{self, parse_conditions, BoundPredicate, ParseError, Registry, ScanContext};
use crate::config::{self, Config};
use crate::scanner;
use crate::world::{self, WorldSnapshot};

use super::exit_codes;
use super::output::{self, ConditionData, GridData, OutputMode, ScanData};

#[derive(Parser)]
#[command(name = "gridscan")]
#[command(about = "Find and clean up grids matching a list of conditions")]
#[command(version)]
pub struct Cli {
    /// Path to config file (overrides GRIDSCAN_CONFIG env var and default location)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (auto-enabled when stdout is piped)
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Force text output even when stdout is piped
    #[arg(long, global = true, conflicts_with = "json")]
    pub no_json: bool,

    /// Suppress all output on success (errors still go to stderr)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log condition evaluation details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List grids matching all conditions
    ///
    /// Conditions are given as a flat list, each optionally followed by one
    /// parameter, e.g. `gridscan scan noowner minage 3 isdynamic`.
    /// Grids with a pilot are skipped unless `haspilot` is given.
    Scan {
        /// World snapshot to scan (defaults to settings.world)
        #[arg(short, long)]
        world: Option<PathBuf>,

        /// Named condition preset from the config, may be repeated
        #[arg(short, long, action = clap::ArgAction::Append)]
        preset: Vec<String>,

        /// Print only entity ids, one per line
        #[arg(long)]
        ids: bool,

        /// Conditions and their parameters
        ///
        /// Everything from the first condition on is read as a condition
        /// token, so flags such as -v or --json must come before it.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        conditions: Vec<String>,
    },

    /// Remove grids matching all conditions from the world snapshot
    Delete {
        /// World snapshot to clean (defaults to settings.world)
        #[arg(short, long)]
        world: Option<PathBuf>,

        /// Named condition preset from the config, may be repeated
        #[arg(short, long, action = clap::ArgAction::Append)]
        preset: Vec<String>,

        /// Write the cleaned snapshot here instead of overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show what would be removed without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Conditions and their parameters
        ///
        /// Everything from the first condition on is read as a condition
        /// token, so flags such as -v or --json must come before it.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        conditions: Vec<String>,
    },

    /// List every available condition
    Conditions,

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Show config file path
    Path,
    /// Check the config file for errors
    Verify,
    /// Print the default configuration
    Default,
    /// Set a configuration value
    Set {
        /// Key (e.g. settings.world, presets.abandoned)
        key: String,
        /// Value; preset tokens are space separated, empty removes
        value: String,
    },
    /// Reset configuration to defaults
    Reset,
}

pub fn execute(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Scan {
            world,
            preset,
            ids,
            conditions,
        } => {
            let output_mode = OutputMode::from_flags(cli.json, cli.no_json, cli.quiet, ids);
            let config = load_config(config_path, output_mode)?;
            let world_path = resolve_world_path(world, &config, output_mode);
            let snapshot = load_world(&world_path, output_mode);
            let predicates = resolve_predicates(&config, &preset, &conditions, output_mode)?;

            let ctx = ScanContext::from_world(&snapshot);
            let matched = scanner::scan_groups(&snapshot, &predicates, &ctx);
            let grids: Vec<GridData> = matched.into_iter().map(GridData::from).collect();

            let data = ScanData {
                action: "scan",
                conditions: describe(&predicates),
                count: grids.len(),
                grids,
                dry_run: None,
                written_to: None,
            };
            print_scan(&data, output_mode, config.settings.max_listed);
            Ok(())
        }

        Commands::Delete {
            world,
            preset,
            output,
            dry_run,
            conditions,
        } => {
            let output_mode = OutputMode::from_flags(cli.json, cli.no_json, cli.quiet, false);
            let config = load_config(config_path, output_mode)?;
            let world_path = resolve_world_path(world, &config, output_mode);
            let mut snapshot = load_world(&world_path, output_mode);
            let predicates = resolve_predicates(&config, &preset, &conditions, output_mode)?;

            let ctx = ScanContext::from_world(&snapshot);
            let grids: Vec<GridData> = scanner::scan_groups(&snapshot, &predicates, &ctx)
                .into_iter()
                .map(GridData::from)
                .collect();

            let written_to = if dry_run || grids.is_empty() {
                None
            } else {
                let ids: HashSet<i64> = grids.iter().map(|g| g.entity_id).collect();
                let removed = snapshot.remove_grids(&ids);
                let target = output.unwrap_or_else(|| world_path.clone());
                world::save(&snapshot, &target)?;
                log::info!("removed {} grid(s), wrote {}", removed, target.display());
                Some(target.display().to_string())
            };

            let data = ScanData {
                action: "delete",
                conditions: describe(&predicates),
                count: grids.len(),
                grids,
                dry_run: Some(dry_run),
                written_to,
            };
            print_scan(&data, output_mode, config.settings.max_listed);
            Ok(())
        }

        Commands::Conditions => {
            let output_mode = OutputMode::from_flags(cli.json, cli.no_json, cli.quiet, false);
            let registry = conditions::initialize()?;

            match output_mode {
                OutputMode::Json => {
                    let data: Vec<ConditionData> =
                        registry.all().iter().map(ConditionData::from).collect();
                    output::print_json(&data);
                }
                OutputMode::Quiet => {}
                OutputMode::Ids | OutputMode::Text => {
                    let width = registry
                        .all()
                        .iter()
                        .map(|d| d.to_string().len())
                        .max()
                        .unwrap_or(0);
                    for def in registry.all() {
                        println!("  {:<width$}  {}", def.to_string(), def.help, width = width);
                    }
                }
            }
            Ok(())
        }

        Commands::Config(cmd) => execute_config(cmd, config_path, cli.json),
    }
}

fn execute_config(cmd: ConfigCommands, config_path: Option<&Path>, json: bool) -> Result<()> {
    match cmd {
        ConfigCommands::Show => {
            let config = config::load(config_path)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigCommands::Path => {
            let path = config::resolve_path(config_path)?;
            if json {
                output::print_json(&serde_json::json!({ "path": path.display().to_string() }));
            } else {
                println!("{}", path.display());
            }
        }
        ConfigCommands::Verify => {
            let path = config::resolve_path(config_path)?;
            let errors = match config::verify(&path) {
                Ok(errors) => errors,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(exit_codes::CONFIG_ERROR);
                }
            };

            if errors.is_empty() {
                println!("Config is valid: {}", path.display());
            } else {
                eprintln!("Config has {} error(s):", errors.len());
                for error in &errors {
                    eprintln!("  - {}", error);
                }
                std::process::exit(exit_codes::CONFIG_ERROR);
            }
        }
        ConfigCommands::Default => {
            println!("{}", serde_json::to_string_pretty(&Config::default())?);
        }
        ConfigCommands::Set { key, value } => {
            let mut config = config::load(config_path)?;
            config::set_value(&mut config, &key, &value)?;
            config::save(&config, config_path)?;
            println!("Set {} = {}", key, value);
        }
        ConfigCommands::Reset => {
            config::save(&Config::default(), config_path)?;
            println!("Configuration reset to defaults");
        }
    }

    Ok(())
}

/// print an error in the active output mode and exit with the given code
fn fail(output_mode: OutputMode, code: i32, message: &str, suggestions: Vec<String>) -> ! {
    if output_mode.is_json() {
        output::print_json_error(code, message, suggestions);
    } else {
        eprintln!("Error: {}", message);
        if !suggestions.is_empty() {
            eprintln!("Did you mean: {}?", suggestions.join(", "));
        }
    }
    std::process::exit(code);
}

fn load_config(config_path: Option<&Path>, output_mode: OutputMode) -> Result<Config> {
    match config::load(config_path) {
        Ok(config) => Ok(config),
        Err(e) => fail(output_mode, exit_codes::CONFIG_ERROR, &format!("{:#}", e), vec![]),
    }
}

fn resolve_world_path(
    world: Option<PathBuf>,
    config: &Config,
    output_mode: OutputMode,
) -> PathBuf {
    match world.or_else(|| config.settings.world.clone()) {
        Some(path) => path,
        None => fail(
            output_mode,
            exit_codes::INVALID_ARGS,
            "no world snapshot given: pass --world or set settings.world",
            vec![],
        ),
    }
}

fn load_world(path: &Path, output_mode: OutputMode) -> WorldSnapshot {
    match world::load(path) {
        Ok(snapshot) => snapshot,
        Err(e) => fail(output_mode, exit_codes::WORLD_ERROR, &e.to_string(), vec![]),
    }
}

/// expand presets, append the explicit tokens and parse the result
fn resolve_predicates(
    config: &Config,
    presets: &[String],
    tokens: &[String],
    output_mode: OutputMode,
) -> Result<Vec<BoundPredicate>> {
    let registry = conditions::initialize().context("condition registry failed to build")?;

    let mut all_tokens = match config::expand_presets(config, presets) {
        Ok(expanded) => expanded,
        Err(e) => {
            let known: Vec<String> = config.presets.keys().cloned().collect();
            fail(output_mode, exit_codes::INVALID_ARGS, &e.to_string(), known)
        }
    };
    all_tokens.extend(tokens.iter().cloned());

    log::debug!("condition tokens: {}", all_tokens.join(" "));

    match parse_conditions(&all_tokens, registry) {
        Ok(predicates) => Ok(predicates),
        Err(e) => {
            let suggestions = suggest(registry, &e, config.settings.suggest_threshold);
            fail(output_mode, exit_codes::INVALID_ARGS, &e.to_string(), suggestions)
        }
    }
}

fn suggest(registry: &Registry, error: &ParseError, threshold: usize) -> Vec<String> {
    registry
        .suggest(error.token(), threshold)
        .map(|name| vec![name.to_string()])
        .unwrap_or_default()
}

fn describe(predicates: &[BoundPredicate]) -> Vec<String> {
    predicates.iter().map(|p| p.to_string()).collect()
}

fn print_scan(data: &ScanData, output_mode: OutputMode, max_listed: usize) {
    match output_mode {
        OutputMode::Json => output::print_json(data),
        OutputMode::Quiet => {}
        OutputMode::Ids => {
            for grid in &data.grids {
                println!("{}", grid.entity_id);
            }
        }
        OutputMode::Text => {
            let verb = match (data.action, data.dry_run) {
                ("delete", Some(true)) => "Would delete",
                ("delete", _) => "Deleted",
                _ => "Found",
            };
            println!(
                "{} {} grid(s) matching: {}",
                verb,
                data.count,
                data.conditions.join(", ")
            );
            output::print_grid_list(&data.grids, max_listed);
            if let Some(path) = &data.written_to {
                println!("Wrote {}", path);
            }
        }
    }
}
