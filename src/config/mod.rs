mod schema;

pub use schema::{Config, Settings, DEFAULT_LOG_LEVEL, DEFAULT_SUGGEST_THRESHOLD};

use anyhow::{anyhow, Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::conditions::{self, parse_conditions};

const CONFIG_ENV_VAR: &str = "GRIDSCAN_CONFIG";
const VALID_LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

pub fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var(CONFIG_ENV_VAR) {
        return Ok(PathBuf::from(path));
    }

    Ok(ensure_gridscan_dir()?.join("config.json"))
}

pub fn ensure_gridscan_dir() -> Result<PathBuf> {
    let dir = dirs::home_dir()
        .ok_or_else(|| anyhow!("Could not find home directory"))?
        .join(".gridscan");

    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }

    Ok(dir)
}

/// resolve the config path, preferring an explicit override
pub fn resolve_path(path_override: Option<&Path>) -> Result<PathBuf> {
    match path_override {
        Some(path) => Ok(path.to_path_buf()),
        None => get_config_path(),
    }
}

/// load config, writing defaults on first use
pub fn load(path_override: Option<&Path>) -> Result<Config> {
    let path = resolve_path(path_override)?;

    if !path.exists() {
        let config = Config::default();
        save_to(&config, &path)?;
        return Ok(config);
    }

    load_from(&path)
}

pub fn load_from(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}

pub fn save(config: &Config, path_override: Option<&Path>) -> Result<()> {
    save_to(config, &resolve_path(path_override)?)
}

pub fn save_to(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let content = serde_json::to_string_pretty(config).context("Failed to serialize config")?;

    fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    Ok(())
}

/// Verify configuration file and return a list of errors
pub fn verify(path: &Path) -> Result<Vec<String>> {
    let mut errors = Vec::new();

    if !path.exists() {
        return Err(anyhow!("config file not found: {}", path.display()));
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: Config = match serde_json::from_str(&content) {
        Ok(c) => c,
        Err(e) => {
            return Err(anyhow!("invalid JSON: {}", e));
        }
    };

    let registry = conditions::initialize()?;

    // validate presets
    for (name, tokens) in &config.presets {
        let prefix = format!("presets.{}", name);

        if tokens.is_empty() {
            errors.push(format!("{}: preset has no conditions", prefix));
            continue;
        }

        if let Err(e) = parse_conditions(tokens, registry) {
            errors.push(format!("{}: {}", prefix, e));
        }
    }

    if let Err(e) = validate_log_level(&config.settings.log_level) {
        errors.push(format!("settings.log_level: {}", e));
    }

    if let Some(world) = &config.settings.world {
        if !world.exists() {
            errors.push(format!(
                "settings.world: file not found: {}",
                world.display()
            ));
        }
    }

    Ok(errors)
}

fn validate_log_level(level: &str) -> Result<(), String> {
    if VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
        Ok(())
    } else {
        Err(format!(
            "invalid log level '{}': valid levels are {}",
            level,
            VALID_LOG_LEVELS.join(", ")
        ))
    }
}

/// expand named presets into one token list, in the order given
pub fn expand_presets(config: &Config, names: &[String]) -> Result<Vec<String>> {
    let mut tokens = Vec::new();

    for name in names {
        let preset = config
            .presets
            .get(name)
            .ok_or_else(|| anyhow!("unknown preset '{}'", name))?;
        tokens.extend(preset.iter().cloned());
    }

    Ok(tokens)
}

pub fn set_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["settings", "world"] => {
            config.settings.world = if value.is_empty() {
                None
            } else {
                Some(PathBuf::from(value))
            };
        }
        ["settings", "log_level"] => {
            validate_log_level(value).map_err(|e| anyhow!(e))?;
            config.settings.log_level = value.to_lowercase();
        }
        ["settings", "suggest_threshold"] => {
            config.settings.suggest_threshold = value
                .parse()
                .with_context(|| format!("Invalid number: {}", value))?;
        }
        ["settings", "max_listed"] => {
            config.settings.max_listed = value
                .parse()
                .with_context(|| format!("Invalid number: {}", value))?;
        }
        ["presets", name] => {
            if value.is_empty() {
                config.presets.remove(*name);
            } else {
                let tokens: Vec<String> = value.split_whitespace().map(str::to_string).collect();
                parse_conditions(&tokens, conditions::initialize()?)
                    .with_context(|| format!("Invalid preset '{}'", name))?;
                config.presets.insert(name.to_string(), tokens);
            }
        }
        _ => {
            return Err(anyhow!(
                "Unknown config key: {}. Valid keys: settings.world, settings.log_level, settings.suggest_threshold, settings.max_listed, presets.<name>",
                key
            ));
        }
    }

    Ok(())
}
