use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// named condition token lists, e.g. "abandoned": ["noowner", "minage", "3"]
    #[serde(default)]
    pub presets: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub settings: Settings,
}

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_SUGGEST_THRESHOLD: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// world snapshot used when --world is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub world: Option<PathBuf>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// maximum edit distance for "did you mean" hints on unknown conditions
    #[serde(default = "default_suggest_threshold")]
    pub suggest_threshold: usize,
    /// cap on grids listed in text output, 0 = unlimited
    #[serde(default)]
    pub max_listed: usize,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_suggest_threshold() -> usize {
    DEFAULT_SUGGEST_THRESHOLD
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world: None,
            log_level: default_log_level(),
            suggest_threshold: DEFAULT_SUGGEST_THRESHOLD,
            max_listed: 0,
        }
    }
}
