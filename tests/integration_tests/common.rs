// shared utilities for integration tests

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::{json, Value};
use tempfile::TempDir;

/// exit codes mirrored from src/cli/exit_codes.rs
pub const INVALID_ARGS: i32 = 4;
pub const CONFIG_ERROR: i32 = 5;
pub const WORLD_ERROR: i32 = 6;

/// get path to the built gridscan binary
pub fn gridscan_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_gridscan"))
}

/// a world small enough to reason about by hand
///
/// - group [1]: piloted fighter owned by Alice (online)
/// - group [2]: unowned hulk, three months old
/// - group [3, 4]: Bob's base and rover, Bob last seen in January
/// - group [5]: projection preview
/// - group [500]: economy trade station
/// - group [6]: unowned wreck from yesterday
pub fn sample_world() -> Value {
    json!({
        "captured_at": "2024-06-01T12:00:00Z",
        "players": {
            "100": {
                "name": "Alice",
                "last_login": "2024-05-31T20:00:00Z",
                "online": true,
                "position": [0.0, 0.0, 0.0]
            },
            "200": {
                "name": "Bob",
                "faction_id": 1,
                "last_login": "2024-01-10T08:00:00Z"
            }
        },
        "factions": {
            "1": { "tag": "BOB", "name": "Bob's Builders", "members": [200] },
            "2": {
                "tag": "ECO",
                "name": "Traders",
                "stations": [{ "station_entity_id": 500 }, { "station_entity_id": 0 }]
            }
        },
        "groups": [
            { "grids": [{
                "entity_id": 1, "display_name": "Alice Fighter", "piloted": true,
                "owners": [100], "block_count": 50, "pcu": 400,
                "created_at": "2024-05-01T00:00:00Z"
            }] },
            { "grids": [{
                "entity_id": 2, "display_name": "Abandoned Hulk",
                "block_count": 300, "pcu": 2500,
                "created_at": "2024-03-01T00:00:00Z"
            }] },
            { "grids": [
                {
                    "entity_id": 3, "display_name": "Bob Base", "owners": [200],
                    "is_static": true, "powered": true, "block_count": 1200, "pcu": 9000,
                    "created_at": "2024-02-01T00:00:00Z"
                },
                {
                    "entity_id": 4, "display_name": "Bob Rover", "owners": [200],
                    "grid_size": "small", "block_count": 40, "pcu": 300,
                    "created_at": "2024-02-01T00:00:00Z"
                }
            ] },
            { "grids": [{
                "entity_id": 5, "display_name": "Preview", "projector": 77,
                "block_count": 10
            }] },
            { "grids": [{
                "entity_id": 500, "display_name": "Trade Station", "is_static": true,
                "block_count": 5000, "created_at": "2023-01-01T00:00:00Z"
            }] },
            { "grids": [{
                "entity_id": 6, "display_name": "Fresh Wreck",
                "block_count": 12, "created_at": "2024-05-31T00:00:00Z"
            }] }
        ]
    })
}

/// isolated config + world pair in a temporary directory
pub struct TestEnv {
    pub dir: TempDir,
    pub config_path: PathBuf,
    pub world_path: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_config(&json!({}))
    }

    pub fn with_config(config: &Value) -> Self {
        let dir = TempDir::new().expect("Failed to create test directory");
        let config_path = dir.path().join("config.json");
        let world_path = dir.path().join("world.json");

        write_json(&config_path, config);
        write_json(&world_path, &sample_world());

        Self {
            dir,
            config_path,
            world_path,
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// run gridscan against this env's config, forcing text output
    pub fn run(&self, args: &[&str]) -> Output {
        self.run_with_mode("--no-json", args)
    }

    /// run gridscan with --json and parse stdout
    pub fn run_json(&self, args: &[&str]) -> (Output, Value) {
        let output = self.run_with_mode("--json", args);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let json: Value = serde_json::from_str(stdout.trim()).unwrap_or_else(|e| {
            panic!(
                "stdout is not JSON ({}).\nstdout: {}\nstderr: {}",
                e,
                stdout,
                String::from_utf8_lossy(&output.stderr)
            )
        });
        (output, json)
    }

    fn run_with_mode(&self, mode: &str, args: &[&str]) -> Output {
        Command::new(gridscan_binary_path())
            .arg("--config")
            .arg(&self.config_path)
            .arg(mode)
            .args(args)
            .env_remove("GRIDSCAN_CONFIG")
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to run gridscan")
    }

    pub fn world_arg(&self) -> String {
        self.world_path.to_string_lossy().to_string()
    }
}

pub fn write_json(path: &Path, value: &Value) {
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).expect("Failed to write JSON");
}

pub fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).expect("Failed to read JSON"))
        .expect("Failed to parse JSON")
}

/// entity ids of all grids in a world file
pub fn world_grid_ids(path: &Path) -> Vec<i64> {
    read_json(path)["groups"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|g| g["grids"].as_array().unwrap().iter())
        .map(|grid| grid["entity_id"].as_i64().unwrap())
        .collect()
}

/// entity ids from a scan/delete JSON-RPC result
pub fn result_ids(json: &Value) -> Vec<i64> {
    json["result"]["grids"]
        .as_array()
        .expect("result.grids should be an array")
        .iter()
        .map(|grid| grid["entity_id"].as_i64().unwrap())
        .collect()
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
