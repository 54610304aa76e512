//! output formatting for scriptable CLI output
//!
//! uses JSON-RPC 2.0 format for machine-readable output:
//! - success: {"jsonrpc": "2.0", "result": {...}, "id": null}
//! - error: {"jsonrpc": "2.0", "error": {"code": N, "message": "...", "data": {...}}, "id": null}

use serde::Serialize;
use std::io::IsTerminal;

use crate::conditions::ConditionDefinition;
use crate::world::Grid;

const JSONRPC_VERSION: &str = "2.0";

/// output mode determines how results are formatted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// human-readable text output
    Text,
    /// machine-readable JSON-RPC 2.0 output
    Json,
    /// no output on success (errors still go to stderr)
    Quiet,
    /// one grid entity id per line, for piping into other tools
    Ids,
}

impl OutputMode {
    /// determine output mode from CLI flags and environment
    ///
    /// priority: quiet > ids > json > no_json > auto-detect
    pub fn from_flags(json: bool, no_json: bool, quiet: bool, ids: bool) -> Self {
        if quiet {
            return Self::Quiet;
        }
        if ids {
            return Self::Ids;
        }
        if json {
            return Self::Json;
        }
        if no_json {
            return Self::Text;
        }
        // auto-detect: JSON when stdout is not a TTY (piped)
        if !std::io::stdout().is_terminal() {
            Self::Json
        } else {
            Self::Text
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }
}

/// JSON-RPC 2.0 success response
#[derive(Serialize)]
pub struct JsonRpcResponse<T: Serialize> {
    pub jsonrpc: &'static str,
    pub result: T,
    /// null for CLI responses (no request id)
    pub id: Option<String>,
}

impl<T: Serialize> JsonRpcResponse<T> {
    pub fn new(result: T) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            result,
            id: None,
        }
    }
}

/// JSON-RPC 2.0 error response
#[derive(Serialize)]
pub struct JsonRpcError {
    pub jsonrpc: &'static str,
    pub error: RpcError,
    pub id: Option<String>,
}

#[derive(Serialize)]
pub struct RpcError {
    /// gridscan exit code offset into the application error range
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ErrorData>,
}

#[derive(Serialize)]
pub struct ErrorData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

impl JsonRpcError {
    pub fn new(code: i32, message: impl Into<String>, suggestions: Vec<String>) -> Self {
        let data = if suggestions.is_empty() {
            None
        } else {
            Some(ErrorData {
                suggestions: Some(suggestions),
            })
        };

        Self {
            jsonrpc: JSONRPC_VERSION,
            error: RpcError {
                code: to_jsonrpc_code(code),
                message: message.into(),
                data,
            },
            id: None,
        }
    }
}

/// JSON-RPC reserves -32000 to -32099 for server/application errors
fn to_jsonrpc_code(exit_code: i32) -> i32 {
    -32000 - exit_code
}

// ============================================================================
// Result data structures
// ============================================================================

#[derive(Serialize, Clone)]
pub struct GridData {
    pub entity_id: i64,
    pub name: String,
    pub blocks: u32,
    pub pcu: u32,
    pub owners: Vec<i64>,
}

impl From<&Grid> for GridData {
    fn from(grid: &Grid) -> Self {
        Self {
            entity_id: grid.entity_id,
            name: grid.display_name.clone(),
            blocks: grid.block_count,
            pcu: grid.pcu,
            owners: grid.owners.clone(),
        }
    }
}

/// result data for scan and delete
#[derive(Serialize)]
pub struct ScanData {
    pub action: &'static str,
    /// the conjunction actually applied, including the implicit default
    pub conditions: Vec<String>,
    pub count: usize,
    pub grids: Vec<GridData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub written_to: Option<String>,
}

#[derive(Serialize)]
pub struct ConditionData {
    pub command: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invert_command: Option<&'static str>,
    pub takes_parameter: bool,
    pub help: &'static str,
}

impl From<&ConditionDefinition> for ConditionData {
    fn from(def: &ConditionDefinition) -> Self {
        Self {
            command: def.command,
            invert_command: def.invert_command,
            takes_parameter: def.takes_parameter,
            help: def.help,
        }
    }
}

// ============================================================================
// Output functions
// ============================================================================

/// one line per grid: id, name, size
pub fn format_grid_line(grid: &GridData) -> String {
    format!(
        "  {:>20}  {}  ({} blocks, {} PCU)",
        grid.entity_id, grid.name, grid.blocks, grid.pcu
    )
}

/// print grids, capped at `max_listed` lines when non-zero
pub fn print_grid_list(grids: &[GridData], max_listed: usize) {
    let shown = if max_listed == 0 {
        grids.len()
    } else {
        max_listed.min(grids.len())
    };

    for grid in &grids[..shown] {
        println!("{}", format_grid_line(grid));
    }
    if shown < grids.len() {
        println!("  ... and {} more", grids.len() - shown);
    }
}

/// print JSON-RPC success response to stdout
pub fn print_json<T: Serialize>(data: &T) {
    let response = JsonRpcResponse::new(data);
    if let Ok(json) = serde_json::to_string(&response) {
        println!("{}", json);
    }
}

/// print JSON-RPC error to stdout
pub fn print_json_error(code: i32, message: &str, suggestions: Vec<String>) {
    let error = JsonRpcError::new(code, message, suggestions);
    if let Ok(json) = serde_json::to_string(&error) {
        println!("{}", json);
    }
}
