use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// a snapshot of the server world as seen by the scanner
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// moment the snapshot was taken, used as the evaluation clock
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub groups: Vec<GridGroup>,
    #[serde(default)]
    pub factions: HashMap<i64, Faction>,
    #[serde(default)]
    pub players: HashMap<i64, Player>,
}

/// grids that are physically or logically linked and evaluated as one unit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GridGroup {
    pub grids: Vec<Grid>,
}

impl GridGroup {
    pub fn new(grids: Vec<Grid>) -> Self {
        Self { grids }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridSize {
    #[default]
    Large,
    Small,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub type_id: String,
    #[serde(default)]
    pub subtype_id: String,
}

/// a ship or station structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Grid {
    pub entity_id: i64,
    pub display_name: String,
    /// someone is seated in a cockpit or remote-controlling the grid
    #[serde(default)]
    pub piloted: bool,
    /// id of the projector block previewing this grid, if it is a projection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projector: Option<i64>,
    #[serde(default)]
    pub block_count: u32,
    #[serde(default)]
    pub pcu: u32,
    /// identity ids of the players owning blocks on the grid
    #[serde(default)]
    pub owners: Vec<i64>,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub grid_size: GridSize,
    /// linear speed in m/s
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub position: [f64; 3],
    #[serde(default)]
    pub powered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Grid {
    pub fn new(entity_id: i64, display_name: impl Into<String>) -> Self {
        Self {
            entity_id,
            display_name: display_name.into(),
            ..Default::default()
        }
    }

    pub fn is_projected(&self) -> bool {
        self.projector.is_some()
    }

    pub fn distance_to(&self, point: [f64; 3]) -> f64 {
        let dx = self.position[0] - point[0];
        let dy = self.position[1] - point[1];
        let dz = self.position[2] - point[2];
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Faction {
    pub tag: String,
    #[serde(default)]
    pub name: String,
    /// identity ids of the faction members
    #[serde(default)]
    pub members: Vec<i64>,
    #[serde(default)]
    pub stations: Vec<Station>,
}

/// a trading station owned by an economy faction
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Station {
    /// entity id of the station grid, 0 when the station has no grid
    #[serde(default)]
    pub station_entity_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faction_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default)]
    pub online: bool,
    /// character position, only known while online
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<[f64; 3]>,
}
