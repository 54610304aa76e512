//! world snapshot model
//!
//! the scanner never talks to a live server. a snapshot holds the grid
//! groups, factions (with their economy stations) and players exported from
//! the server, stored as JSON.

mod schema;

pub use schema::{Block, Faction, Grid, GridGroup, GridSize, Player, Station, WorldSnapshot};

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error("world snapshot not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read world snapshot {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid world snapshot {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to encode world snapshot: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to write world snapshot {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// load a snapshot from a JSON file
pub fn load(path: &Path) -> Result<WorldSnapshot, WorldError> {
    if !path.exists() {
        return Err(WorldError::NotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|source| WorldError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| WorldError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// save a snapshot using atomic write (write to temp, then rename)
pub fn save(world: &WorldSnapshot, path: &Path) -> Result<(), WorldError> {
    let write_err = |source: std::io::Error| WorldError::Write {
        path: path.to_path_buf(),
        source,
    };

    let content = serde_json::to_string_pretty(world).map_err(WorldError::Encode)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
    }

    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, content).map_err(write_err)?;
    fs::rename(&temp_path, path).map_err(write_err)?;

    Ok(())
}

impl WorldSnapshot {
    /// evaluation clock: the capture time if recorded, otherwise now
    pub fn clock(&self) -> DateTime<Utc> {
        self.captured_at.unwrap_or_else(Utc::now)
    }

    pub fn grids(&self) -> impl Iterator<Item = &Grid> {
        self.groups.iter().flat_map(|g| g.grids.iter())
    }

    pub fn grid_count(&self) -> usize {
        self.groups.iter().map(|g| g.grids.len()).sum()
    }

    /// drop the given grids, removing groups left empty
    ///
    /// returns the number of grids removed
    pub fn remove_grids(&mut self, ids: &HashSet<i64>) -> usize {
        let before = self.grid_count();

        for group in &mut self.groups {
            group.grids.retain(|grid| !ids.contains(&grid.entity_id));
        }
        self.groups.retain(|group| !group.grids.is_empty());

        before - self.grid_count()
    }
}
