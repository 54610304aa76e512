//! grid scanner
//!
//! runs a parsed condition conjunction over the grid groups of a world
//! snapshot. a group passes or fails as a whole; projected grids never take
//! part, and grids tied to economy stations are never returned.
//!
//! hosts call [`scan_conditions`] with a [`Respond`] channel; callers that
//! already hold parsed predicates call [`scan_groups`] directly.

use std::collections::{HashMap, HashSet};

use crate::conditions::{parse_conditions, BoundPredicate, Registry, ScanContext, TriState};
use crate::world::{Faction, Grid, GridGroup, WorldSnapshot};

/// channel for user-facing command responses
pub trait Respond {
    fn respond(&mut self, message: &str);
}

impl Respond for Vec<String> {
    fn respond(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

/// entity ids of every grid backing a faction station
pub fn economy_station_grid_ids(factions: &HashMap<i64, Faction>) -> HashSet<i64> {
    factions
        .values()
        .flat_map(|faction| faction.stations.iter())
        .map(|station| station.station_entity_id)
        .filter(|id| *id != 0)
        .collect()
}

/// parse the tokens and scan the world with them
///
/// this is the entry point for hosts that embed the scanner behind a chat or
/// console command: an unknown token is reported through `responder` and
/// yields an empty result without looking at the world.
///
/// the `gridscan` binary parses with [`parse_conditions`] and calls
/// [`scan_groups`] itself, so it can attach a suggestion and an exit code to
/// the same error.
pub fn scan_conditions<'w, S: AsRef<str>>(
    responder: &mut dyn Respond,
    registry: &Registry,
    world: &'w WorldSnapshot,
    args: &[S],
) -> Vec<&'w Grid> {
    let predicates = match parse_conditions(args, registry) {
        Ok(predicates) => predicates,
        Err(e) => {
            responder.respond(&e.to_string());
            return Vec::new();
        }
    };

    let ctx = ScanContext::from_world(world);
    scan_groups(world, &predicates, &ctx)
}

/// evaluate a predicate conjunction over every group of the world
pub fn scan_groups<'w>(
    world: &'w WorldSnapshot,
    predicates: &[BoundPredicate],
    ctx: &ScanContext,
) -> Vec<&'w Grid> {
    let economy_grids = economy_station_grid_ids(&world.factions);
    log::info!("economy grids: {}", format_ids(&economy_grids));

    let mut result = Vec::new();

    for group in &world.groups {
        if !group_passes(group, predicates, ctx) {
            continue;
        }

        for grid in &group.grids {
            if grid.is_projected() {
                continue;
            }
            if economy_grids.contains(&grid.entity_id) {
                log::info!("skipped economy grid: {}", grid.display_name);
                continue;
            }
            result.push(grid);
        }
    }

    result
}

/// every non-projected grid of the group satisfies every predicate
fn group_passes(group: &GridGroup, predicates: &[BoundPredicate], ctx: &ScanContext) -> bool {
    for grid in group.grids.iter().filter(|g| !g.is_projected()) {
        for predicate in predicates {
            match predicate.evaluate(grid, ctx) {
                TriState::True => continue,
                TriState::False => {
                    log::debug!("grid '{}' failed '{}'", grid.display_name, predicate);
                    return false;
                }
                TriState::Unknown => {
                    log::debug!(
                        "grid '{}' could not be evaluated by '{}'",
                        grid.display_name,
                        predicate
                    );
                    return false;
                }
            }
        }
    }

    true
}

fn format_ids(ids: &HashSet<i64>) -> String {
    let mut sorted: Vec<_> = ids.iter().collect();
    sorted.sort();
    sorted
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
