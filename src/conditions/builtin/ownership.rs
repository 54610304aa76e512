//! conditions on who owns a grid

use super::{elapsed_days, parse_finite};
use crate::conditions::context::ScanContext;
use crate::conditions::registry::{ConditionModule, RegistryError};
use crate::conditions::types::{ConditionDefinition, TriState};
use crate::world::Grid;

const NOBODY: &str = "nobody";

pub struct OwnershipConditions;

static CONDITIONS: &[ConditionDefinition] = &[
    ConditionDefinition::new("hasowner", has_owner)
        .inverted_by("noowner")
        .help("Grid has at least one owner"),
    ConditionDefinition::new("ownedby", owned_by)
        .inverted_by("notownedby")
        .with_parameter()
        .help("Grid is owned by <player name|identity id|nobody>"),
    ConditionDefinition::new("factiontag", faction_tag)
        .inverted_by("notfactiontag")
        .with_parameter()
        .help("An owner of the grid belongs to faction <tag>"),
    ConditionDefinition::new("ownerinactive", owner_inactive)
        .inverted_by("owneractive")
        .with_parameter()
        .help("Every owner has been offline for at least <days>"),
];

impl ConditionModule for OwnershipConditions {
    fn name(&self) -> &'static str {
        "ownership"
    }

    fn conditions(&self) -> Result<Vec<ConditionDefinition>, RegistryError> {
        Ok(CONDITIONS.to_vec())
    }
}

fn has_owner(grid: &Grid, _param: Option<&str>, _ctx: &ScanContext) -> TriState {
    (!grid.owners.is_empty()).into()
}

fn owned_by(grid: &Grid, param: Option<&str>, ctx: &ScanContext) -> TriState {
    let Some(query) = param else {
        return TriState::Unknown;
    };

    if query.eq_ignore_ascii_case(NOBODY) {
        return grid.owners.is_empty().into();
    }

    match ctx.find_player(query) {
        Some((id, _)) => grid.owners.contains(&id).into(),
        None => {
            log::debug!("ownedby: no player matches '{}'", query);
            TriState::Unknown
        }
    }
}

fn faction_tag(grid: &Grid, param: Option<&str>, ctx: &ScanContext) -> TriState {
    param
        .map(|tag| {
            grid.owners.iter().any(|owner| {
                ctx.faction_of(*owner)
                    .map(|f| f.tag.eq_ignore_ascii_case(tag))
                    .unwrap_or(false)
            })
        })
        .into()
}

// unowned grids have no owner activity to judge
fn owner_inactive(grid: &Grid, param: Option<&str>, ctx: &ScanContext) -> TriState {
    let Some(days) = parse_finite(param) else {
        return TriState::Unknown;
    };
    if grid.owners.is_empty() {
        return TriState::Unknown;
    }

    let inactive = grid.owners.iter().all(|owner| match ctx.player(*owner) {
        Some(player) if player.online => false,
        Some(player) => player
            .last_login
            .map(|seen| elapsed_days(ctx.now, seen) >= days)
            .unwrap_or(true),
        // identity no longer exists
        None => true,
    });

    inactive.into()
}
