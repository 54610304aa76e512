//! pilot, age and movement conditions

use super::{elapsed_days, parse_finite};
use crate::conditions::context::ScanContext;
use crate::conditions::registry::{ConditionModule, RegistryError};
use crate::conditions::types::{ConditionDefinition, TriState};
use crate::world::Grid;

pub struct ActivityConditions;

static CONDITIONS: &[ConditionDefinition] = &[
    ConditionDefinition::new("haspilot", piloted)
        .help("Grid has a pilot; also disables the default unpiloted filter"),
    ConditionDefinition::new("minage", min_age)
        .inverted_by("maxage")
        .with_parameter()
        .help("Grid was built at least <days> ago"),
    ConditionDefinition::new("speedgreaterthan", speed_greater_than)
        .inverted_by("speedlessthan")
        .with_parameter()
        .help("Grid moves faster than <m/s>"),
    ConditionDefinition::new("playerdistancegreaterthan", player_distance_greater_than)
        .inverted_by("playerdistancelessthan")
        .with_parameter()
        .help("No online player is within <metres> of the grid"),
];

impl ConditionModule for ActivityConditions {
    fn name(&self) -> &'static str {
        "activity"
    }

    fn conditions(&self) -> Result<Vec<ConditionDefinition>, RegistryError> {
        Ok(CONDITIONS.to_vec())
    }
}

fn piloted(grid: &Grid, _param: Option<&str>, _ctx: &ScanContext) -> TriState {
    grid.piloted.into()
}

pub(super) fn unpiloted(grid: &Grid, _param: Option<&str>, _ctx: &ScanContext) -> TriState {
    (!grid.piloted).into()
}

fn min_age(grid: &Grid, param: Option<&str>, ctx: &ScanContext) -> TriState {
    let (Some(days), Some(created)) = (parse_finite(param), grid.created_at) else {
        return TriState::Unknown;
    };

    (elapsed_days(ctx.now, created) >= days).into()
}

fn speed_greater_than(grid: &Grid, param: Option<&str>, _ctx: &ScanContext) -> TriState {
    parse_finite(param)
        .map(|limit| grid.speed > limit)
        .into()
}

fn player_distance_greater_than(grid: &Grid, param: Option<&str>, ctx: &ScanContext) -> TriState {
    parse_finite(param)
        .map(|distance| {
            ctx.online_player_positions()
                .all(|pos| grid.distance_to(pos) > distance)
        })
        .into()
}
