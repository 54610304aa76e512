//! built-in condition catalogue
//!
//! every predicate module is listed in [`MODULES`]; the registry reads this
//! table once at startup.

pub mod activity;
pub mod ownership;
pub mod structure;

use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::registry::ConditionModule;
use super::types::ConditionDefinition;

/// all built-in condition modules, in registration order
pub static MODULES: &[&dyn ConditionModule] = &[
    &activity::ActivityConditions,
    &structure::StructureConditions,
    &ownership::OwnershipConditions,
];

/// naming this condition disables the implicit "not piloted" filter
pub const PILOT_OVERRIDE_COMMAND: &str = "haspilot";

/// implicit last conjunct: the grid has nobody at the controls
pub const DEFAULT_UNPILOTED: ConditionDefinition =
    ConditionDefinition::new("unpiloted", activity::unpiloted)
        .help("Grid has no pilot (applied unless 'haspilot' is given)");

/// parse a parameter token, None when absent or malformed
pub(crate) fn parse_param<T: FromStr>(param: Option<&str>) -> Option<T> {
    param.and_then(|p| p.trim().parse().ok())
}

/// parse a numeric parameter, None unless it is a finite number
///
/// NaN compares false against everything, which inversion would turn into
/// a match on every grid.
pub(crate) fn parse_finite(param: Option<&str>) -> Option<f64> {
    parse_param::<f64>(param).filter(|v| v.is_finite())
}

/// fractional days between two instants
pub(crate) fn elapsed_days(now: DateTime<Utc>, since: DateTime<Utc>) -> f64 {
    (now - since).num_seconds() as f64 / 86_400.0
}
