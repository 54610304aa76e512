//! conditions on a grid's name, size and blocks

use std::collections::HashMap;
use std::sync::Mutex;

use regex::{Regex, RegexBuilder};

use super::parse_param;
use crate::conditions::context::ScanContext;
use crate::conditions::registry::{ConditionModule, RegistryError};
use crate::conditions::types::{ConditionDefinition, TriState};
use crate::world::{Grid, GridSize};

pub struct StructureConditions;

static CONDITIONS: &[ConditionDefinition] = &[
    ConditionDefinition::new("name", name_matches)
        .inverted_by("notname")
        .with_parameter()
        .help("Grid name matches <regex> (case-insensitive)"),
    ConditionDefinition::new("blockslessthan", blocks_less_than)
        .inverted_by("blocksgreaterthan")
        .with_parameter()
        .help("Grid has fewer than <count> blocks"),
    ConditionDefinition::new("pculessthan", pcu_less_than)
        .inverted_by("pcugreaterthan")
        .with_parameter()
        .help("Grid uses less than <pcu> PCU"),
    ConditionDefinition::new("hastype", has_type)
        .inverted_by("notype")
        .with_parameter()
        .help("Grid has a block of type <type>"),
    ConditionDefinition::new("hassubtype", has_subtype)
        .inverted_by("nosubtype")
        .with_parameter()
        .help("Grid has a block of subtype <subtype>"),
    ConditionDefinition::new("isstatic", is_static)
        .inverted_by("isdynamic")
        .help("Grid is a station (static)"),
    ConditionDefinition::new("largegrid", is_large)
        .inverted_by("smallgrid")
        .help("Grid is large-grid"),
    ConditionDefinition::new("haspower", has_power)
        .inverted_by("nopower")
        .help("Grid has a working power source"),
];

impl ConditionModule for StructureConditions {
    fn name(&self) -> &'static str {
        "structure"
    }

    fn conditions(&self) -> Result<Vec<ConditionDefinition>, RegistryError> {
        Ok(CONDITIONS.to_vec())
    }
}

fn name_matches(grid: &Grid, param: Option<&str>, _ctx: &ScanContext) -> TriState {
    let Some(pattern) = param else {
        return TriState::Unknown;
    };

    compiled_pattern(pattern)
        .map(|re| re.is_match(&grid.display_name))
        .into()
}

lazy_static::lazy_static! {
    /// compiled name patterns, None for patterns that failed to compile
    static ref NAME_PATTERNS: Mutex<HashMap<String, Option<Regex>>> = Mutex::new(HashMap::new());
}

/// case-insensitive regex for a pattern, compiled once per process
fn compiled_pattern(pattern: &str) -> Option<Regex> {
    let mut cache = match NAME_PATTERNS.lock() {
        Ok(cache) => cache,
        Err(poisoned) => poisoned.into_inner(),
    };

    if let Some(compiled) = cache.get(pattern) {
        return compiled.clone();
    }

    let compiled = match RegexBuilder::new(pattern).case_insensitive(true).build() {
        Ok(re) => Some(re),
        Err(e) => {
            log::debug!("invalid name pattern '{}': {}", pattern, e);
            None
        }
    };
    cache.insert(pattern.to_string(), compiled.clone());
    compiled
}

fn blocks_less_than(grid: &Grid, param: Option<&str>, _ctx: &ScanContext) -> TriState {
    parse_param::<u32>(param)
        .map(|limit| grid.block_count < limit)
        .into()
}

fn pcu_less_than(grid: &Grid, param: Option<&str>, _ctx: &ScanContext) -> TriState {
    parse_param::<u32>(param).map(|limit| grid.pcu < limit).into()
}

fn has_type(grid: &Grid, param: Option<&str>, _ctx: &ScanContext) -> TriState {
    param
        .map(|t| grid.blocks.iter().any(|b| b.type_id.eq_ignore_ascii_case(t)))
        .into()
}

fn has_subtype(grid: &Grid, param: Option<&str>, _ctx: &ScanContext) -> TriState {
    param
        .map(|t| grid.blocks.iter().any(|b| b.subtype_id.eq_ignore_ascii_case(t)))
        .into()
}

fn is_static(grid: &Grid, _param: Option<&str>, _ctx: &ScanContext) -> TriState {
    grid.is_static.into()
}

fn is_large(grid: &Grid, _param: Option<&str>, _ctx: &ScanContext) -> TriState {
    (grid.grid_size == GridSize::Large).into()
}

fn has_power(grid: &Grid, _param: Option<&str>, _ctx: &ScanContext) -> TriState {
    grid.powered.into()
}
