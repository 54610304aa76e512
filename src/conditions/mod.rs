//! condition engine for grid scans
//!
//! provides:
//! - a registry of named conditions, collected once from condition modules
//! - a parser turning operator tokens into an ordered conjunction of
//!   bound predicates (one optional parameter per condition)
//! - tri-state evaluation (true / false / unknown), where unknown fails
//!
//! conditions can be negated through their invert command, e.g. `haspower`
//! and `nopower`.

pub mod builtin;
mod context;
mod parser;
mod registry;
mod types;

pub use context::ScanContext;
pub use parser::{parse_conditions, ParseError};
pub use registry::{get_all, initialize, ConditionModule, Registry, RegistryError};
pub use types::{BoundPredicate, ConditionDefinition, PredicateFn, TriState};
