//! condition registry
//!
//! conditions live in independent modules. each module implements
//! [`ConditionModule`] and is listed once in [`super::builtin::MODULES`];
//! the registry walks that list a single time and keeps the result for the
//! lifetime of the process.

use std::collections::HashMap;

use strsim::levenshtein;

use super::builtin;
use super::types::ConditionDefinition;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("condition module '{module}' is unavailable: {reason}")]
    ModuleUnavailable { module: String, reason: String },
    #[error("condition name '{name}' is used by both '{first}' and '{second}'")]
    DuplicateCommand {
        name: String,
        first: String,
        second: String,
    },
}

/// a source of condition definitions
pub trait ConditionModule: Sync {
    fn name(&self) -> &'static str;

    /// list the module's conditions
    fn conditions(&self) -> Result<Vec<ConditionDefinition>, RegistryError>;
}

/// the authoritative list of conditions, in registration order
#[derive(Debug, Default)]
pub struct Registry {
    definitions: Vec<ConditionDefinition>,
}

impl Registry {
    /// collect definitions from every module
    ///
    /// a module that fails to list its conditions is skipped. a name claimed
    /// twice, as command or invert command, fails the whole registry.
    pub fn discover(modules: &[&dyn ConditionModule]) -> Result<Self, RegistryError> {
        let mut definitions = Vec::new();
        // lowercase name -> owning command
        let mut claimed: HashMap<String, &'static str> = HashMap::new();

        for module in modules {
            let listed = match module.conditions() {
                Ok(listed) => listed,
                Err(e) => {
                    log::warn!("skipping condition module '{}': {}", module.name(), e);
                    continue;
                }
            };

            for definition in listed {
                let names = std::iter::once(definition.command).chain(definition.invert_command);
                for name in names {
                    if let Some(first) = claimed.insert(name.to_lowercase(), definition.command) {
                        return Err(RegistryError::DuplicateCommand {
                            name: name.to_string(),
                            first: first.to_string(),
                            second: definition.command.to_string(),
                        });
                    }
                }
                definitions.push(definition);
            }

            log::debug!("registered condition module '{}'", module.name());
        }

        Ok(Self { definitions })
    }

    pub fn all(&self) -> &[ConditionDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// resolve a token to a definition and whether it selects the inverted form
    ///
    /// every definition's command is checked before its invert command, in
    /// registration order; the first match wins
    pub fn lookup(&self, token: &str) -> Option<(ConditionDefinition, bool)> {
        self.definitions.iter().find_map(|def| {
            if def.matches_command(token) {
                Some((*def, false))
            } else if def.matches_invert_command(token) {
                Some((*def, true))
            } else {
                None
            }
        })
    }

    /// true if the token names any condition, in either form
    pub fn is_condition_name(&self, token: &str) -> bool {
        self.definitions.iter().any(|def| def.is_named(token))
    }

    /// closest condition name within the given edit distance
    pub fn suggest(&self, token: &str, threshold: usize) -> Option<&'static str> {
        let token = token.to_lowercase();

        self.definitions
            .iter()
            .flat_map(|def| std::iter::once(def.command).chain(def.invert_command))
            .map(|name| (name, levenshtein(&token, &name.to_lowercase())))
            .filter(|(_, distance)| *distance <= threshold)
            .min_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)))
            .map(|(name, _)| name)
    }
}

lazy_static::lazy_static! {
    /// process-wide registry, built once on first use
    static ref REGISTRY: Result<Registry, RegistryError> = Registry::discover(builtin::MODULES);
}

/// build the process-wide registry, or return it if already built
pub fn initialize() -> Result<&'static Registry, RegistryError> {
    REGISTRY.as_ref().map_err(Clone::clone)
}

/// every registered condition; empty if the registry failed to build
pub fn get_all() -> &'static [ConditionDefinition] {
    match initialize() {
        Ok(registry) => registry.all(),
        Err(e) => {
            log::error!("condition registry unavailable: {}", e);
            &[]
        }
    }
}
