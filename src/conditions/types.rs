//! core types for the condition system

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use super::context::ScanContext;
use crate::world::Grid;

/// result of checking one condition against one grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriState {
    True,
    False,
    /// the parameter could not be interpreted or the condition does not apply
    Unknown,
}

impl TriState {
    /// swap True and False; Unknown stays Unknown
    pub fn invert_if(self, inverted: bool) -> Self {
        match (self, inverted) {
            (TriState::True, true) => TriState::False,
            (TriState::False, true) => TriState::True,
            (state, _) => state,
        }
    }

    /// only an explicit True passes a conjunction
    pub fn passes(self) -> bool {
        self == TriState::True
    }
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        if value {
            TriState::True
        } else {
            TriState::False
        }
    }
}

impl From<Option<bool>> for TriState {
    fn from(value: Option<bool>) -> Self {
        value.map(TriState::from).unwrap_or(TriState::Unknown)
    }
}

impl fmt::Display for TriState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriState::True => write!(f, "true"),
            TriState::False => write!(f, "false"),
            TriState::Unknown => write!(f, "unknown"),
        }
    }
}

/// predicate body: grid, optional parameter, scan context
pub type PredicateFn = fn(&Grid, Option<&str>, &ScanContext) -> TriState;

/// one named condition
#[derive(Clone, Copy)]
pub struct ConditionDefinition {
    /// case-insensitive name selecting the condition
    pub command: &'static str,
    /// case-insensitive name selecting the negated condition
    pub invert_command: Option<&'static str>,
    pub takes_parameter: bool,
    pub help: &'static str,
    pub predicate: PredicateFn,
}

impl ConditionDefinition {
    pub const fn new(command: &'static str, predicate: PredicateFn) -> Self {
        Self {
            command,
            invert_command: None,
            takes_parameter: false,
            help: "",
            predicate,
        }
    }

    pub const fn inverted_by(mut self, invert_command: &'static str) -> Self {
        self.invert_command = Some(invert_command);
        self
    }

    pub const fn with_parameter(mut self) -> Self {
        self.takes_parameter = true;
        self
    }

    pub const fn help(mut self, help: &'static str) -> Self {
        self.help = help;
        self
    }

    pub fn matches_command(&self, token: &str) -> bool {
        token.eq_ignore_ascii_case(self.command)
    }

    pub fn matches_invert_command(&self, token: &str) -> bool {
        self.invert_command
            .map(|name| token.eq_ignore_ascii_case(name))
            .unwrap_or(false)
    }

    /// true if the token selects this condition in either form
    pub fn is_named(&self, token: &str) -> bool {
        self.matches_command(token) || self.matches_invert_command(token)
    }

    pub fn evaluate(
        &self,
        grid: &Grid,
        parameter: Option<&str>,
        inverted: bool,
        ctx: &ScanContext,
    ) -> TriState {
        (self.predicate)(grid, parameter, ctx).invert_if(inverted)
    }
}

impl fmt::Debug for ConditionDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionDefinition")
            .field("command", &self.command)
            .field("invert_command", &self.invert_command)
            .field("takes_parameter", &self.takes_parameter)
            .finish()
    }
}

impl fmt::Display for ConditionDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command)?;
        if let Some(invert) = self.invert_command {
            write!(f, " / {}", invert)?;
        }
        if self.takes_parameter {
            write!(f, " <value>")?;
        }
        Ok(())
    }
}

/// a condition bound to its parameter, ready to run against grids
#[derive(Debug, Clone)]
pub struct BoundPredicate {
    pub definition: ConditionDefinition,
    pub parameter: Option<String>,
    pub inverted: bool,
}

impl BoundPredicate {
    pub fn new(definition: ConditionDefinition, parameter: Option<String>, inverted: bool) -> Self {
        Self {
            definition,
            parameter,
            inverted,
        }
    }

    /// name the operator used to select this predicate
    pub fn name(&self) -> &'static str {
        if self.inverted {
            self.definition
                .invert_command
                .unwrap_or(self.definition.command)
        } else {
            self.definition.command
        }
    }

    /// evaluate against one grid; a panicking predicate yields Unknown
    pub fn evaluate(&self, grid: &Grid, ctx: &ScanContext) -> TriState {
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            self.definition
                .evaluate(grid, self.parameter.as_deref(), self.inverted, ctx)
        }));

        match result {
            Ok(state) => state,
            Err(_) => {
                log::warn!(
                    "condition '{}' failed on grid '{}' ({}), treating as unknown",
                    self.name(),
                    grid.display_name,
                    grid.entity_id
                );
                TriState::Unknown
            }
        }
    }
}

impl fmt::Display for BoundPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parameter {
            Some(param) => write!(f, "{} {}", self.name(), param),
            None => write!(f, "{}", self.name()),
        }
    }
}
