//! condition parser - turns operator tokens into bound predicates
//!
//! input is a flat conjunction: each token names a condition and may be
//! followed by one parameter token. there is no grouping, OR or nesting.
//!
//! a token following a condition is taken as its parameter unless it is
//! itself a condition name, in which case it starts the next condition.

use super::builtin::{DEFAULT_UNPILOTED, PILOT_OVERRIDE_COMMAND};
use super::registry::Registry;
use super::types::BoundPredicate;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unknown argument '{0}'")]
    UnknownArgument(String),
}

impl ParseError {
    /// the token that failed to resolve
    pub fn token(&self) -> &str {
        match self {
            ParseError::UnknownArgument(token) => token,
        }
    }
}

/// parse tokens into an ordered conjunction of predicates
///
/// unless some token is `haspilot`, a "has no pilot" predicate is appended
/// as the last conjunct.
///
/// # Errors
/// * `ParseError::UnknownArgument` - a token names no condition; nothing is
///   returned for the other tokens
pub fn parse_conditions<S: AsRef<str>>(
    args: &[S],
    registry: &Registry,
) -> Result<Vec<BoundPredicate>, ParseError> {
    let mut predicates = Vec::new();
    let mut i = 0;

    while i < args.len() {
        let arg = args[i].as_ref();

        let mut parameter = args.get(i + 1).map(|s| s.as_ref());
        if let Some(candidate) = parameter {
            if registry.is_condition_name(candidate) {
                // next token starts another condition
                parameter = None;
            } else {
                i += 1;
            }
        }

        let Some((definition, inverted)) = registry.lookup(arg) else {
            return Err(ParseError::UnknownArgument(arg.to_string()));
        };

        if parameter.is_some() && !definition.takes_parameter {
            log::debug!(
                "condition '{}' takes no parameter, ignoring '{}'",
                arg,
                parameter.unwrap_or_default()
            );
        }

        predicates.push(BoundPredicate::new(
            definition,
            parameter.map(str::to_string),
            inverted,
        ));
        i += 1;
    }

    let pilot_override = args
        .iter()
        .any(|a| a.as_ref().eq_ignore_ascii_case(PILOT_OVERRIDE_COMMAND));
    if !pilot_override {
        predicates.push(BoundPredicate::new(DEFAULT_UNPILOTED, None, false));
    }

    Ok(predicates)
}
