//! Docker run argument sanitizer
//!
//! Screens a user-supplied string of extra `docker run` flags for shell
//! injection patterns. The string is split on whitespace and every token is
//! run through [`RULES`] in order; the first violation rejects the whole
//! string. Validation is pure: no I/O, no retained state.
//!
//! The accepted string is forwarded as an argument vector, never re-parsed by
//! a shell, so these checks are pattern screens rather than a shell grammar.

mod rules;

pub use rules::{Rule, RULES};

use crate::error::{RunguardError, RunguardResult};
use serde::Serialize;
use std::fmt;

/// Outcome of validating one raw argument string
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "lowercase")]
pub enum Verdict {
    Accept,
    Reject { token: String, rule: Rule },
}

impl Verdict {
    pub fn is_accept(&self) -> bool {
        matches!(self, Verdict::Accept)
    }

    /// The rule that rejected the string, if any
    pub fn rule(&self) -> Option<Rule> {
        match self {
            Verdict::Accept => None,
            Verdict::Reject { rule, .. } => Some(*rule),
        }
    }

    /// Convert a rejection into [`RunguardError::InvalidArgument`]
    pub fn into_result(self) -> RunguardResult<()> {
        match self {
            Verdict::Accept => Ok(()),
            Verdict::Reject { token, rule } => Err(RunguardError::invalid_argument(token, rule)),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Accept => f.write_str("accept"),
            Verdict::Reject { token, rule } => write!(f, "reject '{}': {}", token, rule),
        }
    }
}

/// Split a raw argument string into the tokens the validator inspects.
///
/// Splits on ASCII whitespace and drops the empty pieces produced by
/// repeated separators.
pub fn tokenize(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(|c: char| c.is_ascii_whitespace())
        .filter(|token| !token.is_empty())
}

/// First rule that rejects `token`, in evaluation order
pub fn classify(token: &str) -> Option<Rule> {
    RULES.into_iter().find(|rule| rule.matches(token))
}

/// Validate a raw docker run argument string.
///
/// The empty string is always accepted.
pub fn validate(raw: &str) -> Verdict {
    for token in tokenize(raw) {
        if let Some(rule) = classify(token) {
            return Verdict::Reject {
                token: token.to_string(),
                rule,
            };
        }
    }
    Verdict::Accept
}

/// Validate and return the argument vector to forward to the container runtime
pub fn check(raw: &str) -> RunguardResult<Vec<String>> {
    validate(raw).into_result()?;
    Ok(tokenize(raw).map(str::to_string).collect())
}
