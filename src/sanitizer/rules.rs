//! Rejection rules for docker run argument tokens
//!
//! Each rule is a predicate over a single token. [`RULES`] lists them in
//! evaluation order; the first rule that fires names the rejection.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// `$` directly followed by something that starts a shell variable name
static BARE_VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$[A-Za-z_]").expect("bare variable pattern"));

/// Long flags whose name runs straight into `<`, `>` or `=`
static LONG_FLAG_WITH_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^--[A-Za-z0-9-]+[<>=]").expect("long flag pattern"));

/// `-f`, `--flag`, `--flag=anything`
static FLAG_GRAMMAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-{1,2}[A-Za-z0-9-]+(=.*)?$").expect("flag grammar pattern"));

/// Why a token was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    /// `;`, `&`, `|`, backtick or `$(`
    CommandChaining,
    /// `${...}` or `$NAME`
    VariableExpansion,
    /// `<` or `>` outside a `--flag<value` / `--flag=value` token
    Redirection,
    /// Token starts with `-` but is not `-x`, `--name` or `--name=value`
    MalformedFlag,
}

/// Rules in evaluation order
pub const RULES: [Rule; 4] = [
    Rule::CommandChaining,
    Rule::VariableExpansion,
    Rule::Redirection,
    Rule::MalformedFlag,
];

impl Rule {
    /// Stable identifier used in JSON output and case files
    pub fn id(self) -> &'static str {
        match self {
            Rule::CommandChaining => "command-chaining",
            Rule::VariableExpansion => "variable-expansion",
            Rule::Redirection => "redirection",
            Rule::MalformedFlag => "malformed-flag",
        }
    }

    /// Human-readable description of what the rule rejects
    pub fn description(self) -> &'static str {
        match self {
            Rule::CommandChaining => "command chaining or substitution",
            Rule::VariableExpansion => "shell variable expansion",
            Rule::Redirection => "unsafe redirection",
            Rule::MalformedFlag => "malformed flag syntax",
        }
    }

    /// Actionable advice shown next to a rejection
    pub fn hint(self) -> &'static str {
        match self {
            Rule::CommandChaining => {
                "Remove ; & | ` and $( ); pass only docker run flags and their values"
            }
            Rule::VariableExpansion => {
                "Expand variables in the workflow (e.g. ${{ env.NAME }}) before passing them"
            }
            Rule::Redirection => "Use --flag=value form; bare < and > are not allowed",
            Rule::MalformedFlag => "Flags must look like -x, --name or --name=value",
        }
    }

    /// Whether this rule rejects `token`
    pub fn matches(self, token: &str) -> bool {
        match self {
            Rule::CommandChaining => {
                token.contains([';', '&', '|', '`']) || token.contains("$(")
            }
            Rule::VariableExpansion => token.contains("${") || BARE_VARIABLE.is_match(token),
            Rule::Redirection => {
                token.contains(['<', '>']) && !LONG_FLAG_WITH_VALUE.is_match(token)
            }
            Rule::MalformedFlag => token.starts_with('-') && !FLAG_GRAMMAR.is_match(token),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
