//! Runguard - docker run argument screening
//!
//! Rejects a user-supplied string of extra `docker run` flags when it carries
//! shell injection patterns, before the string reaches a container launch.

pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod harness;
pub mod sanitizer;
pub mod ui;

pub use error::{RunguardError, RunguardResult};
pub use sanitizer::{check, validate, Rule, Verdict};
