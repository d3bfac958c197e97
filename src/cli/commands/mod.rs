//! CLI command implementations

pub mod argv;
pub mod check;
pub mod completions;
pub mod config;
pub mod rules;
pub mod validate;

pub use argv::execute as argv;
pub use check::execute as check;
pub use completions::execute as completions;
pub use config::execute as config;
pub use rules::execute as rules;
pub use validate::execute as validate;
