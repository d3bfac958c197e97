//! Terminal output helpers
//!
//! Styled status lines on an interactive terminal, plain bracketed markers
//! (`[OK]`, `[FAIL]`) in CI logs.

mod context;
mod output;

pub use context::UiContext;
pub use output::{
    intro, key_value, section, step_error_detail, step_ok, step_ok_detail, step_warn,
};
