//! Rules command - list validation rules in evaluation order

use crate::error::RunguardResult;
use crate::sanitizer::RULES;
use crate::ui::{self, UiContext};

/// Execute the rules command
pub async fn execute() -> RunguardResult<()> {
    let ctx = UiContext::detect();
    ui::intro(&ctx, "Validation rules (first match rejects)");

    for (i, rule) in RULES.iter().enumerate() {
        ui::section(&ctx, &format!("{}. {}", i + 1, rule.id()));
        ui::key_value(&ctx, "rejects", rule.description());
        ui::key_value(&ctx, "hint", rule.hint());
    }

    Ok(())
}
