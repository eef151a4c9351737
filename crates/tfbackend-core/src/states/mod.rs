//! State handlers
//!
//! Each handler performs its control-plane and prompt calls, updates the
//! context and returns the next state. No error leaves a handler.

pub(crate) mod billing;
pub(crate) mod bucket;
pub(crate) mod prerequisites;
pub(crate) mod project;
pub(crate) mod success;

/// Answer of a free-text prompt, falling back to `default` when blank
pub(crate) fn or_default(answer: String, default: &str) -> String {
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}
