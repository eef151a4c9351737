//! Operator interaction seam

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptError {
    /// The operator interrupted the prompt (Ctrl-C, Esc, EOF)
    #[error("Prompt cancelled by operator")]
    Cancelled,

    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// How a status line should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Heading,
    Info,
    Step,
    Success,
    Warning,
    Error,
}

/// Prompt/selection service used by the workflow
///
/// All calls block until the operator answers.
pub trait Prompter {
    /// Numbered single choice; `Ok(None)` when the operator quits the menu
    fn select(&mut self, message: &str, items: &[String]) -> Result<Option<usize>, PromptError>;

    /// Free-text prompt; an empty answer yields `default` when given
    fn input(&mut self, message: &str, default: Option<&str>) -> Result<String, PromptError>;

    /// Yes/no confirmation, defaulting to no
    fn confirm(&mut self, message: &str) -> Result<bool, PromptError>;

    /// Show a status line
    fn notify(&mut self, tone: Tone, message: &str);
}
