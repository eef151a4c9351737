//! dialoguer-backed prompter for interactive sessions

use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use std::io;
use tfbackend_core::{PromptError, Prompter, Tone};

pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

/// Ctrl-C and closed input cancel the prompt; anything else is a terminal failure
fn prompt_error(err: dialoguer::Error) -> PromptError {
    let dialoguer::Error::IO(e) = err;
    match e.kind() {
        io::ErrorKind::Interrupted | io::ErrorKind::UnexpectedEof => PromptError::Cancelled,
        _ => PromptError::Terminal(e.to_string()),
    }
}

impl Prompter for TerminalPrompter {
    fn select(&mut self, message: &str, items: &[String]) -> Result<Option<usize>, PromptError> {
        Select::with_theme(&self.theme)
            .with_prompt(message)
            .items(items)
            .default(0)
            .interact_opt()
            .map_err(prompt_error)
    }

    fn input(&mut self, message: &str, default: Option<&str>) -> Result<String, PromptError> {
        let mut input = Input::<String>::with_theme(&self.theme).with_prompt(message);
        match default {
            Some(default) => input = input.default(default.to_string()),
            None => input = input.allow_empty(true),
        }
        input.interact_text().map_err(prompt_error)
    }

    fn confirm(&mut self, message: &str) -> Result<bool, PromptError> {
        Confirm::with_theme(&self.theme)
            .with_prompt(message)
            .default(false)
            .interact()
            .map_err(prompt_error)
    }

    fn notify(&mut self, tone: Tone, message: &str) {
        match tone {
            Tone::Heading => println!("\n{}", message.bold().blue()),
            Tone::Info => println!("{}", message),
            Tone::Step => println!("{}", message.dimmed()),
            Tone::Success => println!("{}", message.green()),
            Tone::Warning => println!("{}", message.yellow()),
            Tone::Error => eprintln!("{}", message.red()),
        }
    }
}
