//! Interactive prompts.

use dialoguer::console::Term;
use dialoguer::{Confirm, Select};

use crate::error::CliError;

/// Source of interactive answers.
pub trait Prompter {
    fn confirm(&self, message: &str) -> Result<bool, CliError>;

    /// Pick one of `items`; `None` when the prompt is dismissed.
    fn choose(&self, message: &str, items: &[String]) -> Result<Option<usize>, CliError>;
}

/// Prompts on the terminal's stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&self, message: &str) -> Result<bool, CliError> {
        Ok(Confirm::new()
            .with_prompt(message)
            .default(false)
            .interact_on(&Term::stderr())?)
    }

    fn choose(&self, message: &str, items: &[String]) -> Result<Option<usize>, CliError> {
        Ok(Select::new()
            .with_prompt(message)
            .items(items)
            .default(0)
            .interact_on_opt(&Term::stderr())?)
    }
}

/// Fixed answers, for non-interactive runs and tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    pub confirm: bool,
    pub choice: Option<usize>,
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, _message: &str) -> Result<bool, CliError> {
        Ok(self.confirm)
    }

    fn choose(&self, _message: &str, items: &[String]) -> Result<Option<usize>, CliError> {
        Ok(self.choice.filter(|i| *i < items.len()))
    }
}
