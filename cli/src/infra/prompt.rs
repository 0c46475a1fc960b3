//! Terminal implementation of the `Prompter` port, backed by `dialoguer`.

use anyhow::Result;

use crate::application::ports::Prompter;

/// Prompts on the terminal unless running non-interactively.
///
/// In non-interactive mode (`--yes`, `CI`, `AGENTBOX_YES`) every prompt
/// resolves to its default without reading input; free-text prompts resolve
/// to an empty string.
pub struct DialoguerPrompter {
    non_interactive: bool,
}

impl DialoguerPrompter {
    #[must_use]
    pub fn new(non_interactive: bool) -> Self {
        Self { non_interactive }
    }
}

impl Prompter for DialoguerPrompter {
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }

    fn select(&self, prompt: &str, items: &[&str], default: usize) -> Result<usize> {
        if self.non_interactive {
            return Ok(default);
        }
        let picked = dialoguer::Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()?;
        Ok(picked)
    }

    fn input(&self, prompt: &str) -> Result<String> {
        if self.non_interactive {
            return Ok(String::new());
        }
        let answer = dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer)
    }
}
