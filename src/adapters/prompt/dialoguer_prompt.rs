use colored::Colorize;
use dialoguer::{Input, Password, Select};

use crate::core::errors::{Result, StratusError};
use crate::core::traits::prompter::Prompter;

/// Terminal prompter built on dialoguer.
///
/// Prints the help line dimmed above each prompt. Any interaction
/// failure (closed stdin, ctrl-c) surfaces as an input error.
pub struct DialoguerPrompter;

fn input_error(what: &str, e: dialoguer::Error) -> StratusError {
    StratusError::Input {
        detail: format!("failed to read {what}: {e}"),
    }
}

impl Prompter for DialoguerPrompter {
    fn input(&self, prompt: &str, help: &str) -> Result<String> {
        println!("  {}", help.dimmed());
        Input::<String>::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(|e| input_error(prompt, e))
    }

    fn secret(&self, prompt: &str, help: &str) -> Result<String> {
        println!("  {}", help.dimmed());
        Password::new()
            .with_prompt(prompt)
            .interact()
            .map_err(|e| input_error(prompt, e))
    }

    fn select(&self, prompt: &str, help: &str, options: &[String]) -> Result<String> {
        if options.is_empty() {
            return Err(StratusError::Input {
                detail: format!("nothing to select for '{prompt}'"),
            });
        }
        println!("  {}", help.dimmed());
        let index = Select::new()
            .with_prompt(prompt)
            .items(options)
            .default(0)
            .interact()
            .map_err(|e| input_error(prompt, e))?;
        Ok(options[index].clone())
    }
}
