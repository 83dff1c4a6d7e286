use crate::core::errors::Result;

/// Port for collecting required fields that were not passed as flags.
///
/// Command ask-steps depend on this instead of a terminal, so they are
/// testable with a scripted implementation.
pub trait Prompter: Send + Sync {
    /// Ask for a free-form value.
    fn input(&self, prompt: &str, help: &str) -> Result<String>;

    /// Ask for a value that must not be echoed.
    fn secret(&self, prompt: &str, help: &str) -> Result<String>;

    /// Ask the user to pick one of `options`.
    fn select(&self, prompt: &str, help: &str, options: &[String]) -> Result<String>;
}
