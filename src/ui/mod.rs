//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - The prompt service and its console implementation
//! - `mock` - A scripted prompt service for tests

use std::io::{self, Write};

use console::Style;
use regex::Regex;

use crate::error::Result;

pub mod formatter;
pub mod mock;

// Re-export for convenience
pub use formatter::{
    display_error, display_exec, display_info, display_status, display_success, display_warning,
};
pub use mock::ScriptedPrompter;

/// Interactive prompt service.
///
/// Callers supply the prompt text and a pattern of recognized answers;
/// implementations return a raw trimmed answer string. The console
/// implementation re-asks until the answer matches the pattern, so an
/// empty pattern match is how "just press Enter" defaults get through.
pub trait Prompter {
    /// Ask a question and return the first accepted answer.
    fn ask(&self, prompt: &str, accept: &Regex) -> Result<String>;

    /// Ask a yes/no question; an empty answer takes `default_yes`.
    fn confirm(&self, prompt: &str, default_yes: bool) -> Result<bool> {
        let suffix = if default_yes { "[Y/n]" } else { "[y/N]" };
        let answer = self.ask(&format!("{} {}", prompt, suffix), &yes_no_pattern())?;
        Ok(match answer.to_lowercase().as_str() {
            "" => default_yes,
            "y" | "yes" => true,
            _ => false,
        })
    }
}

/// Pattern of recognized yes/no answers, empty included.
pub fn yes_no_pattern() -> Regex {
    Regex::new(r"(?i)^(y|yes|n|no)?$").expect("yes/no answer pattern")
}

/// Prompt service reading answers from standard input.
pub struct ConsolePrompter;

impl Prompter for ConsolePrompter {
    fn ask(&self, prompt: &str, accept: &Regex) -> Result<String> {
        let prompt_style = Style::new().cyan();
        loop {
            print!("{} ", prompt_style.apply_to(prompt));
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;
            let answer = input.trim().to_string();

            if accept.is_match(&answer) {
                return Ok(answer);
            }
            formatter::display_warning(&format!("Unrecognised answer '{}'.", answer));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yes_no_pattern() {
        let pattern = yes_no_pattern();
        for answer in ["", "y", "Y", "yes", "n", "NO"] {
            assert!(pattern.is_match(answer), "should accept '{}'", answer);
        }
        for answer in ["maybe", "yess", "0"] {
            assert!(!pattern.is_match(answer), "should reject '{}'", answer);
        }
    }
}
