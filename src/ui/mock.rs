use std::collections::VecDeque;
use std::io;
use std::sync::Mutex;

use regex::Regex;

use crate::error::Result;
use crate::ui::Prompter;

/// Scripted prompt service for testing without a terminal.
///
/// Serves canned answers in order; accept patterns are ignored so tests
/// can exercise the callers' own invalid-input handling.
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<String>>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedPrompter {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
        }
    }

    /// True once every scripted answer has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.answers.lock().expect("scripted answers poisoned").is_empty()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&self, _prompt: &str, _accept: &Regex) -> Result<String> {
        self.answers
            .lock()
            .expect("scripted answers poisoned")
            .pop_front()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "scripted prompter ran out of answers",
                )
                .into()
            })
    }
}
