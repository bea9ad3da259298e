//! Version resolution state machine.
//!
//! Determines the next version to tag: a custom version supplied up
//! front, an explicit version entered interactively, an automatic bump
//! of the latest tagged version, or an overwrite of an existing one.
//! States are an enum driven by an explicit transition loop so every
//! transition is independently testable; prompting goes through the
//! [Prompter] seam.

use regex::Regex;
use semver::Version;

use crate::config::Config;
use crate::error::Result;
use crate::ui::{formatter, Prompter};
use crate::version::{bump, parse_version, BumpKind, Directive};

/// The resolved `(version, overwrite)` pair downstream stages act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTarget {
    pub version: Version,
    pub overwrite: bool,
}

/// Terminal result of version resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Target(TagTarget),
    /// Clean operator-initiated stop; not an error.
    Quit,
}

enum State {
    Start,
    CustomVersionCheck(String),
    BumpQuery,
    VersionQuery { overwrite: bool },
    Done(Resolution),
}

/// Drives version selection against a ledger snapshot.
pub struct Resolver<'a> {
    ledger: &'a [Version],
    prompter: &'a dyn Prompter,
    default_bump: BumpKind,
    overwrite_allowed: bool,
    custom_version: Option<String>,
    bump_flag: Option<String>,
}

impl<'a> Resolver<'a> {
    pub fn new(ledger: &'a [Version], prompter: &'a dyn Prompter, config: &Config) -> Self {
        Resolver {
            ledger,
            prompter,
            default_bump: config.default_bump,
            overwrite_allowed: config.overwrite,
            custom_version: config.custom_version.clone(),
            bump_flag: config.bump.clone(),
        }
    }

    /// Runs the machine to a terminal state.
    pub fn resolve(mut self) -> Result<Resolution> {
        let mut state = State::Start;
        loop {
            state = match state {
                State::Start => self.start(),
                State::CustomVersionCheck(raw) => self.check_custom_version(&raw),
                State::BumpQuery => self.bump_query()?,
                State::VersionQuery { overwrite } => self.version_query(overwrite)?,
                State::Done(resolution) => return Ok(resolution),
            };
        }
    }

    fn start(&mut self) -> State {
        match self.custom_version.take() {
            Some(raw) => {
                formatter::display_status(&format!("Custom version was specified: {}", raw));
                State::CustomVersionCheck(raw)
            }
            None => {
                match self.ledger.last() {
                    Some(version) => formatter::display_status(&format!(
                        "Latest version found is: {}",
                        version
                    )),
                    None => formatter::display_status(
                        "Looks like you're creating the first build. So let's start from 0.0.0",
                    ),
                }
                State::BumpQuery
            }
        }
    }

    /// Baseline for automatic bumps.
    fn latest_version(&self) -> Version {
        match self.ledger.last() {
            Some(version) => version.clone(),
            None => Version::new(0, 0, 0),
        }
    }

    fn exists(&self, version: &Version) -> bool {
        self.ledger.contains(version)
    }

    fn check_custom_version(&self, raw: &str) -> State {
        let version = match parse_version(raw) {
            Ok(version) => version,
            Err(error) => {
                formatter::display_warning(&error.to_string());
                return self.quit();
            }
        };
        if self.exists(&version) {
            if self.overwrite_allowed {
                formatter::display_status(&format!("Overwriting version {}", version));
                State::Done(Resolution::Target(TagTarget {
                    version,
                    overwrite: true,
                }))
            } else {
                formatter::display_warning(&format!("Version {} already exists.", version));
                self.quit()
            }
        } else {
            formatter::display_status(&format!("Bumping to version {}", version));
            State::Done(Resolution::Target(TagTarget {
                version,
                overwrite: false,
            }))
        }
    }

    fn bump_query(&mut self) -> Result<State> {
        // The flag is consumed exactly once; if it is unusable, the
        // query falls back to prompting.
        let raw = match self.bump_flag.take() {
            Some(flag) => {
                formatter::display_status("Bump already specified. Checking.");
                flag
            }
            None => {
                let answer = self.prompter.ask(&self.bump_prompt(), &bump_pattern())?;
                if answer.is_empty() {
                    return Ok(self.apply_directive(Directive::Bump(self.default_bump)));
                }
                answer
            }
        };
        match raw.parse::<Directive>() {
            Ok(directive) => Ok(self.apply_directive(directive)),
            Err(_) => {
                formatter::display_warning("Unrecognised bump given. Querying for clarification.");
                Ok(State::BumpQuery)
            }
        }
    }

    fn apply_directive(&self, directive: Directive) -> State {
        match directive {
            Directive::Quit => self.quit(),
            Directive::Explicit => State::VersionQuery { overwrite: false },
            Directive::Overwrite => State::VersionQuery { overwrite: true },
            Directive::Bump(kind) => {
                let version = bump(&self.latest_version(), kind);
                formatter::display_status(&format!("Bumping to version {}", version));
                State::Done(Resolution::Target(TagTarget {
                    version,
                    overwrite: false,
                }))
            }
        }
    }

    fn version_query(&self, overwrite: bool) -> Result<State> {
        let answer = self.prompter.ask(
            "Enter version (e.g. 1.3.0-1), go [B]ack or [Q]uit",
            &version_pattern(),
        )?;
        match answer.to_lowercase().as_str() {
            "q" | "quit" => Ok(self.quit()),
            "b" | "back" => Ok(State::BumpQuery),
            _ => {
                let version = match parse_version(&answer) {
                    Ok(version) => version,
                    Err(error) => {
                        formatter::display_warning(&error.to_string());
                        return Ok(State::VersionQuery { overwrite });
                    }
                };
                if self.exists(&version) {
                    if overwrite {
                        formatter::display_status(&format!("Overwriting version {}", version));
                        Ok(State::Done(Resolution::Target(TagTarget {
                            version,
                            overwrite: true,
                        })))
                    } else {
                        // Explicit entry never silently overwrites.
                        formatter::display_warning(&format!(
                            "Version {} already exists.",
                            version
                        ));
                        Ok(State::VersionQuery { overwrite })
                    }
                } else {
                    formatter::display_status(&format!("Bumping to version {}", version));
                    Ok(State::Done(Resolution::Target(TagTarget {
                        version,
                        overwrite: false,
                    })))
                }
            }
        }
    }

    fn quit(&self) -> State {
        formatter::display_status("Quitting");
        State::Done(Resolution::Quit)
    }

    fn bump_prompt(&self) -> String {
        format!(
            "What do you wish to bump? [X].[Y].[Z] (or [PX].[PY].[PZ], or pre-release [PR])? \
             Or [Enter] for default ('{}'). Or give an [E]xplicit version. \
             Or [O]verwrite an existing version. Or [Q]uit.",
            self.default_bump
        )
    }
}

/// Recognized answers to the bump query; empty selects the default.
fn bump_pattern() -> Regex {
    Regex::new(
        r"(?i)^(p?[xyz]|pr|[eoq]|major|minor|patch|pre-major|pre-minor|pre-patch|pre-release|explicit|overwrite|quit)?$",
    )
    .expect("bump answer pattern")
}

/// Version-query answers are validated by the machine itself, so any
/// non-empty answer is accepted at the prompt.
fn version_pattern() -> Regex {
    Regex::new(r"^.+$").expect("version answer pattern")
}
