use std::process::Command;

use crate::error::{Result, SvnTagError};
use crate::svn::SvnClient;
use crate::ui::formatter;

/// Runs repository commands through the external client executable.
///
/// With `dry_run` set, every command short-circuits to an empty success
/// before the process is spawned; with `verbose` set, each invocation
/// and its outcome are echoed dim.
pub struct CommandClient {
    bin: String,
    dry_run: bool,
    verbose: bool,
}

impl CommandClient {
    pub fn new(bin: impl Into<String>, dry_run: bool, verbose: bool) -> Self {
        CommandClient {
            bin: bin.into(),
            dry_run,
            verbose,
        }
    }

    fn execute(&self, args: &[&str]) -> Result<String> {
        if self.verbose {
            formatter::display_exec(&format!("{} {}", self.bin, args.join(" ")));
        }
        if self.dry_run {
            return Ok(String::new());
        }

        let output = Command::new(&self.bin).args(args).output()?;
        if output.status.success() {
            if self.verbose {
                formatter::display_exec(&format!("{} ok", self.bin));
            }
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            let verb = args.first().copied().unwrap_or("");
            if self.verbose {
                formatter::display_exec(stderr.trim_end());
            }
            Err(SvnTagError::execution(
                format!("{} {} exited with {}", self.bin, verb, output.status),
                stderr,
            ))
        }
    }
}

impl SvnClient for CommandClient {
    fn list(&self, url: &str) -> Result<String> {
        self.execute(&["ls", url])
    }

    fn mkdir(&self, url: &str, message: &str) -> Result<String> {
        self.execute(&["mkdir", url, "-m", message])
    }

    fn delete(&self, url: &str, message: &str) -> Result<String> {
        self.execute(&["delete", url, "-m", message])
    }

    fn copy(&self, from: &str, to: &str, message: &str) -> Result<String> {
        self.execute(&["copy", from, to, "-m", message])
    }

    fn import(&self, local_path: &str, url: &str, message: &str) -> Result<String> {
        self.execute(&["import", local_path, url, "-m", message])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svn::{classify, FailureKind};

    #[test]
    fn test_dry_run_skips_execution() {
        // The binary does not exist; dry-run must succeed anyway.
        let client = CommandClient::new("definitely-not-an-svn-binary", true, false);
        assert_eq!(client.list("https://svn.example.com/tags").unwrap(), "");
        assert_eq!(client.mkdir("https://svn.example.com/tags/1.0.0", "m").unwrap(), "");
    }

    #[test]
    fn test_execute_captures_stdout() {
        let client = CommandClient::new("echo", false, false);
        let output = client.list("hello").unwrap();
        assert_eq!(output.trim_end(), "ls hello");
    }

    #[test]
    fn test_execute_failure_is_execution_error() {
        let client = CommandClient::new("false", false, false);
        let err = client.list("anything").unwrap_err();
        match &err {
            SvnTagError::Execution { message, .. } => {
                assert!(message.contains("false ls"), "message: {}", message);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(classify(&err), FailureKind::Other);
    }

    #[test]
    fn test_missing_binary_is_io_error() {
        let client = CommandClient::new("definitely-not-an-svn-binary", false, false);
        let err = client.list("anything").unwrap_err();
        assert!(matches!(err, SvnTagError::Io(_)));
    }
}
