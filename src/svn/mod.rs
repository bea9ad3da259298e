//! SVN client abstraction layer
//!
//! The tool never links against Subversion; every remote operation is a
//! shell invocation of the external client. This module provides the
//! [SvnClient] trait over the five commands the pipeline needs, with two
//! implementations:
//!
//! - [command::CommandClient]: runs the system client as a subprocess
//! - [mock::MockSvnClient]: a recording implementation for testing
//!
//! Most code should depend on the [SvnClient] trait rather than the
//! concrete implementations.
//!
//! The client signals "object doesn't exist" and "operation rejected"
//! through the same failure channel, distinguished only by an error code
//! embedded in the output. [classify] hides that sniffing so the rest of
//! the crate depends on a [FailureKind], never on tool-specific text.

pub mod command;
pub mod mock;

pub use command::CommandClient;
pub use mock::MockSvnClient;

use crate::error::{Result, SvnTagError};

/// Error code the SVN client reports for a repository path that does
/// not exist.
pub const PATH_NOT_FOUND_CODE: &str = "E160013";

/// Classification of a failed repository command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The addressed repository path does not exist. Expected during
    /// delete-before-create and first-run listings; callers downgrade
    /// it to a no-op.
    PathNotFound,
    /// Any other failure. Always fatal.
    Other,
}

/// Classifies a failure by matching the recognized "path not found"
/// code in the command's failure payload.
pub fn classify(error: &SvnTagError) -> FailureKind {
    match error {
        SvnTagError::Execution { message, output } => {
            let code = PATH_NOT_FOUND_CODE.to_lowercase();
            if message.to_lowercase().contains(&code) || output.to_lowercase().contains(&code) {
                FailureKind::PathNotFound
            } else {
                FailureKind::Other
            }
        }
        _ => FailureKind::Other,
    }
}

/// Common repository operation trait for abstraction
///
/// All implementors must be `Send + Sync`. Methods return the raw
/// textual output of the underlying command on success; failures are
/// [SvnTagError::Execution] values suitable for [classify].
pub trait SvnClient: Send + Sync {
    /// List the entries under a repository URL.
    fn list(&self, url: &str) -> Result<String>;

    /// Create a folder at a repository URL with a commit message.
    fn mkdir(&self, url: &str, message: &str) -> Result<String>;

    /// Delete a repository path with a commit message.
    fn delete(&self, url: &str, message: &str) -> Result<String>;

    /// Server-side copy of one repository path onto another.
    fn copy(&self, from: &str, to: &str, message: &str) -> Result<String>;

    /// Import a local file or folder into a repository URL.
    fn import(&self, local_path: &str, url: &str, message: &str) -> Result<String>;
}
