use thiserror::Error;

/// Unified error type for svn-tag operations
#[derive(Error, Debug)]
pub enum SvnTagError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Version {0} already exists")]
    VersionConflict(semver::Version),

    #[error("svn command failed: {message}")]
    Execution { message: String, output: String },

    #[error("Transfer failed: {0}")]
    Transfer(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in svn-tag
pub type Result<T> = std::result::Result<T, SvnTagError>;

impl SvnTagError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        SvnTagError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        SvnTagError::Version(msg.into())
    }

    /// Create an execution error carrying the tool's raw output
    pub fn execution(message: impl Into<String>, output: impl Into<String>) -> Self {
        SvnTagError::Execution {
            message: message.into(),
            output: output.into(),
        }
    }

    /// Create a transfer error with context
    pub fn transfer(msg: impl Into<String>) -> Self {
        SvnTagError::Transfer(msg.into())
    }
}
