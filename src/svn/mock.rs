use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{Result, SvnTagError};
use crate::svn::{SvnClient, PATH_NOT_FOUND_CODE};

/// One recorded repository operation, in issue order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SvnOp {
    List {
        url: String,
    },
    Mkdir {
        url: String,
        message: String,
    },
    Delete {
        url: String,
        message: String,
    },
    Copy {
        from: String,
        to: String,
        message: String,
    },
    Import {
        path: String,
        url: String,
        message: String,
    },
}

/// How a scripted failure presents itself to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    /// The failure payload carries the recognized path-not-found code.
    PathNotFound,
    /// A generic rejected operation.
    Rejected,
}

/// Mock client for testing without a repository.
///
/// Records every operation in order, serves a canned listing, and can
/// be scripted to fail specific operations on specific paths.
pub struct MockSvnClient {
    listing: String,
    failures: HashMap<(String, String), MockFailure>,
    ops: Mutex<Vec<SvnOp>>,
}

impl MockSvnClient {
    /// Create a mock whose tag directory lists as empty
    pub fn new() -> Self {
        Self::with_listing("")
    }

    /// Create a mock serving `listing` for every list operation
    pub fn with_listing(listing: impl Into<String>) -> Self {
        MockSvnClient {
            listing: listing.into(),
            failures: HashMap::new(),
            ops: Mutex::new(Vec::new()),
        }
    }

    /// Script `op` ("list", "mkdir", "delete", "copy", "import") to fail
    /// whenever it addresses `path`.
    pub fn fail_with(&mut self, op: &str, path: &str, failure: MockFailure) {
        self.failures
            .insert((op.to_string(), path.to_string()), failure);
    }

    /// Every operation issued so far, in order.
    pub fn ops(&self) -> Vec<SvnOp> {
        self.ops.lock().expect("mock op log poisoned").clone()
    }

    fn record(&self, op: SvnOp) {
        self.ops.lock().expect("mock op log poisoned").push(op);
    }

    fn scripted_failure(&self, op: &str, paths: &[&str]) -> Option<SvnTagError> {
        for path in paths {
            if let Some(failure) = self.failures.get(&(op.to_string(), path.to_string())) {
                return Some(synthesize(*failure, op, path));
            }
        }
        None
    }
}

impl Default for MockSvnClient {
    fn default() -> Self {
        Self::new()
    }
}

fn synthesize(failure: MockFailure, op: &str, path: &str) -> SvnTagError {
    match failure {
        MockFailure::PathNotFound => SvnTagError::execution(
            format!("svn {} exited with exit status: 1", op),
            format!("svn: {}: '{}' path not found", PATH_NOT_FOUND_CODE, path),
        ),
        MockFailure::Rejected => SvnTagError::execution(
            format!("svn {} exited with exit status: 1", op),
            format!("svn: E175002: operation on '{}' rejected", path),
        ),
    }
}

impl SvnClient for MockSvnClient {
    fn list(&self, url: &str) -> Result<String> {
        self.record(SvnOp::List {
            url: url.to_string(),
        });
        match self.scripted_failure("list", &[url]) {
            Some(err) => Err(err),
            None => Ok(self.listing.clone()),
        }
    }

    fn mkdir(&self, url: &str, message: &str) -> Result<String> {
        self.record(SvnOp::Mkdir {
            url: url.to_string(),
            message: message.to_string(),
        });
        match self.scripted_failure("mkdir", &[url]) {
            Some(err) => Err(err),
            None => Ok(String::new()),
        }
    }

    fn delete(&self, url: &str, message: &str) -> Result<String> {
        self.record(SvnOp::Delete {
            url: url.to_string(),
            message: message.to_string(),
        });
        match self.scripted_failure("delete", &[url]) {
            Some(err) => Err(err),
            None => Ok(String::new()),
        }
    }

    fn copy(&self, from: &str, to: &str, message: &str) -> Result<String> {
        self.record(SvnOp::Copy {
            from: from.to_string(),
            to: to.to_string(),
            message: message.to_string(),
        });
        match self.scripted_failure("copy", &[from, to]) {
            Some(err) => Err(err),
            None => Ok(String::new()),
        }
    }

    fn import(&self, local_path: &str, url: &str, message: &str) -> Result<String> {
        self.record(SvnOp::Import {
            path: local_path.to_string(),
            url: url.to_string(),
            message: message.to_string(),
        });
        match self.scripted_failure("import", &[local_path, url]) {
            Some(err) => Err(err),
            None => Ok(String::new()),
        }
    }
}
