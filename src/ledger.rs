//! The version ledger: which versions are already tagged.

use semver::Version;

use crate::error::Result;
use crate::svn::{classify, FailureKind, SvnClient};

/// Loads the versions currently tagged under `tag_url`, sorted oldest
/// to newest by semantic-version precedence.
///
/// Listing entries that do not parse as semantic versions (build
/// artifacts, stray folders, pointer folders like `latest`) are dropped
/// silently. A tag directory that does not exist yet is a valid
/// zero-version outcome, not a failure.
pub fn load_versions(client: &dyn SvnClient, tag_url: &str) -> Result<Vec<Version>> {
    let listing = match client.list(tag_url) {
        Ok(listing) => listing,
        Err(error) if classify(&error) == FailureKind::PathNotFound => String::new(),
        Err(error) => return Err(error),
    };

    let mut versions: Vec<Version> = listing
        .split_whitespace()
        .map(|entry| entry.trim_end_matches('/'))
        .filter_map(|name| Version::parse(name).ok())
        .collect();
    versions.sort();
    Ok(versions)
}
