//! The tag transaction: creating (or recreating) the remote tag folder.
//!
//! The remote store has no atomic create-or-replace and no locking, so
//! overwrite is a two-step delete-then-create. The delete tolerates a
//! path that has already vanished; the create never retries.

use semver::Version;

use crate::error::{Result, SvnTagError};
use crate::resolver::TagTarget;
use crate::svn::{classify, FailureKind, SvnClient};

/// Remote folder holding one finished tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFolder {
    pub url: String,
    pub version: Version,
}

/// Creates the folder `tag_url/<version>` for the resolved target.
///
/// Without overwrite, a version already present in the ledger snapshot
/// fails up front; the resolver should not have produced such a target,
/// so this is a defensive check. With overwrite, the existing folder is
/// deleted first; a delete that fails because the folder is already
/// gone (listed at startup, vanished since) is swallowed. Create
/// failures are always fatal.
pub fn create_tag_folder(
    client: &dyn SvnClient,
    tag_url: &str,
    target: &TagTarget,
    ledger: &[Version],
) -> Result<TagFolder> {
    let folder = format!("{}/{}", tag_url, target.version);

    if !target.overwrite && ledger.contains(&target.version) {
        return Err(SvnTagError::VersionConflict(target.version.clone()));
    }

    if target.overwrite {
        let message = format!("Removing folder for version {}", target.version);
        match client.delete(&folder, &message) {
            Ok(_) => {}
            Err(error) if classify(&error) == FailureKind::PathNotFound => {}
            Err(error) => return Err(error),
        }
    }

    let message = format!("Creating folder for version {}", target.version);
    client.mkdir(&folder, &message)?;

    Ok(TagFolder {
        url: folder,
        version: target.version.clone(),
    })
}
