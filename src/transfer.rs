//! The file transfer stage: moving the configured files into the tag.
//!
//! Items run strictly in input order, one at a time, because each
//! remote operation commits a distinct revision and the history must be
//! reproducible. The first failure aborts the stage; a partially
//! populated tag is left for operator inspection.

use std::path::Path;

use crate::config::FileGroup;
use crate::error::{Result, SvnTagError};
use crate::svn::SvnClient;
use crate::transaction::TagFolder;
use crate::ui::formatter;

/// One file or folder headed into the tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferItem {
    pub source: String,
    pub dest: Option<String>,
    pub name: String,
    pub is_dir: bool,
}

fn item_name(path: &str) -> String {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(path)
        .to_string()
}

/// Builds import-mode items from the file mapping, dropping local paths
/// that do not exist (with a warning) before any transfer begins.
pub fn working_copy_items(groups: &[FileGroup]) -> Vec<TransferItem> {
    let mut items = Vec::new();
    for group in groups {
        if group.src.is_empty() {
            formatter::display_warning("File group with no sources cannot be found.");
            continue;
        }
        for source in &group.src {
            let path = Path::new(source);
            if !path.exists() {
                formatter::display_warning(&format!("File \"{}\" does not exist.", source));
                continue;
            }
            items.push(TransferItem {
                source: source.clone(),
                dest: group.dest.clone(),
                name: item_name(source),
                is_dir: path.is_dir(),
            });
        }
    }
    items
}

/// Builds copy-mode items; sources are repository paths relative to the
/// trunk, so there is no local existence check.
pub fn repository_items(groups: &[FileGroup]) -> Vec<TransferItem> {
    groups
        .iter()
        .flat_map(|group| {
            group.src.iter().map(|source| TransferItem {
                source: source.clone(),
                dest: group.dest.clone(),
                name: item_name(source),
                is_dir: false,
            })
        })
        .collect()
}

/// Imports each working-copy item into the tag folder, in order.
pub fn import_items(
    client: &dyn SvnClient,
    tag: &TagFolder,
    items: &[TransferItem],
) -> Result<()> {
    for item in items {
        let mut destination = tag.url.clone();
        if let Some(dest) = &item.dest {
            destination = format!("{}/{}", destination, dest);
        }
        let message = if item.is_dir {
            format!("Adding folder '{}' to version {}", item.name, tag.version)
        } else {
            // Files are imported under their own name; folders import
            // their contents into the destination directly.
            destination = format!("{}/{}", destination, item.name);
            format!("Adding file '{}' to version {}", item.name, tag.version)
        };
        client
            .import(&item.source, &destination, &message)
            .map_err(|error| {
                SvnTagError::transfer(format!("importing '{}': {}", item.name, error))
            })?;
    }
    Ok(())
}

/// Server-side copies each trunk item into the tag folder, in order,
/// creating the destination subpath first when one is configured.
pub fn copy_items(
    client: &dyn SvnClient,
    trunk_url: &str,
    tag: &TagFolder,
    items: &[TransferItem],
) -> Result<()> {
    for item in items {
        let mut destination = tag.url.clone();
        if let Some(dest) = &item.dest {
            destination = format!("{}/{}", destination, dest);
            let message = format!("Creating dest folder {}", dest);
            client.mkdir(&destination, &message).map_err(|error| {
                SvnTagError::transfer(format!("creating dest folder '{}': {}", dest, error))
            })?;
        }
        let from = format!("{}/{}", trunk_url, item.source);
        let to = format!("{}/{}", destination, item.name);
        let message = format!("Copying item '{}' to version {}", item.name, tag.version);
        client.copy(&from, &to, &message).map_err(|error| {
            SvnTagError::transfer(format!("copying '{}': {}", item.name, error))
        })?;
    }
    Ok(())
}
