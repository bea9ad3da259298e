//! The promotion stage: pointing "latest" (and "latest_stable") at the
//! finished tag.
//!
//! Pointer folders are caches of "which tag is current", not
//! authoritative state; each promotion fully replaces them with a
//! delete-then-copy pair.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};

use crate::error::Result;
use crate::svn::{classify, FailureKind, SvnClient};
use crate::transaction::TagFolder;
use crate::ui::{formatter, Prompter};

/// Movable pointer folder names.
pub const LATEST: &str = "latest";
pub const LATEST_STABLE: &str = "latest_stable";

/// Whether a finished tag is promoted onto the pointer folders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromotionPolicy {
    Disabled,
    #[default]
    Always,
    Prompt,
}

/// In configuration the policy is written as a boolean or the string
/// `"prompt"`, so it gets a hand-rolled deserializer.
impl<'de> Deserialize<'de> for PromotionPolicy {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PolicyVisitor;

        impl Visitor<'_> for PolicyVisitor {
            type Value = PromotionPolicy;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a boolean or the string \"prompt\"")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Self::Value, E> {
                Ok(if value {
                    PromotionPolicy::Always
                } else {
                    PromotionPolicy::Disabled
                })
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                match value.to_lowercase().as_str() {
                    "prompt" => Ok(PromotionPolicy::Prompt),
                    "true" | "yes" => Ok(PromotionPolicy::Always),
                    "false" | "no" => Ok(PromotionPolicy::Disabled),
                    other => Err(E::unknown_variant(other, &["true", "false", "prompt"])),
                }
            }
        }

        deserializer.deserialize_any(PolicyVisitor)
    }
}

/// Promotes the finished tag according to `policy`.
///
/// "latest" always follows the new tag; "latest_stable" follows only
/// when `preserve_stable` is on and the version carries no pre-release
/// segment, so the stable pointer never references a pre-release build.
pub fn promote(
    client: &dyn SvnClient,
    prompter: &dyn Prompter,
    tag_url: &str,
    tag: &TagFolder,
    policy: PromotionPolicy,
    preserve_stable: bool,
) -> Result<()> {
    match policy {
        PromotionPolicy::Disabled => {
            formatter::display_status("Skipping copying to latest.");
            return Ok(());
        }
        PromotionPolicy::Prompt => {
            if !prompter.confirm("Copy to latest?", true)? {
                return Ok(());
            }
        }
        PromotionPolicy::Always => {}
    }

    replace_pointer(client, tag_url, tag, LATEST)?;
    if preserve_stable && tag.version.pre.is_empty() {
        replace_pointer(client, tag_url, tag, LATEST_STABLE)?;
    }
    Ok(())
}

fn replace_pointer(
    client: &dyn SvnClient,
    tag_url: &str,
    tag: &TagFolder,
    pointer: &str,
) -> Result<()> {
    let pointer_url = format!("{}/{}", tag_url, pointer);
    formatter::display_status(&format!("Copying to \"{}\" folder", pointer));

    let message = format!("Deleting {} folder", pointer);
    match client.delete(&pointer_url, &message) {
        Ok(_) => {}
        // First promotion ever: the pointer does not exist yet.
        Err(error) if classify(&error) == FailureKind::PathNotFound => {}
        Err(error) => return Err(error),
    }

    let message = format!("Creating {} folder", pointer);
    client.copy(&tag.url, &pointer_url, &message)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svn::mock::{MockFailure, MockSvnClient, SvnOp};
    use crate::ui::ScriptedPrompter;
    use semver::Version;

    fn tag(version: &str) -> TagFolder {
        TagFolder {
            url: format!("tags/{}", version),
            version: Version::parse(version).unwrap(),
        }
    }

    fn no_answers() -> ScriptedPrompter {
        ScriptedPrompter::new(Vec::<String>::new())
    }

    #[test]
    fn test_release_updates_both_pointers() {
        let client = MockSvnClient::new();
        promote(
            &client,
            &no_answers(),
            "tags",
            &tag("1.2.0"),
            PromotionPolicy::Always,
            true,
        )
        .unwrap();

        let ops = client.ops();
        assert_eq!(ops.len(), 4);
        assert!(matches!(&ops[0], SvnOp::Delete { url, .. } if url == "tags/latest"));
        assert!(
            matches!(&ops[1], SvnOp::Copy { from, to, .. } if from == "tags/1.2.0" && to == "tags/latest")
        );
        assert!(matches!(&ops[2], SvnOp::Delete { url, .. } if url == "tags/latest_stable"));
        assert!(
            matches!(&ops[3], SvnOp::Copy { from, to, .. } if from == "tags/1.2.0" && to == "tags/latest_stable")
        );
    }

    #[test]
    fn test_prerelease_never_touches_stable_pointer() {
        let client = MockSvnClient::new();
        promote(
            &client,
            &no_answers(),
            "tags",
            &tag("1.3.0-rc.1"),
            PromotionPolicy::Always,
            true,
        )
        .unwrap();

        let ops = client.ops();
        assert_eq!(ops.len(), 2);
        assert!(ops.iter().all(|op| match op {
            SvnOp::Delete { url, .. } => !url.contains(LATEST_STABLE),
            SvnOp::Copy { to, .. } => !to.contains(LATEST_STABLE),
            _ => true,
        }));
    }

    #[test]
    fn test_stable_pointer_disabled() {
        let client = MockSvnClient::new();
        promote(
            &client,
            &no_answers(),
            "tags",
            &tag("1.2.0"),
            PromotionPolicy::Always,
            false,
        )
        .unwrap();
        assert_eq!(client.ops().len(), 2);
    }

    #[test]
    fn test_disabled_policy_issues_no_commands() {
        let client = MockSvnClient::new();
        promote(
            &client,
            &no_answers(),
            "tags",
            &tag("1.2.0"),
            PromotionPolicy::Disabled,
            true,
        )
        .unwrap();
        assert!(client.ops().is_empty());
    }

    #[test]
    fn test_prompt_policy_confirmed_by_default() {
        let client = MockSvnClient::new();
        let prompter = ScriptedPrompter::new([""]);
        promote(
            &client,
            &prompter,
            "tags",
            &tag("1.2.0"),
            PromotionPolicy::Prompt,
            false,
        )
        .unwrap();
        assert_eq!(client.ops().len(), 2);
    }

    #[test]
    fn test_prompt_policy_declined() {
        let client = MockSvnClient::new();
        let prompter = ScriptedPrompter::new(["n"]);
        promote(
            &client,
            &prompter,
            "tags",
            &tag("1.2.0"),
            PromotionPolicy::Prompt,
            true,
        )
        .unwrap();
        assert!(client.ops().is_empty());
    }

    #[test]
    fn test_missing_pointer_tolerated_on_first_promotion() {
        let mut client = MockSvnClient::new();
        client.fail_with("delete", "tags/latest", MockFailure::PathNotFound);
        client.fail_with("delete", "tags/latest_stable", MockFailure::PathNotFound);

        promote(
            &client,
            &no_answers(),
            "tags",
            &tag("1.0.0"),
            PromotionPolicy::Always,
            true,
        )
        .unwrap();

        // Both copies still happen after the tolerated deletes.
        let copies = client
            .ops()
            .iter()
            .filter(|op| matches!(op, SvnOp::Copy { .. }))
            .count();
        assert_eq!(copies, 2);
    }

    #[test]
    fn test_other_delete_failure_is_fatal() {
        let mut client = MockSvnClient::new();
        client.fail_with("delete", "tags/latest", MockFailure::Rejected);

        let result = promote(
            &client,
            &no_answers(),
            "tags",
            &tag("1.0.0"),
            PromotionPolicy::Always,
            true,
        );
        assert!(result.is_err());
        assert_eq!(client.ops().len(), 1);
    }
}
