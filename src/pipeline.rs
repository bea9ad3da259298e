//! Ordered stage orchestration for one tagging run.
//!
//! Ledger, resolver, transaction, transfer, and promotion run strictly
//! in sequence, each consuming the prior stage's typed result; a single
//! error channel terminates the run at the first stage failure.

use semver::Version;

use crate::config::Config;
use crate::error::Result;
use crate::ledger;
use crate::promote;
use crate::resolver::{Resolution, Resolver};
use crate::svn::SvnClient;
use crate::transaction;
use crate::transfer;
use crate::ui::{formatter, Prompter};

/// Terminal result of a tagging run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The pipeline ran to completion for this version.
    Tagged { version: Version },
    /// The operator quit at a prompt; a clean stop, not an error.
    Aborted,
}

/// Runs the whole pipeline against the given client and prompt service.
pub fn run(config: &Config, client: &dyn SvnClient, prompter: &dyn Prompter) -> Result<Outcome> {
    config.validate()?;
    let tag_url = config.tag_url();

    let versions = ledger::load_versions(client, &tag_url)?;
    if config.verbose {
        if versions.is_empty() {
            formatter::display_info("No versions found.");
        } else {
            formatter::display_info("Found tagged versions:");
            for version in &versions {
                formatter::display_info(&version.to_string());
            }
        }
    }

    let target = match Resolver::new(&versions, prompter, config).resolve()? {
        Resolution::Target(target) => target,
        Resolution::Quit => return Ok(Outcome::Aborted),
    };

    let tag = transaction::create_tag_folder(client, &tag_url, &target, &versions)?;

    formatter::display_status(&format!("Preparing \"{}\" folder", tag.version));
    if config.use_working_copy {
        let items = transfer::working_copy_items(&config.files);
        transfer::import_items(client, &tag, &items)?;
    } else {
        let items = transfer::repository_items(&config.files);
        transfer::copy_items(client, &config.trunk_url(), &tag, &items)?;
    }

    promote::promote(
        client,
        prompter,
        &tag_url,
        &tag,
        config.latest,
        config.preserve_stable,
    )?;

    Ok(Outcome::Tagged {
        version: tag.version,
    })
}
