use anyhow::Result;
use clap::Parser;

use svn_tag::config::{self, Config};
use svn_tag::ledger;
use svn_tag::pipeline::{self, Outcome};
use svn_tag::svn::CommandClient;
use svn_tag::ui::{formatter, ConsolePrompter};

#[derive(clap::Parser)]
#[command(
    name = "svn-tag",
    about = "Create semver'd tag snapshots of specified files in an SVN repository"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Repository base URL (overrides configuration)")]
    repository: Option<String>,

    #[arg(
        short,
        long,
        help = "Bump directive: major/minor/patch, a pre-* variant, explicit, overwrite or quit"
    )]
    bump: Option<String>,

    #[arg(
        long,
        value_name = "VERSION",
        help = "Tag exactly this version, skipping the bump query"
    )]
    set_version: Option<String>,

    #[arg(long, help = "Allow the supplied version to replace an existing tag")]
    overwrite: bool,

    #[arg(long, help = "Log commands without contacting the repository")]
    dry_run: bool,

    #[arg(long, help = "Echo each command and its outcome")]
    verbose: bool,

    #[arg(long, help = "List tagged versions and exit")]
    list: bool,

    #[arg(short = 'V', long, help = "Print version information")]
    version: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.version {
        println!("svn-tag {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Load configuration
    let mut config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            formatter::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    // Flags override file configuration.
    if let Some(repository) = args.repository {
        config.repository = repository;
    }
    if let Some(bump) = args.bump {
        config.bump = Some(bump);
    }
    if let Some(version) = args.set_version {
        config.custom_version = Some(version);
    }
    if args.overwrite {
        config.overwrite = true;
    }
    if args.dry_run {
        config.dry_run = true;
    }
    if args.verbose {
        config.verbose = true;
    }

    if let Err(e) = config.validate() {
        formatter::display_error(&e.to_string());
        std::process::exit(1);
    }

    let client = CommandClient::new(&config.bin, config.dry_run, config.verbose);

    if args.list {
        return list_tagged_versions(&config, &client);
    }

    match pipeline::run(&config, &client, &ConsolePrompter) {
        Ok(Outcome::Tagged { version }) => {
            formatter::display_success(&format!("Tagged version {}", version));
            Ok(())
        }
        Ok(Outcome::Aborted) => Ok(()),
        Err(e) => {
            formatter::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}

fn list_tagged_versions(config: &Config, client: &CommandClient) -> Result<()> {
    let versions = ledger::load_versions(client, &config.tag_url())?;
    if versions.is_empty() {
        formatter::display_status("No versions found.");
    } else {
        for version in versions {
            println!("{}", version);
        }
    }
    Ok(())
}
