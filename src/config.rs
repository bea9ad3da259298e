use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Result, SvnTagError};
use crate::promote::PromotionPolicy;
use crate::version::BumpKind;

/// Represents the complete configuration for a tagging run.
///
/// Covers repository layout, the transfer mode and file mapping, and
/// behavior options such as the default bump and promotion policy.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the repository. Required.
    #[serde(default)]
    pub repository: String,

    #[serde(default = "default_tag_dir")]
    pub tag_dir: String,

    /// Source location for copy-mode transfers.
    #[serde(default = "default_trunk_dir")]
    pub trunk_dir: String,

    /// Executable used for every repository command.
    #[serde(default = "default_bin")]
    pub bin: String,

    /// Directive applied when the bump query is answered with Enter.
    #[serde(default = "default_bump")]
    pub default_bump: BumpKind,

    /// Bump directive for the current run, normally supplied by flag.
    #[serde(default)]
    pub bump: Option<String>,

    /// Import from a local working copy instead of server-side copying
    /// from the trunk.
    #[serde(default)]
    pub use_working_copy: bool,

    /// Permits a custom version to replace an existing tag.
    #[serde(default)]
    pub overwrite: bool,

    /// Whether the finished tag is copied onto the "latest" pointer.
    /// Accepts `true`, `false`, or `"prompt"`.
    #[serde(default)]
    pub latest: PromotionPolicy,

    /// Also maintain a "latest_stable" pointer for release versions.
    #[serde(default = "default_preserve_stable")]
    pub preserve_stable: bool,

    /// Tag exactly this version instead of querying for a bump.
    #[serde(default)]
    pub custom_version: Option<String>,

    /// Log commands without contacting the repository.
    #[serde(default)]
    pub dry_run: bool,

    /// Echo each command and its outcome.
    #[serde(default)]
    pub verbose: bool,

    /// Ordered file mapping transferred into the tag.
    #[serde(default)]
    pub files: Vec<FileGroup>,
}

/// One ordered group of the file mapping: source paths plus an optional
/// destination subpath inside the tag folder.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct FileGroup {
    pub src: Vec<String>,

    #[serde(default)]
    pub dest: Option<String>,
}

fn default_tag_dir() -> String {
    "tags".to_string()
}

fn default_trunk_dir() -> String {
    "trunk".to_string()
}

fn default_bin() -> String {
    "svn".to_string()
}

fn default_bump() -> BumpKind {
    BumpKind::Patch
}

fn default_preserve_stable() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            repository: String::new(),
            tag_dir: default_tag_dir(),
            trunk_dir: default_trunk_dir(),
            bin: default_bin(),
            default_bump: default_bump(),
            bump: None,
            use_working_copy: false,
            overwrite: false,
            latest: PromotionPolicy::default(),
            preserve_stable: default_preserve_stable(),
            custom_version: None,
            dry_run: false,
            verbose: false,
            files: Vec::new(),
        }
    }
}

impl Config {
    /// Checks the options that must hold before any repository command
    /// is issued.
    pub fn validate(&self) -> Result<()> {
        if self.repository.is_empty() {
            return Err(SvnTagError::config("\"repository\" option not specified"));
        }
        Ok(())
    }

    /// Remote location of the tag directory.
    pub fn tag_url(&self) -> String {
        format!("{}/{}", self.repository, self.tag_dir)
    }

    /// Remote location of the trunk directory.
    pub fn trunk_url(&self) -> String {
        format!("{}/{}", self.repository, self.trunk_dir)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `svntag.toml` in current directory
/// 3. `.svntag.toml` in the user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./svntag.toml").exists() {
        fs::read_to_string("./svntag.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".svntag.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    toml::from_str(&config_str)
        .map_err(|e| SvnTagError::config(format!("could not parse configuration: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.tag_dir, "tags");
        assert_eq!(config.trunk_dir, "trunk");
        assert_eq!(config.bin, "svn");
        assert_eq!(config.default_bump, BumpKind::Patch);
        assert_eq!(config.latest, PromotionPolicy::Always);
        assert!(config.preserve_stable);
        assert!(!config.use_working_copy);
        assert!(!config.overwrite);
        assert!(config.files.is_empty());
    }

    #[test]
    fn test_validate_requires_repository() {
        let config = Config::default();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("repository"));

        let config = Config {
            repository: "https://svn.example.com/project".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tag_and_trunk_urls() {
        let config = Config {
            repository: "https://svn.example.com/project".to_string(),
            ..Config::default()
        };
        assert_eq!(config.tag_url(), "https://svn.example.com/project/tags");
        assert_eq!(config.trunk_url(), "https://svn.example.com/project/trunk");
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
repository = "https://svn.example.com/project"
tag_dir = "releases"
default_bump = "minor"
use_working_copy = true
latest = "prompt"
preserve_stable = false

[[files]]
src = ["dist/app.js", "dist/app.css"]
dest = "assets"

[[files]]
src = ["README.md"]
"#;
        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.tag_dir, "releases");
        assert_eq!(config.default_bump, BumpKind::Minor);
        assert!(config.use_working_copy);
        assert_eq!(config.latest, PromotionPolicy::Prompt);
        assert!(!config.preserve_stable);
        assert_eq!(config.files.len(), 2);
        assert_eq!(config.files[0].dest.as_deref(), Some("assets"));
        assert_eq!(config.files[1].src, vec!["README.md".to_string()]);
        assert_eq!(config.files[1].dest, None);
    }

    #[test]
    fn test_parse_latest_as_bool() {
        let config: Config = toml::from_str("latest = false").unwrap();
        assert_eq!(config.latest, PromotionPolicy::Disabled);

        let config: Config = toml::from_str("latest = true").unwrap();
        assert_eq!(config.latest, PromotionPolicy::Always);
    }

    #[test]
    fn test_parse_invalid_default_bump() {
        let parsed = toml::from_str::<Config>("default_bump = \"sideways\"");
        assert!(parsed.is_err());
    }
}
