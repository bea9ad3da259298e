//! Bump directives and semantic-version increment rules.
//!
//! Versions themselves are `semver::Version`; this module adds the
//! vocabulary used to pick the next one and the increment rules applied
//! to the latest tagged version.

use std::fmt;
use std::str::FromStr;

use semver::{BuildMetadata, Prerelease, Version};
use serde::Deserialize;

use crate::error::{Result, SvnTagError};

/// Which segment of the next version an automatic bump derives from.
///
/// The `Pre*` variants produce a version carrying a pre-release segment;
/// `PreRelease` iterates an existing pre-release segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BumpKind {
    Major,
    Minor,
    Patch,
    PreMajor,
    PreMinor,
    PrePatch,
    PreRelease,
}

/// One answer to the bump query: an automatic increment, or one of the
/// flow sentinels (explicit version entry, overwrite entry, quit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Bump(BumpKind),
    Explicit,
    Overwrite,
    Quit,
}

impl FromStr for BumpKind {
    type Err = SvnTagError;

    /// Accepts the long vocabulary (`major`, `pre-release`, ...) and the
    /// single-letter aliases used at the interactive prompt (`x`, `pz`,
    /// `pr`, ...).
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "x" | "major" => Ok(BumpKind::Major),
            "y" | "minor" => Ok(BumpKind::Minor),
            "z" | "patch" => Ok(BumpKind::Patch),
            "px" | "pre-major" | "premajor" => Ok(BumpKind::PreMajor),
            "py" | "pre-minor" | "preminor" => Ok(BumpKind::PreMinor),
            "pz" | "pre-patch" | "prepatch" => Ok(BumpKind::PrePatch),
            "pr" | "pre-release" | "prerelease" => Ok(BumpKind::PreRelease),
            other => Err(SvnTagError::version(format!(
                "unrecognised bump '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BumpKind::Major => "major",
            BumpKind::Minor => "minor",
            BumpKind::Patch => "patch",
            BumpKind::PreMajor => "pre-major",
            BumpKind::PreMinor => "pre-minor",
            BumpKind::PrePatch => "pre-patch",
            BumpKind::PreRelease => "pre-release",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Directive {
    type Err = SvnTagError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "e" | "explicit" => Ok(Directive::Explicit),
            "o" | "overwrite" => Ok(Directive::Overwrite),
            "q" | "quit" => Ok(Directive::Quit),
            other => other.parse::<BumpKind>().map(Directive::Bump),
        }
    }
}

/// Strips the decorations a version may be entered with (`v1.2.3`,
/// `=1.2.3`, surrounding whitespace) before parsing.
pub fn clean_version(input: &str) -> &str {
    input
        .trim()
        .trim_start_matches('=')
        .trim_start_matches(['v', 'V'])
}

/// Parses an operator-supplied version string.
pub fn parse_version(input: &str) -> Result<Version> {
    Version::parse(clean_version(input))
        .map_err(|e| SvnTagError::version(format!("invalid version '{}': {}", input.trim(), e)))
}

/// Computes the next version from `version` for a bump directive.
///
/// `major`/`minor`/`patch` increment their segment and zero out the
/// lower ones; the `pre-*` variants do the same and then open a numeric
/// pre-release segment; `pre-release` iterates the current pre-release
/// segment (or opens one on the next patch if there is none).
pub fn bump(version: &Version, kind: BumpKind) -> Version {
    let mut next = version.clone();
    next.build = BuildMetadata::EMPTY;
    match kind {
        BumpKind::Major => {
            next.major += 1;
            next.minor = 0;
            next.patch = 0;
            next.pre = Prerelease::EMPTY;
        }
        BumpKind::Minor => {
            next.minor += 1;
            next.patch = 0;
            next.pre = Prerelease::EMPTY;
        }
        BumpKind::Patch => {
            next.patch += 1;
            next.pre = Prerelease::EMPTY;
        }
        BumpKind::PreMajor => {
            next.major += 1;
            next.minor = 0;
            next.patch = 0;
            next.pre = initial_prerelease();
        }
        BumpKind::PreMinor => {
            next.minor += 1;
            next.patch = 0;
            next.pre = initial_prerelease();
        }
        BumpKind::PrePatch => {
            next.patch += 1;
            next.pre = initial_prerelease();
        }
        BumpKind::PreRelease => {
            if next.pre.is_empty() {
                next.patch += 1;
                next.pre = initial_prerelease();
            } else {
                next.pre = increment_prerelease(&next.pre);
            }
        }
    }
    next
}

fn initial_prerelease() -> Prerelease {
    Prerelease::new("0").expect("Could not build pre-release segment")
}

/// Increments the final numeric identifier of a pre-release segment, or
/// appends `.0` when the final identifier is not numeric.
fn increment_prerelease(pre: &Prerelease) -> Prerelease {
    let identifiers: Vec<&str> = pre.as_str().split('.').collect();
    let next = match identifiers.split_last() {
        Some((last, rest)) => match last.parse::<u64>() {
            Ok(n) => {
                let mut ids: Vec<String> = rest.iter().map(|id| id.to_string()).collect();
                ids.push((n + 1).to_string());
                ids.join(".")
            }
            Err(_) => format!("{}.0", pre.as_str()),
        },
        None => "0".to_string(),
    };
    Prerelease::new(&next).expect("Could not build pre-release segment")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_bump_major_zeroes_lower_segments() {
        assert_eq!(bump(&v("1.2.3"), BumpKind::Major), v("2.0.0"));
    }

    #[test]
    fn test_bump_minor_zeroes_patch() {
        assert_eq!(bump(&v("1.2.3"), BumpKind::Minor), v("1.3.0"));
    }

    #[test]
    fn test_bump_patch() {
        assert_eq!(bump(&v("1.2.3"), BumpKind::Patch), v("1.2.4"));
    }

    #[test]
    fn test_bump_clears_prerelease_and_build() {
        assert_eq!(bump(&v("1.2.3-alpha.1+build.5"), BumpKind::Patch), v("1.2.4"));
        assert_eq!(bump(&v("1.2.3-alpha.1"), BumpKind::Major), v("2.0.0"));
    }

    #[test]
    fn test_bump_pre_variants_open_prerelease() {
        assert_eq!(bump(&v("1.2.3"), BumpKind::PreMajor), v("2.0.0-0"));
        assert_eq!(bump(&v("1.2.3"), BumpKind::PreMinor), v("1.3.0-0"));
        assert_eq!(bump(&v("1.2.3"), BumpKind::PrePatch), v("1.2.4-0"));
    }

    #[test]
    fn test_bump_prerelease_opens_segment_on_release() {
        assert_eq!(bump(&v("1.2.3"), BumpKind::PreRelease), v("1.2.4-0"));
    }

    #[test]
    fn test_bump_prerelease_increments_numeric_identifier() {
        assert_eq!(bump(&v("1.2.3-0"), BumpKind::PreRelease), v("1.2.3-1"));
        assert_eq!(bump(&v("1.2.3-beta.4"), BumpKind::PreRelease), v("1.2.3-beta.5"));
    }

    #[test]
    fn test_bump_prerelease_appends_when_not_numeric() {
        assert_eq!(bump(&v("1.2.3-alpha"), BumpKind::PreRelease), v("1.2.3-alpha.0"));
    }

    #[test]
    fn test_bump_ordering_properties() {
        for version in ["0.0.0", "1.2.3", "1.2.3-alpha.1", "9.9.9-0"] {
            let version = v(version);
            let major = bump(&version, BumpKind::Major);
            let minor = bump(&version, BumpKind::Minor);
            let patch = bump(&version, BumpKind::Patch);
            assert!(major > minor, "{} major vs minor", version);
            assert!(minor > patch, "{} minor vs patch", version);
            assert!(patch > version, "{} patch vs base", version);
        }
    }

    #[test]
    fn test_bump_pre_variants_always_carry_prerelease() {
        for kind in [
            BumpKind::PreMajor,
            BumpKind::PreMinor,
            BumpKind::PrePatch,
            BumpKind::PreRelease,
        ] {
            assert!(!bump(&v("1.2.3"), kind).pre.is_empty());
            assert!(!bump(&v("1.2.3-rc.1"), kind).pre.is_empty());
        }
    }

    #[test]
    fn test_clean_version() {
        assert_eq!(clean_version(" v1.2.3 "), "1.2.3");
        assert_eq!(clean_version("=V1.2.3"), "1.2.3");
        assert_eq!(clean_version("1.2.3-rc.1"), "1.2.3-rc.1");
    }

    #[test]
    fn test_parse_version_accepts_decorated_input() {
        assert_eq!(parse_version("v1.2.3").unwrap(), v("1.2.3"));
        assert_eq!(parse_version(" 1.3.0-1 ").unwrap(), v("1.3.0-1"));
    }

    #[test]
    fn test_parse_version_rejects_garbage() {
        assert!(parse_version("banana").is_err());
        assert!(parse_version("1.2").is_err());
    }

    #[test]
    fn test_bump_kind_from_str_aliases() {
        assert_eq!("x".parse::<BumpKind>().unwrap(), BumpKind::Major);
        assert_eq!("Y".parse::<BumpKind>().unwrap(), BumpKind::Minor);
        assert_eq!("patch".parse::<BumpKind>().unwrap(), BumpKind::Patch);
        assert_eq!("px".parse::<BumpKind>().unwrap(), BumpKind::PreMajor);
        assert_eq!("pre-release".parse::<BumpKind>().unwrap(), BumpKind::PreRelease);
        assert!("w".parse::<BumpKind>().is_err());
    }

    #[test]
    fn test_directive_from_str() {
        assert_eq!("q".parse::<Directive>().unwrap(), Directive::Quit);
        assert_eq!("explicit".parse::<Directive>().unwrap(), Directive::Explicit);
        assert_eq!("O".parse::<Directive>().unwrap(), Directive::Overwrite);
        assert_eq!(
            "pz".parse::<Directive>().unwrap(),
            Directive::Bump(BumpKind::PrePatch)
        );
        assert!("nonsense".parse::<Directive>().is_err());
    }

    #[test]
    fn test_bump_kind_display_roundtrip() {
        for kind in [
            BumpKind::Major,
            BumpKind::Minor,
            BumpKind::Patch,
            BumpKind::PreMajor,
            BumpKind::PreMinor,
            BumpKind::PrePatch,
            BumpKind::PreRelease,
        ] {
            assert_eq!(kind.to_string().parse::<BumpKind>().unwrap(), kind);
        }
    }
}
