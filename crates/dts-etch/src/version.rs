//! Ordering of published package versions
//!
//! Packages are versioned as `<semver>-<tag>.<mc semver>-<build>.<revision>`,
//! for example `1.5.0-beta.1.20.20-preview.23`. Older releases used
//! `<semver>-<tag>.<build>.<mc semver>.<revision>`, as in
//! `1.1.0-beta.release.1.19.50`. Both forms parse into [`PackageVersion`].

use lazy_static::lazy_static;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter, Result as FmtResult};

lazy_static! {
    /// `1.5.0-beta.1.20.20-preview.23`
    static ref VERSION_REGEX: Regex = Regex::new(
        r"^(\d+\.\d+\.\d+)(?:-([a-z]+)\.(\d+\.\d+\.\d+)-([a-z]+)\.?(\d+)?)?$"
    ).unwrap();

    /// `1.1.0-beta.release.1.19.50`
    static ref OLD_VERSION_REGEX: Regex = Regex::new(
        r"^(\d+\.\d+\.\d+)(?:-([a-z]+)(?:\.([a-z]+))?\.(\d+\.\d+\.\d+)\.?(\d+)?)?$"
    ).unwrap();
}

/// Release channel of the package itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tag {
    Other,
    Beta,
    Rc,
    Release,
}

impl Tag {
    fn parse(tag: &str) -> Self {
        match tag {
            "beta" => Tag::Beta,
            "rc" => Tag::Rc,
            "release" => Tag::Release,
            _ => Tag::Other,
        }
    }
}

/// Release channel of the game build the package targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Build {
    Other,
    Preview,
    Stable,
}

impl Build {
    fn parse(build: &str) -> Self {
        match build {
            "preview" => Build::Preview,
            "stable" => Build::Stable,
            _ => Build::Other,
        }
    }
}

/// `major.minor.patch`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Semver(pub u64, pub u64, pub u64);

impl Semver {
    fn parse(text: &str) -> Option<Self> {
        let mut parts = text.split('.').map(|p| p.parse::<u64>().ok());
        let semver = Semver(parts.next()??, parts.next()??, parts.next()??);
        match parts.next() {
            Some(_) => None,
            None => Some(semver),
        }
    }
}

impl Display for Semver {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}.{}.{}", self.0, self.1, self.2)
    }
}

/// A parsed package version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageVersion {
    pub semver: Semver,
    pub tag: Tag,
    pub mc_semver: Option<Semver>,
    pub build: Option<Build>,
    pub revision: u64,
}

impl PackageVersion {
    /// Parse either version form; `None` when neither matches the whole text
    pub fn parse(version: &str) -> Option<Self> {
        if let Some(caps) = VERSION_REGEX.captures(version) {
            return Some(PackageVersion {
                semver: Semver::parse(caps.get(1)?.as_str())?,
                tag: caps.get(2).map_or(Tag::Release, |m| Tag::parse(m.as_str())),
                mc_semver: caps.get(3).and_then(|m| Semver::parse(m.as_str())),
                build: caps.get(4).map(|m| Build::parse(m.as_str())),
                revision: revision(caps.get(5)),
            });
        }

        let caps = OLD_VERSION_REGEX.captures(version)?;
        // `-beta.release.1.19.50`: the second word is the build channel
        let build_word = caps.get(3).map(|m| m.as_str());
        Some(PackageVersion {
            semver: Semver::parse(caps.get(1)?.as_str())?,
            tag: match (build_word, caps.get(2)) {
                (Some(_), Some(tag)) => Tag::parse(tag.as_str()),
                _ => Tag::Release,
            },
            mc_semver: caps.get(4).and_then(|m| Semver::parse(m.as_str())),
            build: build_word.map(|b| match b {
                "release" => Build::Stable,
                other => Build::parse(other),
            }),
            revision: revision(caps.get(5)),
        })
    }
}

fn revision(m: Option<regex::Match<'_>>) -> u64 {
    m.and_then(|m| m.as_str().parse().ok()).unwrap_or(0)
}

impl PartialOrd for PackageVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PackageVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.semver
            .cmp(&other.semver)
            .then(self.tag.cmp(&other.tag))
            .then_with(|| compare_missing_last(self.mc_semver, other.mc_semver))
            .then_with(|| self.build.cmp(&other.build))
            .then(self.revision.cmp(&other.revision))
    }
}

/// A package without a target game version sorts after one with it
fn compare_missing_last(a: Option<Semver>, b: Option<Semver>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

/// Compare two version strings
///
/// Unparseable versions sort before every parseable one and compare equal
/// to each other.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match (PackageVersion::parse(a), PackageVersion::parse(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort version strings ascending
pub fn sort_versions<S: AsRef<str>>(versions: &mut [S]) {
    versions.sort_by(|a, b| compare_versions(a.as_ref(), b.as_ref()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_current_form() {
        let version = PackageVersion::parse("1.5.0-beta.1.20.20-preview.23").unwrap();
        assert_eq!(version.semver, Semver(1, 5, 0));
        assert_eq!(version.tag, Tag::Beta);
        assert_eq!(version.mc_semver, Some(Semver(1, 20, 20)));
        assert_eq!(version.build, Some(Build::Preview));
        assert_eq!(version.revision, 23);
    }

    #[test]
    fn test_parse_old_form() {
        let version = PackageVersion::parse("1.1.0-beta.release.1.19.50").unwrap();
        assert_eq!(version.tag, Tag::Beta);
        assert_eq!(version.build, Some(Build::Stable));
        assert_eq!(version.mc_semver, Some(Semver(1, 19, 50)));

        let plain = PackageVersion::parse("1.0.0").unwrap();
        assert_eq!(plain.tag, Tag::Release);
        assert_eq!(plain.mc_semver, None);
    }

    #[test]
    fn test_parse_rejects_partial_match() {
        assert_eq!(PackageVersion::parse("latest"), None);
        assert_eq!(PackageVersion::parse("1.0.0-"), None);
    }

    #[test]
    fn test_build_and_revision_order() {
        assert_eq!(
            compare_versions("1.1.0-beta.1.20.10-preview.20", "1.1.0-beta.1.20.10-preview.21"),
            Ordering::Less
        );
        assert_eq!(
            compare_versions("1.1.0-beta.1.20.10-preview.21", "1.1.0-beta.1.20.10-stable"),
            Ordering::Less
        );
    }

    #[test]
    fn test_tag_order() {
        assert_eq!(
            compare_versions("1.2.0-beta.1.20.0-stable", "1.2.0-rc.1.20.0-stable"),
            Ordering::Less
        );
        assert_eq!(compare_versions("1.2.0-rc.1.20.0-stable", "1.2.0"), Ordering::Less);
        assert_eq!(compare_versions("1.10.0", "1.9.0"), Ordering::Greater);
    }

    #[test]
    fn test_sort_versions() {
        let mut versions = vec![
            "1.1.0-beta.1.20.10-stable",
            "1.0.0",
            "nightly",
            "1.1.0-beta.1.20.10-preview.21",
            "1.1.0-beta.1.20.10-preview.20",
            "1.1.0-beta.release.1.19.50",
        ];
        sort_versions(&mut versions);
        assert_eq!(
            versions,
            vec![
                "nightly",
                "1.0.0",
                "1.1.0-beta.release.1.19.50",
                "1.1.0-beta.1.20.10-preview.20",
                "1.1.0-beta.1.20.10-preview.21",
                "1.1.0-beta.1.20.10-stable",
            ]
        );
    }
}
