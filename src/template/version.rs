//! Semantic version parsing and ordering.
//!
//! The registry addresses templates by `identifier` + version string. The
//! wire shape keeps versions as plain strings; this type is the parsed
//! form used wherever versions are compared (sync direction, validation).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::TdkError;

/// A parsed semantic version: `MAJOR.MINOR.PATCH` with an optional
/// pre-release tag (`1.2.0-beta.1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Option<String>,
}

impl Version {
    /// Parse a version string, surfacing `InvalidVersion` on failure.
    pub fn parse(s: &str) -> Result<Self, TdkError> {
        s.parse()
    }

    /// Whether this is a pre-release version.
    pub fn is_prerelease(&self) -> bool {
        self.pre.is_some()
    }
}

impl FromStr for Version {
    type Err = TdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TdkError::InvalidVersion {
            version: s.to_string(),
        };

        let (core, pre) = match s.split_once('-') {
            Some((core, pre)) if !pre.is_empty() => (core, Some(pre.to_string())),
            Some(_) => return Err(invalid()),
            None => (s, None),
        };

        let mut parts = core.split('.');
        let mut next_number = || -> Result<u64, TdkError> {
            parts
                .next()
                .filter(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
                .and_then(|p| p.parse().ok())
                .ok_or_else(invalid)
        };

        let major = next_number()?;
        let minor = next_number()?;
        let patch = next_number()?;
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self {
            major,
            minor,
            patch,
            pre,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(ref pre) = self.pre {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (&self.pre, &other.pre) {
                // A pre-release orders before its release.
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(a), Some(b)) => a.cmp(b),
                (None, None) => Ordering::Equal,
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_version() {
        let v = Version::parse("1.2.3").unwrap();
        assert_eq!((v.major, v.minor, v.patch), (1, 2, 3));
        assert!(v.pre.is_none());
    }

    #[test]
    fn parses_prerelease() {
        let v = Version::parse("1.2.3-beta.1").unwrap();
        assert_eq!(v.pre.as_deref(), Some("beta.1"));
        assert!(v.is_prerelease());
    }

    #[test]
    fn rejects_malformed_versions() {
        for bad in ["", "1", "1.2", "1.2.3.4", "v1.2.3", "1.2.x", "1.2.3-", "1..3"] {
            assert!(Version::parse(bad).is_err(), "should reject {:?}", bad);
        }
    }

    #[test]
    fn display_round_trips() {
        for s in ["0.1.0", "1.2.3", "2.0.0-rc.1"] {
            assert_eq!(Version::parse(s).unwrap().to_string(), s);
        }
    }

    #[test]
    fn ordering_is_numeric_not_lexical() {
        let a = Version::parse("1.9.0").unwrap();
        let b = Version::parse("1.10.0").unwrap();
        assert!(a < b);
    }

    #[test]
    fn prerelease_orders_before_release() {
        let pre = Version::parse("2.0.0-rc.1").unwrap();
        let rel = Version::parse("2.0.0").unwrap();
        assert!(pre < rel);
    }

    #[test]
    fn error_names_the_version() {
        let err = Version::parse("not-a-version").unwrap_err();
        assert!(err.to_string().contains("not-a-version"));
    }
}
