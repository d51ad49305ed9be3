use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::split::parse_int_lenient;

static VERSION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?P<major>\d+)\.(?P<minor>\d+)\.(?P<patch>\d+)\s*$").unwrap());

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid version '{0}', expecting major.minor.patch")]
pub struct VersionError(pub String);

/// A `major.minor.patch` version. Ordering is componentwise, so `1.2.3 < 1.10.0`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Read as much of `major.minor.patch` as is present. Missing or malformed components
    /// become 0; this never fails.
    pub fn parse_lenient(text: &str) -> Version {
        let mut parts = text.trim().splitn(3, '.').map(|part| {
            u32::try_from(parse_int_lenient(part)).unwrap_or_default()
        });
        Version {
            major: parts.next().unwrap_or_default(),
            minor: parts.next().unwrap_or_default(),
            patch: parts.next().unwrap_or_default(),
        }
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = VERSION_REGEX
            .captures(s)
            .ok_or_else(|| VersionError(s.to_string()))?;
        let component = |name: &str| {
            caps[name]
                .parse::<u32>()
                .map_err(|_| VersionError(s.to_string()))
        };
        Ok(Version {
            major: component("major")?,
            minor: component("minor")?,
            patch: component("patch")?,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
