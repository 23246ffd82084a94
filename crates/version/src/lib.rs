//! Schema version tags — parse, format, and compare `major.minor.patch`.
//!
//! Every root record embeds one of these; the loader compares it against the
//! running code's own tag when a decode goes wrong. Ordering is numeric on
//! the component tuple, never on the string form: `1.2.10` sorts after
//! `1.2.9`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VersionParseError {
    #[error("empty version string")]
    Empty,
    #[error("too many components in version `{0}`")]
    TooManyComponents(String),
    #[error("invalid version component `{0}`")]
    InvalidComponent(String),
}

/// An ordered `(major, minor, patch)` schema version tag.
///
/// Missing components default to zero, so `Version::from(2)` is `2.0.0`.
/// Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl From<u32> for Version {
    fn from(major: u32) -> Self {
        Self::new(major, 0, 0)
    }
}

impl From<(u32, u32)> for Version {
    fn from((major, minor): (u32, u32)) -> Self {
        Self::new(major, minor, 0)
    }
}

impl From<(u32, u32, u32)> for Version {
    fn from((major, minor, patch): (u32, u32, u32)) -> Self {
        Self::new(major, minor, patch)
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(VersionParseError::Empty);
        }
        let mut components = [0u32; 3];
        let mut count = 0usize;
        for part in s.split('.') {
            if count == components.len() {
                return Err(VersionParseError::TooManyComponents(s.to_string()));
            }
            components[count] = part
                .trim()
                .parse()
                .map_err(|_| VersionParseError::InvalidComponent(part.to_string()))?;
            count += 1;
        }
        Ok(Self::new(components[0], components[1], components[2]))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
