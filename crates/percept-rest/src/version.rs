//! Platform version discriminants.
//!
//! The platform reports its version as `<base>-<build>-<timetag>`, e.g.
//! `1.1.0-release-20220624125113`. Two legacy generations returned wire
//! formats that differ from the current one; response parsing branches on
//! the discriminants below.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

// Release time tags bounding the legacy generations.
const LEGACY_MVP_TIMETAG: &str = "20220129184214";
const LEGACY_V1_TIMETAG: &str = "20220624125113";
const CURRENT_TIMETAG: &str = "20220910154208";

/// Known generations of the platform REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlatformVersion {
    /// First public release; normalized coordinates, `items` model-group key
    LegacyMvp,
    /// v1.1 line; normalized coordinates, `items` model-group key
    LegacyV1,
    /// Everything from the current product line onwards
    #[default]
    Current,
}

impl PlatformVersion {
    pub fn is_legacy_mvp(&self) -> bool {
        matches!(self, PlatformVersion::LegacyMvp)
    }

    pub fn is_legacy_v1(&self) -> bool {
        matches!(self, PlatformVersion::LegacyV1)
    }

    /// True for any generation that predates the current wire format.
    pub fn is_legacy(&self) -> bool {
        matches!(self, PlatformVersion::LegacyMvp | PlatformVersion::LegacyV1)
    }
}

impl fmt::Display for PlatformVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlatformVersion::LegacyMvp => "legacy-mvp",
            PlatformVersion::LegacyV1 => "legacy-v1.1",
            PlatformVersion::Current => "current",
        };
        write!(f, "{name}")
    }
}

impl FromStr for PlatformVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() < 3 {
            return Err(VersionParseError::new(format!(
                "unable to parse platform version '{s}': expected '<base>-<build>-<timetag>'"
            )));
        }
        let base = parts[0];
        let time_tag = parts[parts.len() - 1];
        if time_tag.len() != 14 || !time_tag.bytes().all(|b| b.is_ascii_digit()) {
            return Err(VersionParseError::new(format!(
                "unable to parse platform version '{s}': bad time tag '{time_tag}'"
            )));
        }

        if base == "1.0.0" && (LEGACY_MVP_TIMETAG..LEGACY_V1_TIMETAG).contains(&time_tag) {
            Ok(PlatformVersion::LegacyMvp)
        } else if base == "1.1.0" && (LEGACY_V1_TIMETAG..CURRENT_TIMETAG).contains(&time_tag) {
            Ok(PlatformVersion::LegacyV1)
        } else {
            Ok(PlatformVersion::Current)
        }
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct VersionParseError {
    message: String,
}

impl VersionParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
