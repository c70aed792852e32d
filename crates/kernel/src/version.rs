//! API version tags shared by every versioning channel.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A supported API version.
///
/// Ordering follows release order, so `V1 < V2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ApiVersion {
    #[serde(rename = "1")]
    V1,
    #[serde(rename = "2")]
    V2,
}

/// Raised when a version signal names no supported version.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported API version '{0}'")]
pub struct UnsupportedVersion(pub String);

impl ApiVersion {
    /// Every supported version in release order.
    pub const ALL: [ApiVersion; 2] = [ApiVersion::V1, ApiVersion::V2];

    /// Wire value used by the `version` header.
    pub const fn as_str(self) -> &'static str {
        match self {
            ApiVersion::V1 => "1",
            ApiVersion::V2 => "2",
        }
    }

    /// Path prefix under which this version is mounted, e.g. `/v1`.
    pub const fn path_prefix(self) -> &'static str {
        match self {
            ApiVersion::V1 => "/v1",
            ApiVersion::V2 => "/v2",
        }
    }

    /// Versions released up to and including `self`.
    pub fn up_to(self) -> impl Iterator<Item = ApiVersion> {
        Self::ALL.into_iter().filter(move |v| *v <= self)
    }
}

impl FromStr for ApiVersion {
    type Err = UnsupportedVersion;

    /// Exact match only: no trimming, no case folding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(ApiVersion::V1),
            "2" => Ok(ApiVersion::V2),
            other => Err(UnsupportedVersion(other.to_string())),
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_values() {
        assert_eq!("1".parse::<ApiVersion>(), Ok(ApiVersion::V1));
        assert_eq!("2".parse::<ApiVersion>(), Ok(ApiVersion::V2));
    }

    #[test]
    fn rejects_everything_else_verbatim() {
        for raw in ["3", "", " 1", "1 ", "v1", "V2", "01"] {
            let err = raw.parse::<ApiVersion>().unwrap_err();
            assert_eq!(err, UnsupportedVersion(raw.to_string()));
        }
    }

    #[test]
    fn up_to_is_inclusive_and_ordered() {
        assert_eq!(ApiVersion::V1.up_to().collect::<Vec<_>>(), vec![ApiVersion::V1]);
        assert_eq!(
            ApiVersion::V2.up_to().collect::<Vec<_>>(),
            vec![ApiVersion::V1, ApiVersion::V2]
        );
    }

    #[test]
    fn display_matches_header_value() {
        assert_eq!(ApiVersion::V2.to_string(), "2");
        assert_eq!(ApiVersion::V1.path_prefix(), "/v1");
    }
}
