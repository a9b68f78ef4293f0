//! Naming URIs and partition identifiers.
//!
//! Every application and service is addressed by a URI in the `fabric:`
//! scheme. Partitions are addressed by a GUID.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Scheme prefix of every naming URI.
pub const FABRIC_URI_SCHEME: &str = "fabric:";

/// A naming URI such as `fabric:/MyApp/MyService`.
///
/// Construction checks the scheme and rejects embedded NULs; path segment
/// rules are enforced by the naming service on the other side of the native
/// call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FabricUri(String);

impl FabricUri {
    /// Parses a naming URI.
    pub fn parse(s: &str) -> Result<Self, Error> {
        match s.strip_prefix(FABRIC_URI_SCHEME) {
            Some(rest) if !rest.is_empty() && !rest.contains('\0') => Ok(Self(s.to_owned())),
            _ => Err(Error::InvalidUri(s.to_owned())),
        }
    }

    /// Returns the URI as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the path after the scheme, e.g. `/MyApp/MyService`.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.0[FABRIC_URI_SCHEME.len()..]
    }

    /// Consumes the URI, returning the underlying string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for FabricUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for FabricUri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FabricUri {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<FabricUri> for String {
    fn from(uri: FabricUri) -> Self {
        uri.0
    }
}

impl AsRef<str> for FabricUri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Unique identifier of a service partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartitionId(Uuid);

impl PartitionId {
    /// Creates a new random partition ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a partition ID from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Parses a partition ID from a string.
    pub fn parse(s: &str) -> Result<Self, Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for PartitionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PartitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PartitionId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
