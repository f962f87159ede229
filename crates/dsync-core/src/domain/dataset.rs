//! Dataset repository addressing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Delimiter used between owner and name when addressing the hub API.
const API_DELIMITER: char = ',';

/// Filesystem-safe delimiter used for the local directory name.
const SLUG_DELIMITER: &str = "___";

/// Reference to a dataset repository, addressed as `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetRef {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl DatasetRef {
    /// Create a new dataset reference.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse a dataset reference from an `owner/name` string.
    ///
    /// Surrounding whitespace is ignored. Returns `None` when either part is
    /// missing or when the name itself contains another separator.
    pub fn parse(repo: &str) -> Option<Self> {
        let (owner, name) = repo.trim().split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Self::new(owner, name))
    }

    /// Full repository identifier (`owner/name`).
    pub fn id(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Identifier in the form the hub API expects (`owner,name`).
    pub fn api_name(&self) -> String {
        format!("{}{API_DELIMITER}{}", self.owner, self.name)
    }

    /// Filesystem-safe directory name for the local copy (`owner___name`).
    pub fn slug(&self) -> String {
        format!("{}{SLUG_DELIMITER}{}", self.owner, self.name)
    }
}

impl fmt::Display for DatasetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Opaque repository-scoped identifier returned by the file listing.
///
/// Needed to resolve download URLs and for the access precheck. Its shape is
/// owned by the hub; dsync never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetId(String);

impl DatasetId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
