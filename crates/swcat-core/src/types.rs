//! Core types for swcat-core.
//!
//! This module defines the data shapes handed between the layers: the raw
//! [`RawInstallationRecord`] read from an operations dump, the
//! [`ParseOutcome`] every per-source routine returns, and the two result
//! shapes ([`ResourceSoftwareMap`] for the record stream, [`ResourceBlockMap`]
//! for module listings).

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One detected module installation as reported by a resource provider.
///
/// Duplicates are expected: every record is an independent sighting. Both
/// fields are optional on the wire; a missing or `null` `AppName` means the
/// record is skipped, a missing `AppVersion` is read as "version unknown".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInstallationRecord {
    #[serde(rename = "AppName", default)]
    pub app_name: Option<String>,
    #[serde(rename = "AppVersion", default)]
    pub app_version: Option<String>,
}

impl RawInstallationRecord {
    pub fn new(app_name: impl Into<String>, app_version: impl Into<String>) -> Self {
        Self {
            app_name: Some(app_name.into()),
            app_version: Some(app_version.into()),
        }
    }

    /// `AppName`, or the empty string when absent.
    pub fn name(&self) -> &str {
        self.app_name.as_deref().unwrap_or_default()
    }

    /// `AppVersion`, or the empty string when absent.
    pub fn version(&self) -> &str {
        self.app_version.as_deref().unwrap_or_default()
    }
}

/// Result of running one per-source routine over one raw sighting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// A usable canonical `(name, version)` pair. `version` may be empty.
    Parsed { name: String, version: String },
    /// Filtered on purpose (sentinel names, known noise). Never logged as an error.
    Dropped,
    /// The routine could not make sense of the record.
    Failed(String),
}

impl ParseOutcome {
    /// Wrap a cleaned pair. An empty name has no usable identity and becomes
    /// [`ParseOutcome::Dropped`].
    pub fn from_pair(name: String, version: String) -> Self {
        if name.is_empty() {
            ParseOutcome::Dropped
        } else {
            ParseOutcome::Parsed { name, version }
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        ParseOutcome::Failed(reason.into())
    }

    /// The parsed pair, if any.
    pub fn pair(&self) -> Option<(&str, &str)> {
        match self {
            ParseOutcome::Parsed { name, version } => Some((name, version)),
            _ => None,
        }
    }
}

/// Versions seen for one canonical name. The empty string means "unknown".
pub type VersionSet = BTreeSet<String>;

/// Canonical name → versions for a single resource. Names are unique by
/// construction; repeated sightings union into the same set.
pub type SoftwareVersions = BTreeMap<String, VersionSet>;

/// Resource identifier → canonical software of that resource.
pub type ResourceSoftwareMap = BTreeMap<String, SoftwareVersions>;

/// One software entry recovered from a module listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftwareInfo {
    pub name: String,
    pub versions: VersionSet,
    pub description: String,
}

impl SoftwareInfo {
    pub fn new<I, S>(name: impl Into<String>, versions: I, description: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            versions: versions.into_iter().map(Into::into).collect(),
            description: description.into(),
        }
    }
}

/// Resource name → software recovered from that resource's module listings.
pub type ResourceBlockMap = BTreeMap<String, Vec<SoftwareInfo>>;
