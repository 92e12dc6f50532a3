//! Test builders for operations dumps and module listings.
//!
//! These favour readability in tests over flexibility; they panic on invalid
//! input rather than returning `Result`.

use std::path::{Path, PathBuf};
use swcat_core::{RawInstallationRecord, ResourceSoftwareMap, VersionSet};
use swcat_parsers::records::RecordBatch;

// ---------------------------------------------------------------------------
// OperationsBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for record-stream input.
///
/// ```rust,ignore
/// let batch = OperationsBuilder::new()
///     .record("kyric01", "oneapi/2023.1", "undefined")
///     .build();
/// ```
#[derive(Default)]
pub struct OperationsBuilder {
    batch: RecordBatch,
}

impl OperationsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(mut self, resource: &str, name: &str, version: &str) -> Self {
        self.batch
            .entry(resource.to_string())
            .or_default()
            .push(RawInstallationRecord::new(name, version));
        self
    }

    /// A resource that reported nothing.
    pub fn empty_resource(mut self, resource: &str) -> Self {
        self.batch.entry(resource.to_string()).or_default();
        self
    }

    pub fn build(self) -> RecordBatch {
        self.batch
    }

    /// The batch as the operations API would deliver it.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.batch).unwrap()
    }
}

// ---------------------------------------------------------------------------
// ListingBuilder
// ---------------------------------------------------------------------------

/// Builds `module spider` text in the default two-space layout.
#[derive(Default)]
pub struct ListingBuilder {
    text: String,
}

impl ListingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Free text before the first block (banners, headings).
    pub fn preamble(mut self, line: &str) -> Self {
        self.text.push_str(line);
        self.text.push('\n');
        self
    }

    /// `  name: v1, v2` followed by indented description lines.
    pub fn block(mut self, name: &str, versions: &[&str], description: &[&str]) -> Self {
        self.text.push_str(&format!("  {name}: {}\n", versions.join(", ")));
        for line in description {
            self.text.push_str(&format!("    {line}\n"));
        }
        self
    }

    pub fn build(self) -> String {
        self.text
    }
}

// ---------------------------------------------------------------------------
// Values and files
// ---------------------------------------------------------------------------

pub fn versions(v: &[&str]) -> VersionSet {
    v.iter().map(|s| s.to_string()).collect()
}

/// `resource → name → versions` from literal triples.
pub fn software_map(entries: &[(&str, &str, &[&str])]) -> ResourceSoftwareMap {
    let mut map = ResourceSoftwareMap::new();
    for (resource, name, v) in entries {
        map.entry(resource.to_string())
            .or_default()
            .insert(name.to_string(), versions(v));
    }
    map
}

/// Write `content` to `dir/name` and return the full path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}
