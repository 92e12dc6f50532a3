//! Catalog rows: the shape handed to persistence.
//!
//! A [`ResourceSoftwareMap`] from one ingestion run becomes one
//! [`CatalogRecord`] per `(resource, software)` pair. [`Catalog`] is the
//! keyed table those rows are upserted into; the relational store mirrors
//! its semantics.

use crate::config::{CatalogConfig, MergePolicy};
use crate::{Error, ResourceSoftwareMap, VersionSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// RP name of a resource identifier.
///
/// `bridges2-gpu-ai.psc.access-ci.org` → `bridges-2`,
/// `delta-cpu.ncsa.access-ci.org` → `delta`.
pub fn rp_name(resource_id: &str) -> String {
    let host = resource_id.split('.').next().unwrap_or_default();
    let name = host.split('-').next().unwrap_or_default();
    if name.contains("bridges") {
        "bridges-2".to_string()
    } else {
        name.to_string()
    }
}

/// Resource identifier with the sub-resource suffix of its first label
/// removed: `bridges2-gpu-ai.psc.access-ci.org` → `bridges2.psc.access-ci.org`.
pub fn rp_group_id(resource_id: &str) -> String {
    match resource_id.split_once('.') {
        Some((host, rest)) => {
            let base = host.split('-').next().unwrap_or(host);
            format!("{base}.{rest}")
        }
        None => resource_id.split('-').next().unwrap_or(resource_id).to_string(),
    }
}

/// One row of the resource/software association.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub resource_id: String,
    pub rp_name: String,
    pub software_name: String,
    pub versions: VersionSet,
    pub documentation_url: String,
    pub has_individual_documentation: bool,
}

impl CatalogRecord {
    /// Versions as the comma-joined column value.
    pub fn versions_column(&self) -> String {
        self.versions.iter().cloned().collect::<Vec<_>>().join(",")
    }
}

/// Flatten a run's output into catalog rows.
pub fn build_records(map: &ResourceSoftwareMap, config: &CatalogConfig) -> Vec<CatalogRecord> {
    let mut records = Vec::new();
    for (resource_id, software) in map {
        let rp = rp_name(resource_id);
        let url = config
            .documentation_for(resource_id)
            .or_else(|| config.documentation_for(&rp_group_id(resource_id)))
            .unwrap_or_default()
            .to_string();
        let individual = config.individual_documentation.iter().any(|n| *n == rp);

        for (name, versions) in software {
            records.push(CatalogRecord {
                resource_id: resource_id.clone(),
                rp_name: rp.clone(),
                software_name: name.clone(),
                versions: versions.clone(),
                documentation_url: url.clone(),
                has_individual_documentation: individual,
            });
        }
    }
    records
}

// ---------------------------------------------------------------------------
// Catalog table
// ---------------------------------------------------------------------------

/// Rows keyed by `(resource_id, software_name)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    rows: BTreeMap<(String, String), CatalogRecord>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update each record. Returns the number of rows inserted
    /// (as opposed to updated).
    pub fn upsert(
        &mut self,
        records: impl IntoIterator<Item = CatalogRecord>,
        policy: MergePolicy,
    ) -> usize {
        let mut inserted = 0;
        for record in records {
            let key = (record.resource_id.clone(), record.software_name.clone());
            match self.rows.get_mut(&key) {
                Some(existing) => {
                    let versions = match policy {
                        MergePolicy::Replace => record.versions,
                        MergePolicy::Union => {
                            let mut merged = std::mem::take(&mut existing.versions);
                            merged.extend(record.versions);
                            merged
                        }
                    };
                    *existing = CatalogRecord {
                        versions,
                        ..record
                    };
                }
                None => {
                    self.rows.insert(key, record);
                    inserted += 1;
                }
            }
        }
        inserted
    }

    pub fn get(&self, resource_id: &str, software_name: &str) -> Option<&CatalogRecord> {
        self.rows
            .get(&(resource_id.to_string(), software_name.to_string()))
    }

    pub fn records(&self) -> impl Iterator<Item = &CatalogRecord> {
        self.rows.values()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Read a catalog saved by [`Catalog::save`]. A missing file is an empty
    /// catalog; malformed JSON is an error.
    pub fn load_or_default(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let text = std::fs::read_to_string(path).map_err(|e| Error::read(path, e))?;
        let records: Vec<CatalogRecord> =
            serde_json::from_str(&text).map_err(|e| Error::json(path, e))?;
        let mut catalog = Self::new();
        catalog.upsert(records, MergePolicy::Replace);
        Ok(catalog)
    }

    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let records: Vec<&CatalogRecord> = self.records().collect();
        let json = serde_json::to_string_pretty(&records).map_err(|e| Error::json(path, e))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::write(parent, e))?;
        }
        std::fs::write(path, json).map_err(|e| Error::write(path, e))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
