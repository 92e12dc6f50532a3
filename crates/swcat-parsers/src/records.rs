//! Record-stream normalizer.
//!
//! Consumes `resource → [{AppName, AppVersion}]` sightings and produces
//! `resource → {name → {versions}}`. Each resource's records go through the
//! routine its identifier selects; same-named results union their versions.

use crate::sources::{default_dispatcher, BoxedParser};
use std::collections::BTreeMap;
use swcat_core::clean::NULL_NAME;
use swcat_core::{
    Blacklist, Dispatcher, ParseOutcome, RawInstallationRecord, ResourceSoftwareMap,
    SoftwareVersions,
};

/// Resource identifier → raw sightings, as decoded from an operations dump.
pub type RecordBatch = BTreeMap<String, Vec<RawInstallationRecord>>;

/// Decode an operations dump.
///
/// The top level must be an object of arrays; anything else is an error.
/// Individual array items that are not records (wrong types, not objects) are
/// skipped with a warning.
pub fn decode_operations(text: &str) -> Result<RecordBatch, serde_json::Error> {
    let raw: BTreeMap<String, Vec<serde_json::Value>> = serde_json::from_str(text)?;
    let mut batch = RecordBatch::new();

    for (resource, values) in raw {
        let records = values
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| {
                match serde_json::from_value::<RawInstallationRecord>(value) {
                    Ok(record) => Some(record),
                    Err(err) => {
                        tracing::warn!(%resource, index, %err, "skipping malformed record");
                        None
                    }
                }
            })
            .collect();
        batch.insert(resource, records);
    }
    Ok(batch)
}

/// Per-source aggregation over record streams.
pub struct RecordNormalizer {
    dispatcher: Dispatcher<BoxedParser>,
    blacklist: Blacklist,
}

impl RecordNormalizer {
    pub fn new(dispatcher: Dispatcher<BoxedParser>, blacklist: Blacklist) -> Self {
        Self {
            dispatcher,
            blacklist,
        }
    }

    /// The built-in routine table for the known resource providers.
    pub fn with_default_sources(blacklist: Blacklist) -> Self {
        Self::new(default_dispatcher(), blacklist)
    }

    /// Aggregate one resource's sightings into `name → versions`.
    pub fn normalize_resource(
        &self,
        resource_id: &str,
        records: &[RawInstallationRecord],
    ) -> SoftwareVersions {
        let parser = self.dispatcher.select(resource_id);
        let mut software = SoftwareVersions::new();

        for record in records {
            match record.app_name.as_deref() {
                None | Some("") | Some(NULL_NAME) => continue,
                Some(_) => {}
            }

            match parser.parse(record) {
                ParseOutcome::Parsed { name, version } => {
                    if self.blacklist.contains(&name) {
                        continue;
                    }
                    software.entry(name).or_default().insert(version);
                }
                ParseOutcome::Dropped => {}
                ParseOutcome::Failed(reason) => {
                    tracing::debug!(
                        resource = resource_id,
                        source = parser.source(),
                        name = record.name(),
                        version = record.version(),
                        %reason,
                        "skipping unparseable record"
                    );
                }
            }
        }
        software
    }

    /// Normalise every resource in the batch.
    pub fn normalize(&self, batch: &RecordBatch) -> ResourceSoftwareMap {
        batch
            .iter()
            .map(|(resource, records)| {
                let software = self.normalize_resource(resource, records);
                tracing::info!(resource = %resource, software = software.len(), "normalized resource");
                (resource.clone(), software)
            })
            .collect()
    }
}
