//! File-boundary operations behind each CLI subcommand.
//!
//! Every function here reads its inputs, runs one of the pure normalizers and
//! hands the result back; writing is a separate step so callers (and tests)
//! can inspect results first.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use swcat_core::catalog::{build_records, Catalog};
use swcat_core::config::{CatalogConfig, EnrichmentConfig};
use swcat_core::{Blacklist, ResourceBlockMap, ResourceSoftwareMap};
use swcat_enrich::{load_or_fetch, CondaForgeSource, EnrichOptions, MetadataMap, MetadataSource};
use swcat_parsers::records::{decode_operations, RecordBatch};
use swcat_parsers::{BlockNormalizer, RecordNormalizer};

// ---------------------------------------------------------------------------
// Record-stream path
// ---------------------------------------------------------------------------

/// Read and decode an operations dump. Missing files and malformed top-level
/// JSON are errors.
pub fn read_operations(path: &Path) -> Result<RecordBatch> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read operations data {}", path.display()))?;
    decode_operations(&text)
        .with_context(|| format!("operations data {} is not a resource → records object", path.display()))
}

/// Normalise the operations dump at `input`.
pub fn process_operations_file(input: &Path, blacklist: Blacklist) -> Result<ResourceSoftwareMap> {
    let batch = read_operations(input)?;
    tracing::info!(path = %input.display(), resources = batch.len(), "read operations data");
    Ok(RecordNormalizer::with_default_sources(blacklist).normalize(&batch))
}

/// Read a previously written record-stream result.
pub fn read_parsed(path: &Path) -> Result<ResourceSoftwareMap> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read parsed software {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("parsed software {} is malformed", path.display()))
}

// ---------------------------------------------------------------------------
// Text-block path
// ---------------------------------------------------------------------------

/// `(file_name, content)` for every regular file in `dir`, sorted by name.
/// Anything that is not a file is skipped.
pub fn read_spider_dir(dir: &Path) -> Result<Vec<(String, String)>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read spider output directory {}", dir.display()))?;

    let mut listings = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to list {}", dir.display()))?;
        let path = entry.path();
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if !path.is_file() {
            tracing::info!(item = %file_name, dir = %dir.display(), "not a file, skipping");
            continue;
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read listing {}", path.display()))?;
        listings.push((file_name, content));
    }
    listings.sort();
    Ok(listings)
}

/// Extract every listing in `dir`.
pub fn process_spider_dir(dir: &Path, blacklist: Blacklist) -> Result<ResourceBlockMap> {
    let listings = read_spider_dir(dir)?;
    let normalizer = BlockNormalizer::with_default_sources(blacklist)?;
    Ok(normalizer.normalize(
        listings
            .iter()
            .map(|(name, content)| (name.as_str(), content.as_str())),
    ))
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Write `value` as pretty JSON, creating parent directories.
pub fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Outcome of one catalog update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogUpdate {
    pub inserted: usize,
    pub updated: usize,
    pub total: usize,
}

/// Upsert the rows for `parsed` into the catalog file at `catalog_path`.
pub fn update_catalog(
    parsed: &ResourceSoftwareMap,
    catalog_path: &Path,
    config: &CatalogConfig,
) -> Result<CatalogUpdate> {
    let mut catalog = Catalog::load_or_default(catalog_path)?;
    let records = build_records(parsed, config);
    let incoming = records.len();
    let inserted = catalog.upsert(records, config.merge_policy);
    catalog.save(catalog_path)?;

    let update = CatalogUpdate {
        inserted,
        updated: incoming - inserted,
        total: catalog.len(),
    };
    tracing::info!(
        path = %catalog_path.display(),
        inserted = update.inserted,
        updated = update.updated,
        total = update.total,
        "catalog updated"
    );
    Ok(update)
}

// ---------------------------------------------------------------------------
// Enrichment
// ---------------------------------------------------------------------------

/// Every canonical name across all resources, deduplicated.
pub fn canonical_names(parsed: &ResourceSoftwareMap) -> Vec<String> {
    parsed
        .values()
        .flat_map(|software| software.keys().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Metadata for every canonical name in `parsed`, from `source` or the cache.
pub fn enrich_with<S>(
    parsed: &ResourceSoftwareMap,
    cache: &Path,
    source: &S,
    options: EnrichOptions,
) -> Result<MetadataMap>
where
    S: MetadataSource + ?Sized,
{
    let names = canonical_names(parsed);
    load_or_fetch(cache, &names, source, options)
        .with_context(|| format!("package metadata enrichment failed (cache {})", cache.display()))
}

/// [`enrich_with`] against conda-forge.
pub fn enrich_from_conda_forge(
    parsed: &ResourceSoftwareMap,
    cache: &Path,
    config: &EnrichmentConfig,
) -> Result<MetadataMap> {
    let source = CondaForgeSource::new(config);
    enrich_with(parsed, cache, &source, EnrichOptions::from(config))
}
