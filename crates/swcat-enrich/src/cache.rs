//! JSON cache of fetched metadata.
//!
//! The file holds a list of [`PackageMetadata`] objects. It is written once
//! and reused as-is on later runs; delete it to refetch.

use crate::{enrich, EnrichError, EnrichOptions, MetadataMap, MetadataSource, PackageMetadata};
use std::fs;
use std::path::Path;
use swcat_core::Error;

pub fn read_cache(path: &Path) -> Result<MetadataMap, Error> {
    let text = fs::read_to_string(path).map_err(|e| Error::read(path, e))?;
    let entries: Vec<PackageMetadata> =
        serde_json::from_str(&text).map_err(|e| Error::json(path, e))?;
    Ok(entries
        .into_iter()
        .map(|meta| (meta.name.clone(), meta))
        .collect())
}

pub fn write_cache(path: &Path, metadata: &MetadataMap) -> Result<(), Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::write(parent, e))?;
    }
    let entries: Vec<&PackageMetadata> = metadata.values().collect();
    let json = serde_json::to_string_pretty(&entries).map_err(|e| Error::json(path, e))?;
    fs::write(path, json).map_err(|e| Error::write(path, e))
}

/// Read the cache at `path`, or fetch `names` and create it.
pub fn load_or_fetch<S>(
    path: &Path,
    names: &[String],
    source: &S,
    options: EnrichOptions,
) -> Result<MetadataMap, EnrichError>
where
    S: MetadataSource + ?Sized,
{
    if path.exists() {
        tracing::info!(path = %path.display(), "using cached package metadata");
        return Ok(read_cache(path)?);
    }

    tracing::info!(path = %path.display(), packages = names.len(), "cache not found, fetching package metadata");
    let metadata = enrich(names, source, options)?;
    write_cache(path, &metadata)?;
    Ok(metadata)
}
