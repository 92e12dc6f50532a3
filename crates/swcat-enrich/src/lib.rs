//! swcat-enrich: package metadata for canonical software names.
//!
//! A [`MetadataSource`] looks one package up; [`enrich`] runs a batch of
//! lookups on a bounded worker pool and [`load_or_fetch`] keeps the result in
//! a JSON cache file. Enrichment never touches canonical names or versions,
//! and a failed lookup only means the package has no metadata.

pub mod cache;
pub mod conda;
pub mod error;

pub use cache::{load_or_fetch, read_cache, write_cache};
pub use conda::CondaForgeSource;
pub use error::EnrichError;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use swcat_core::config::EnrichmentConfig;

/// Metadata of one upstream package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageMetadata {
    pub name: String,
    /// The recipe's `about` section (summary, description, home, license...).
    pub about: serde_json::Value,
    /// Human-facing link to the recipe.
    pub source: String,
}

/// Package name → metadata, for the packages that were found.
pub type MetadataMap = BTreeMap<String, PackageMetadata>;

/// Something that can look a package up by name.
pub trait MetadataSource: Send + Sync {
    /// `Ok(None)` when the package is unknown upstream.
    fn fetch(&self, name: &str) -> Result<Option<PackageMetadata>, EnrichError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrichOptions {
    pub max_workers: usize,
    /// Extra attempts after the first failure.
    pub retries: u32,
}

impl Default for EnrichOptions {
    fn default() -> Self {
        Self::from(&EnrichmentConfig::default())
    }
}

impl From<&EnrichmentConfig> for EnrichOptions {
    fn from(config: &EnrichmentConfig) -> Self {
        Self {
            max_workers: config.max_workers,
            retries: config.retries,
        }
    }
}

/// Look every name up on a pool of `max_workers` threads.
///
/// Failures are logged and left out of the result; only a pool that cannot
/// be built is an error.
pub fn enrich<S>(
    names: &[String],
    source: &S,
    options: EnrichOptions,
) -> Result<MetadataMap, EnrichError>
where
    S: MetadataSource + ?Sized,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.max_workers.max(1))
        .build()?;

    let found: Vec<PackageMetadata> = pool.install(|| {
        names
            .par_iter()
            .filter_map(|name| fetch_with_retries(source, name, options.retries))
            .collect()
    });

    tracing::info!(requested = names.len(), found = found.len(), "enrichment finished");
    Ok(found.into_iter().map(|meta| (meta.name.clone(), meta)).collect())
}

fn fetch_with_retries<S>(source: &S, name: &str, retries: u32) -> Option<PackageMetadata>
where
    S: MetadataSource + ?Sized,
{
    let mut attempt = 0;
    loop {
        match source.fetch(name) {
            Ok(found) => return found,
            Err(err) if attempt < retries => {
                attempt += 1;
                tracing::debug!(name, attempt, %err, "retrying metadata fetch");
            }
            Err(err) => {
                tracing::warn!(name, %err, "metadata fetch failed");
                return None;
            }
        }
    }
}
