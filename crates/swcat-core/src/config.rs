//! Configuration types for swcat.
//!
//! [`Config::load`] reads `~/.config/swcat/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::from_file`] layers an
//! explicit file over the defaults. [`Config::defaults`] returns the defaults
//! without touching the filesystem (useful in tests).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[paths]
operations_data   = "data/operations_data.json"
parsed_software   = "data/parsed_software.json"
spider_output_dir = "data/spiderOutput"
blacklist         = "data/software_blacklist"
enrichment_cache  = "data/conda_forge_softw_desc.json"
log_file          = "logs/swcat.log"

[enrichment]
max_workers  = 10
retries      = 2
timeout_secs = 10
recipe_url   = "https://raw.githubusercontent.com/conda-forge/{name}-feedstock/main/recipe/meta.yaml"
source_url   = "https://github.com/conda-forge/{name}-feedstock/blob/main/recipe/meta.yaml"

[catalog]
merge_policy             = "replace"
individual_documentation = ["anvil", "bridges-2", "darwin"]

[[catalog.documentation]]
resource = "aces.tamu.access-ci.org"
url      = "https://hprc.tamu.edu/software/aces"

[[catalog.documentation]]
resource = "anvil.purdue.access-ci.org"
url      = "https://www.rcac.purdue.edu/software"

[[catalog.documentation]]
resource = "bridges2.psc.access-ci.org"
url      = "https://www.psc.edu/resources/software"

[[catalog.documentation]]
resource = "darwin.udel.access-ci.org"
url      = "https://docs.hpc.udel.edu/software/"

[[catalog.documentation]]
resource = "delta-cpu.ncsa.access-ci.org"
url      = "https://docs.ncsa.illinois.edu/systems/delta/en/latest/user_guide/software.html"

[[catalog.documentation]]
resource = "delta-gpu.ncsa.access-ci.org"
url      = "https://docs.ncsa.illinois.edu/systems/delta/en/latest/user_guide/software.html"

[[catalog.documentation]]
resource = "expanse.sdsc.access-ci.org"
url      = "https://www.sdsc.edu/support/user_guides/expanse.html#modules"

[[catalog.documentation]]
resource = "faster.tamu.access-ci.org"
url      = "https://hprc.tamu.edu/software/faster"

[[catalog.documentation]]
resource = "ookami.sbu.access-ci.org"
url      = "https://www.stonybrook.edu/commcms/ookami/support/faq/software_on_ookami"

[[catalog.documentation]]
resource = "stampede3.tacc.access-ci.org"
url      = "https://tacc.utexas.edu/use-tacc/software-list"

[[catalog.documentation]]
resource = "ranch.tacc.access-ci.org"
url      = "https://tacc.utexas.edu/use-tacc/software-list"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// `[paths]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_operations_data")]
    pub operations_data: PathBuf,
    #[serde(default = "default_parsed_software")]
    pub parsed_software: PathBuf,
    #[serde(default = "default_spider_output_dir")]
    pub spider_output_dir: PathBuf,
    #[serde(default = "default_blacklist")]
    pub blacklist: PathBuf,
    #[serde(default = "default_enrichment_cache")]
    pub enrichment_cache: PathBuf,
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

fn default_operations_data() -> PathBuf { "data/operations_data.json".into() }
fn default_parsed_software() -> PathBuf { "data/parsed_software.json".into() }
fn default_spider_output_dir() -> PathBuf { "data/spiderOutput".into() }
fn default_blacklist() -> PathBuf { "data/software_blacklist".into() }
fn default_enrichment_cache() -> PathBuf { "data/conda_forge_softw_desc.json".into() }
fn default_log_file() -> PathBuf { "logs/swcat.log".into() }

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            operations_data: default_operations_data(),
            parsed_software: default_parsed_software(),
            spider_output_dir: default_spider_output_dir(),
            blacklist: default_blacklist(),
            enrichment_cache: default_enrichment_cache(),
            log_file: default_log_file(),
        }
    }
}

/// `[enrichment]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EnrichmentConfig {
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
    #[serde(default = "default_retries")]
    pub retries: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Recipe location; `{name}` is replaced by the package name.
    #[serde(default = "default_recipe_url")]
    pub recipe_url: String,
    /// Human-facing link recorded alongside fetched metadata.
    #[serde(default = "default_source_url")]
    pub source_url: String,
}

fn default_max_workers() -> usize { 10 }
fn default_retries() -> u32 { 2 }
fn default_timeout_secs() -> u64 { 10 }
fn default_recipe_url() -> String {
    "https://raw.githubusercontent.com/conda-forge/{name}-feedstock/main/recipe/meta.yaml".to_string()
}
fn default_source_url() -> String {
    "https://github.com/conda-forge/{name}-feedstock/blob/main/recipe/meta.yaml".to_string()
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            max_workers: default_max_workers(),
            retries: default_retries(),
            timeout_secs: default_timeout_secs(),
            recipe_url: default_recipe_url(),
            source_url: default_source_url(),
        }
    }
}

/// How a catalog upsert treats the versions already stored for a
/// `(resource, software)` pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergePolicy {
    /// The newest ingestion's version set wins.
    #[default]
    Replace,
    /// Stored and incoming version sets are unioned.
    Union,
}

/// One `[[catalog.documentation]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocumentationLink {
    pub resource: String,
    pub url: String,
}

/// `[catalog]` section of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub merge_policy: MergePolicy,
    /// RP names whose sites have a page per software package.
    #[serde(default)]
    pub individual_documentation: Vec<String>,
    #[serde(default)]
    pub documentation: Vec<DocumentationLink>,
}

impl CatalogConfig {
    /// Documentation URL for an exact resource identifier, if configured.
    pub fn documentation_for(&self, resource: &str) -> Option<&str> {
        self.documentation
            .iter()
            .find(|link| link.resource == resource)
            .map(|link| link.url.as_str())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/swcat/config.toml`, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> crate::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| crate::Error::write(parent, e))?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())
                .map_err(|e| crate::Error::write(&path, e))?;
        }

        Self::from_file(&path)
    }

    /// Layer `path` (which must exist) over the built-in defaults.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(true))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("swcat")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
