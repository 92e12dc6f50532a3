//! swcat: software catalog for HPC resource providers
//!
//! Turns per-site module reports into one canonical `resource → software →
//! versions` map. This crate re-exports the library crates and holds the
//! file-boundary functions the CLI and integration tests drive.
//!
//! # Architecture
//!
//! ```text
//! operations JSON ──► RecordNormalizer ──┐
//!                                        ├──► parsed JSON ──► Catalog
//! spider listings ──► BlockNormalizer ───┘          │
//!                                                   └──► enrich (conda-forge)
//! ```
//!
//! Normalisation is pure and synchronous. File I/O only happens in
//! [`pipeline`].

pub mod pipeline;

pub use swcat_core;
pub use swcat_enrich;
pub use swcat_parsers;

pub use swcat_core::{
    Blacklist, ParseOutcome, RawInstallationRecord, ResourceBlockMap, ResourceSoftwareMap,
    SoftwareInfo, SoftwareVersions, VersionSet,
};
pub use swcat_parsers::{BlockNormalizer, RecordNormalizer};
