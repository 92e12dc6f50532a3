//! swcat-core: software catalog core library.
//!
//! Shared types and the pieces every ingestion path depends on: the generic
//! cleaning primitives, the ordered source dispatcher, the blacklist,
//! configuration, and the catalog rows handed to persistence.
//!
//! # Architecture
//!
//! ```text
//! raw records / listings ──► per-source routine ──► aggregator ──► ResourceSoftwareMap
//!                                  ▲                                      │
//!                  Dispatcher ─────┘                      catalog rows ◄──┘
//! ```
//!
//! Everything here is synchronous and free of shared mutable state.

pub mod blacklist;
pub mod catalog;
pub mod clean;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod types;

pub use blacklist::Blacklist;
pub use dispatch::Dispatcher;
pub use error::{Error, Result};
pub use types::{
    ParseOutcome, RawInstallationRecord, ResourceBlockMap, ResourceSoftwareMap, SoftwareInfo,
    SoftwareVersions, VersionSet,
};
