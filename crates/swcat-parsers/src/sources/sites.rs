//! Routines for sites with small, local naming quirks.

use super::{slash_join, RecordParser};
use swcat_core::clean::{split_embedded_version, EmbeddedVersion};
use swcat_core::ParseOutcome;

// ---------------------------------------------------------------------------
// Kyric
// ---------------------------------------------------------------------------

/// KyRIC (UKY): Spack-style `name-version` modules, container names in the
/// version field, and free-text names.
#[derive(Debug, Clone, Copy)]
pub struct Kyric;

impl RecordParser for Kyric {
    fn source(&self) -> &'static str {
        "kyric"
    }

    fn rewrite(&self, name: String, version: String) -> ParseOutcome {
        let (name, version) = if name.contains("built") {
            // "foo built with bar ..." sentences
            let first = name.split_whitespace().next().unwrap_or_default().to_string();
            (first, version)
        } else if name.contains("kyric") {
            // site container: the real package is in the version field
            (version, String::new())
        } else if let Some(rest) = name.strip_prefix("oneapi/") {
            ("oneapi".to_string(), rest.to_string())
        } else {
            (name, version)
        };

        let (name, version) = split_embedded_version(&name, &version, EmbeddedVersion::Dash);
        ParseOutcome::from_pair(name, version)
    }
}

// ---------------------------------------------------------------------------
// Bridges-2
// ---------------------------------------------------------------------------

/// Bridges-2 (PSC): display names such as `Pytorch 1.13.1`.
#[derive(Debug, Clone, Copy)]
pub struct Bridges;

impl RecordParser for Bridges {
    fn source(&self) -> &'static str {
        "bridges"
    }

    fn rewrite(&self, name: String, version: String) -> ParseOutcome {
        let (name, version) = split_embedded_version(&name, &version, EmbeddedVersion::Space);
        if name.contains("anton3 minio client") {
            return ParseOutcome::Dropped;
        }
        ParseOutcome::from_pair(name, version)
    }
}

// ---------------------------------------------------------------------------
// Stampede3
// ---------------------------------------------------------------------------

/// Stampede3 (TACC): `tacc-` vendor prefix.
#[derive(Debug, Clone, Copy)]
pub struct Stampede;

impl RecordParser for Stampede {
    fn source(&self) -> &'static str {
        "stampede"
    }

    fn rewrite(&self, name: String, version: String) -> ParseOutcome {
        ParseOutcome::from_pair(name.replace("tacc-", ""), version)
    }
}

// ---------------------------------------------------------------------------
// Anvil
// ---------------------------------------------------------------------------

/// Anvil (Purdue): Intel marketing names.
#[derive(Debug, Clone, Copy)]
pub struct Anvil;

impl RecordParser for Anvil {
    fn source(&self) -> &'static str {
        "anvil"
    }

    fn rewrite(&self, mut name: String, version: String) -> ParseOutcome {
        if name.contains("intel® oneapi") {
            name = "oneapi".to_string();
        }
        if name.contains("intel® mpi") {
            name = "impi".to_string();
        }
        ParseOutcome::from_pair(name, version)
    }
}

// ---------------------------------------------------------------------------
// TAMU (ACES, FASTER)
// ---------------------------------------------------------------------------

/// ACES and FASTER (TAMU) share conventions: `xfce4-<component>` modules and
/// `oneapi/<release>` paths.
#[derive(Debug, Clone, Copy)]
pub struct Tamu;

impl RecordParser for Tamu {
    fn source(&self) -> &'static str {
        "tamu"
    }

    fn rewrite(&self, name: String, version: String) -> ParseOutcome {
        if let Some(component) = name.strip_prefix("xfce4-") {
            let version = slash_join(&[component, &version]);
            return ParseOutcome::from_pair("xfce4".to_string(), version);
        }
        if let Some(release) = name.strip_prefix("oneapi/") {
            return ParseOutcome::from_pair("oneapi".to_string(), release.to_string());
        }
        ParseOutcome::from_pair(name, version)
    }
}

// ---------------------------------------------------------------------------
// Jetstream2
// ---------------------------------------------------------------------------

/// Jetstream2 (Indiana): `nvhpc/<flavour>` module paths.
#[derive(Debug, Clone, Copy)]
pub struct Jetstream;

impl RecordParser for Jetstream {
    fn source(&self) -> &'static str {
        "jetstream"
    }

    fn rewrite(&self, name: String, version: String) -> ParseOutcome {
        if let Some(flavour) = name.strip_prefix("nvhpc/") {
            let version = slash_join(&[&version, flavour]);
            return ParseOutcome::from_pair("nvhpc".to_string(), version);
        }
        ParseOutcome::from_pair(name, version)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
