//! Custom header parsers for module listings.
//!
//! Most listings put `name: versions` on the header line. Three sites need
//! more: names whose tail is part of the version, and a container entry that
//! packs a manifest of nested packages into its version field.
//!
//! A parser sees the software already recovered from earlier blocks of the
//! same resource but never mutates it; nested packages are returned in
//! [`ParsedHeader::nested`] and merged by the extractor.

use std::fmt::Debug;
use swcat_core::clean::EmbeddedVersion;
use swcat_core::SoftwareInfo;

/// Header line after site-specific interpretation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedHeader {
    /// `(name, version_text)` for the block itself, if it describes one package.
    pub primary: Option<(String, String)>,
    /// Additional `(name, version)` packages found inside the header.
    pub nested: Vec<(String, String)>,
}

impl ParsedHeader {
    pub fn primary(name: impl Into<String>, version_text: impl Into<String>) -> Self {
        Self {
            primary: Some((name.into(), version_text.into())),
            nested: Vec::new(),
        }
    }
}

/// Site-specific interpretation of a block header.
pub trait HeaderParser: Debug + Send + Sync {
    fn parse(&self, name: &str, version_text: &str, known: &[SoftwareInfo]) -> ParsedHeader;
}

// ---------------------------------------------------------------------------
// Known prefix (Delta)
// ---------------------------------------------------------------------------

/// `name` may be `<known-package>-<variant>`: when the version text has no
/// slash, the longest dash-joined prefix of `name` already seen in this
/// resource becomes the name, and `<prefix>-` is removed from the version text.
/// A slash-delimited name keeps its first segment.
#[derive(Debug, Clone, Copy, Default)]
pub struct KnownPrefix;

impl HeaderParser for KnownPrefix {
    fn parse(&self, name: &str, version_text: &str, known: &[SoftwareInfo]) -> ParsedHeader {
        let mut name = name.to_string();
        let mut version_text = version_text.to_string();

        if !version_text.contains('/') {
            let parts: Vec<&str> = name.split('-').collect();
            let prefix = (1..=parts.len())
                .rev()
                .map(|len| parts[..len].join("-"))
                .find(|candidate| {
                    let candidate = candidate.to_lowercase();
                    known.iter().any(|entry| entry.name == candidate)
                });
            if let Some(prefix) = prefix {
                version_text = version_text.replace(&format!("{prefix}-"), "");
                name = prefix;
            }
        }

        if let Some((first, _)) = name.split_once('/') {
            name = first.to_string();
        }
        ParsedHeader::primary(name, version_text)
    }
}

// ---------------------------------------------------------------------------
// Digit suffix (KyRIC)
// ---------------------------------------------------------------------------

/// `name-<digit...>` headers: when the version text has no slash, the part
/// before the first `-<digit>` is the name and `<name>-` is removed from the
/// version text. A leading `segment/` is dropped from the name.
#[derive(Debug, Clone, Copy, Default)]
pub struct DigitSuffix;

impl HeaderParser for DigitSuffix {
    fn parse(&self, name: &str, version_text: &str, _known: &[SoftwareInfo]) -> ParsedHeader {
        let mut name = name.to_string();
        let mut version_text = version_text.to_string();

        if !version_text.contains('/') {
            if let Some((prefix, _)) = EmbeddedVersion::Dash.split(&name) {
                let prefix = prefix.to_string();
                version_text = version_text.replace(&format!("{prefix}-"), "");
                name = prefix;
            }
        }

        if let Some((_, rest)) = name.split_once('/') {
            name = rest.to_string();
        }
        ParsedHeader::primary(name, version_text)
    }
}

// ---------------------------------------------------------------------------
// Container manifest (Bridges-2)
// ---------------------------------------------------------------------------

/// Header name of the bundled-package container.
pub const CONTAINER_NAME: &str = "AI";

/// The container entry lists its contents as
/// `AI/<package>_<version>,AI/<package>_<version>,...`. The version is the
/// last `_`-delimited field, so package names may contain underscores. Every
/// pair is returned as a nested package; the container contributes no entry
/// of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainerManifest;

impl HeaderParser for ContainerManifest {
    fn parse(&self, name: &str, version_text: &str, _known: &[SoftwareInfo]) -> ParsedHeader {
        if name != CONTAINER_NAME {
            return ParsedHeader::primary(name.trim(), version_text.trim());
        }

        let container_prefix = format!("{CONTAINER_NAME}/");
        let nested = version_text
            .split(',')
            .map(|item| item.trim().replace(&container_prefix, ""))
            .filter(|item| !item.is_empty())
            .filter_map(|item| match item.rsplit_once('_') {
                Some((package, version)) => {
                    Some((package.trim().to_lowercase(), version.trim().to_string()))
                }
                None => {
                    tracing::debug!(item = %item, "container item without package_version form");
                    None
                }
            })
            .collect();

        ParsedHeader {
            primary: None,
            nested,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
