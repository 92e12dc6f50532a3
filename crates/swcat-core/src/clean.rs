//! Generic cleaning primitives shared by every per-source routine.
//!
//! [`clean_name_version`] folds case, whitespace and a handful of sentinel
//! values into one shape. [`split_embedded_version`] recovers a version that a
//! source wrote into the name field instead of the version field.

use regex::Regex;
use std::sync::LazyLock;

/// Module-file extension some sites leak into names and versions.
pub const MODULE_EXTENSION: &str = ".lua";
/// Version placeholder meaning "not reported".
pub const UNDEFINED_VERSION: &str = "undefined";
/// Name placeholder meaning "no name".
pub const NULL_NAME: &str = "null";

static NAME_DASH_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)-(\d.*)$").expect("static pattern"));
static NAME_SPACE_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)\s(\d.*)$").expect("static pattern"));

// ---------------------------------------------------------------------------
// Cleaning
// ---------------------------------------------------------------------------

/// Normalise a raw `(name, version)` pair.
///
/// Rules, in order: trim and lowercase both fields, strip a trailing `.lua`,
/// reset an `undefined` version, reset a `null` name, drop one leading `.`
/// from the name. The rules are re-applied until nothing changes, so the
/// function is idempotent even for inputs like `".null"` or `"x .lua"`.
pub fn clean_name_version(name: &str, version: &str) -> (String, String) {
    let mut current = clean_pass(name, version);
    loop {
        let next = clean_pass(&current.0, &current.1);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn clean_pass(name: &str, version: &str) -> (String, String) {
    let mut name = name.trim().to_lowercase();
    let mut version = version.trim().to_lowercase();

    strip_extension(&mut name);
    strip_extension(&mut version);

    if version == UNDEFINED_VERSION {
        version.clear();
    }
    if name == NULL_NAME {
        name.clear();
    }
    if name.starts_with('.') {
        name.remove(0);
    }
    (name, version)
}

fn strip_extension(field: &mut String) {
    let len = field.trim_end_matches(MODULE_EXTENSION).len();
    field.truncate(len);
}

// ---------------------------------------------------------------------------
// Name-embedded versions
// ---------------------------------------------------------------------------

/// Separator between a name and a version written into the name field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddedVersion {
    /// `foo-1.2.3` (Spack-style module names).
    Dash,
    /// `Pytorch 1.13.1`.
    Space,
}

impl EmbeddedVersion {
    fn pattern(self) -> &'static Regex {
        match self {
            EmbeddedVersion::Dash => &NAME_DASH_VERSION,
            EmbeddedVersion::Space => &NAME_SPACE_VERSION,
        }
    }

    /// Split `name` at the first separator followed by a digit. The prefix is
    /// the shortest one that leaves a digit-leading suffix.
    pub fn split(self, name: &str) -> Option<(&str, &str)> {
        let caps = self.pattern().captures(name)?;
        Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
    }
}

/// Move a version embedded in `name` into `version`.
///
/// The split only happens when `version` is empty or `undefined`. Separately,
/// a name whose second whitespace token repeats the version verbatim is
/// collapsed to its first token (`"python 3.11"` with version `"3.11"`).
pub fn split_embedded_version(
    name: &str,
    version: &str,
    separator: EmbeddedVersion,
) -> (String, String) {
    let (mut name, mut version) = (name.to_string(), version.to_string());

    if version.is_empty() || version == UNDEFINED_VERSION {
        if let Some((prefix, suffix)) = separator.split(&name) {
            let (prefix, suffix) = (prefix.to_string(), suffix.to_string());
            name = prefix;
            version = suffix;
        }
    }

    if name.contains(' ') {
        let mut tokens = name.split_whitespace();
        if let (Some(first), Some(second)) = (tokens.next(), tokens.next()) {
            if second == version {
                name = first.to_string();
            }
        }
    }

    (name, version)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(" FOO ", "1.0", "foo", "1.0")]
    #[case("gcc.lua", "12.2.lua", "gcc", "12.2")]
    #[case("cmake", "UNDEFINED", "cmake", "")]
    #[case("null", "2.1", "", "2.1")]
    #[case(".hidden", "1", "hidden", "1")]
    #[case(".null", "", "", "")]
    #[case("x .lua", "", "x", "")]
    #[case("", "", "", "")]
    fn cleaning_rules(
        #[case] name: &str,
        #[case] version: &str,
        #[case] want_name: &str,
        #[case] want_version: &str,
    ) {
        assert_eq!(
            clean_name_version(name, version),
            (want_name.to_string(), want_version.to_string())
        );
    }

    #[test]
    fn case_and_whitespace_insensitive() {
        assert_eq!(
            clean_name_version(" FOO ", "1.0"),
            clean_name_version("foo", "1.0")
        );
    }

    #[rstest]
    #[case("foo-1.2.3", "", "foo", "1.2.3")]
    #[case("foo-1.2.3", "undefined", "foo", "1.2.3")]
    #[case("py-numpy-1.26", "", "py-numpy", "1.26")]
    #[case("foo-bar", "", "foo-bar", "")]
    #[case("foo-1.2.3", "9.9", "foo-1.2.3", "9.9")]
    #[case("a-b-2-c", "", "a-b", "2-c")]
    fn dash_split(
        #[case] name: &str,
        #[case] version: &str,
        #[case] want_name: &str,
        #[case] want_version: &str,
    ) {
        assert_eq!(
            split_embedded_version(name, version, EmbeddedVersion::Dash),
            (want_name.to_string(), want_version.to_string())
        );
    }

    #[test]
    fn dash_split_prefers_shortest_prefix() {
        // Non-greedy: the first dash followed by a digit wins.
        assert_eq!(EmbeddedVersion::Dash.split("lib-2-x-3"), Some(("lib", "2-x-3")));
    }

    #[test]
    fn space_split() {
        assert_eq!(
            split_embedded_version("pytorch 1.13.1", "", EmbeddedVersion::Space),
            ("pytorch".to_string(), "1.13.1".to_string())
        );
    }

    #[test]
    fn redundant_version_token_collapsed() {
        assert_eq!(
            split_embedded_version("python 3.11", "3.11", EmbeddedVersion::Dash),
            ("python".to_string(), "3.11".to_string())
        );
        // Second token differs: leave it alone.
        assert_eq!(
            split_embedded_version("anaconda python", "3.11", EmbeddedVersion::Dash),
            ("anaconda python".to_string(), "3.11".to_string())
        );
    }

    #[test]
    fn single_token_with_trailing_space_does_not_panic() {
        assert_eq!(
            split_embedded_version("foo ", "1.0", EmbeddedVersion::Dash),
            ("foo ".to_string(), "1.0".to_string())
        );
    }

    proptest! {
        #[test]
        fn cleaning_is_idempotent(
            name in r"[ .A-Za-z0-9_/-]{0,16}(\.lua|null|undefined)?",
            version in r"[ .A-Za-z0-9_/-]{0,12}(\.lua|undefined|UNDEFINED)?",
        ) {
            let once = clean_name_version(&name, &version);
            let twice = clean_name_version(&once.0, &once.1);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn cleaned_fields_are_trimmed_lowercase(
            name in r"[ A-Za-z0-9.-]{0,16}",
            version in r"[ A-Za-z0-9.-]{0,12}",
        ) {
            let (n, v) = clean_name_version(&name, &version);
            prop_assert_eq!(n.trim(), n.as_str());
            prop_assert_eq!(v.trim(), v.as_str());
            prop_assert_eq!(n.to_lowercase(), n.clone());
            prop_assert!(!n.starts_with('.'));
        }
    }
}
