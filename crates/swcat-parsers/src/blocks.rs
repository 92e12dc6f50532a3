//! Module listing extractor.
//!
//! A listing is free text with one block per software:
//!
//! ```text
//!   gcc: gcc/11.4.0, gcc/12.2.0
//!     The GNU Compiler Collection.
//!     ----
//!     Lmod comment
//!   cmake: cmake/3.27.7
//! ```
//!
//! A [`BlockGrammar`] says where blocks start, how to read the header line,
//! how to split and clean versions, and which names to skip. Remaining lines
//! of a block are its description, cut at the description separator.

use crate::block_parsers::{HeaderParser, ParsedHeader};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use swcat_core::{Blacklist, Error, SoftwareInfo};

/// Start of a block (after the newline): two-space-indented token and colon.
pub const DEFAULT_BOUNDARY: &str = r"\s{2}[/\w.+-]+(?:/[\w+\-])*:";
/// Header line: `token: rest-of-line`.
pub const DEFAULT_HEADER: &str = r"([/\w.+-]+(?:-[/\w+\-]+)?): (.+)";
/// Separator between versions on the header line.
pub const DEFAULT_VERSION_SEPARATOR: &str = r"[,]";
/// Lmod appends comments to descriptions after this token.
pub const DESCRIPTION_SEPARATOR: &str = "----";

static DEFAULT_BOUNDARY_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_boundary(DEFAULT_BOUNDARY).expect("static pattern"));
static DEFAULT_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_header(DEFAULT_HEADER).expect("static pattern"));
static DEFAULT_VERSION_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(DEFAULT_VERSION_SEPARATOR).expect("static pattern"));

fn compile(pattern: &str) -> Result<Regex, Error> {
    Regex::new(pattern).map_err(|source| Error::Pattern {
        pattern: pattern.to_string(),
        source,
    })
}

fn compile_boundary(pattern: &str) -> Result<Regex, Error> {
    compile(&format!(r"\n(?:{pattern})"))
}

fn compile_header(pattern: &str) -> Result<Regex, Error> {
    compile(&format!("^(?:{pattern})"))
}

/// Default version cleaner: keep the text after the first `/`
/// (`gcc/11.4.0` → `11.4.0`).
pub fn after_first_slash(version: &str) -> String {
    match version.split_once('/') {
        Some((_, rest)) => rest.to_string(),
        None => version.to_string(),
    }
}

/// How to read one site's listing.
#[derive(Debug)]
pub struct BlockGrammar {
    boundary: Regex,
    header: Regex,
    version_separator: Regex,
    version_cleaner: fn(&str) -> String,
    description_separator: String,
    header_parser: Option<Box<dyn HeaderParser>>,
    exclude: HashSet<String>,
}

impl Default for BlockGrammar {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockGrammar {
    /// The default grammar: two-space blocks, `name: v1, v2` headers.
    pub fn new() -> Self {
        Self {
            boundary: DEFAULT_BOUNDARY_RE.clone(),
            header: DEFAULT_HEADER_RE.clone(),
            version_separator: DEFAULT_VERSION_SEPARATOR_RE.clone(),
            version_cleaner: after_first_slash,
            description_separator: DESCRIPTION_SEPARATOR.to_string(),
            header_parser: None,
            exclude: HashSet::new(),
        }
    }

    /// Block-start pattern, matched right after a newline.
    pub fn with_boundary(mut self, pattern: &str) -> Result<Self, Error> {
        self.boundary = compile_boundary(pattern)?;
        Ok(self)
    }

    /// Header pattern, anchored at the start of the block's first line. One
    /// capture group means "name only"; two mean name and version text.
    pub fn with_header(mut self, pattern: &str) -> Result<Self, Error> {
        self.header = compile_header(pattern)?;
        Ok(self)
    }

    pub fn with_version_separator(mut self, pattern: &str) -> Result<Self, Error> {
        self.version_separator = compile(pattern)?;
        Ok(self)
    }

    pub fn with_version_cleaner(mut self, cleaner: fn(&str) -> String) -> Self {
        self.version_cleaner = cleaner;
        self
    }

    pub fn with_description_separator(mut self, separator: impl Into<String>) -> Self {
        self.description_separator = separator.into();
        self
    }

    pub fn with_header_parser(mut self, parser: impl HeaderParser + 'static) -> Self {
        self.header_parser = Some(Box::new(parser));
        self
    }

    /// Names to skip, compared case-insensitively.
    pub fn excluding<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclude
            .extend(names.into_iter().map(|n| n.as_ref().to_lowercase()));
        self
    }

    /// Split a listing into raw blocks.
    pub fn split_blocks<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut blocks = Vec::new();
        let mut start = 0;
        for boundary in self.boundary.find_iter(text) {
            blocks.push(&text[start..boundary.start()]);
            // The match begins with the newline; the next block starts after it.
            start = boundary.start() + 1;
        }
        blocks.push(&text[start..]);
        blocks
    }

    /// Extract the software of one listing.
    pub fn extract(&self, text: &str, blacklist: &Blacklist) -> Vec<SoftwareInfo> {
        let mut entries = Vec::new();
        self.extract_into(text, blacklist, &mut entries);
        entries
    }

    /// Extract one listing, merging into `entries` (which may already hold
    /// software from other listings of the same resource).
    pub fn extract_into(&self, text: &str, blacklist: &Blacklist, entries: &mut Vec<SoftwareInfo>) {
        for block in self.split_blocks(text) {
            self.extract_block(block, blacklist, entries);
        }
    }

    fn extract_block(&self, block: &str, blacklist: &Blacklist, entries: &mut Vec<SoftwareInfo>) {
        let mut lines = block.trim().split('\n');
        let header_line = lines.next().unwrap_or_default().trim();
        if header_line.is_empty() {
            return;
        }

        let Some(caps) = self.header.captures(header_line) else {
            tracing::debug!(header = header_line, "block header does not match grammar");
            return;
        };
        let name = caps.get(1).map_or("", |m| m.as_str());
        let version_text = caps.get(2).map_or("", |m| m.as_str());

        let parsed = match &self.header_parser {
            Some(parser) => parser.parse(name, version_text, entries),
            None => {
                let name = name.split_once('/').map_or(name, |(first, _)| first);
                ParsedHeader::primary(name, version_text)
            }
        };

        for (package, version) in parsed.nested {
            self.merge(entries, blacklist, &package, [version], String::new());
        }

        let Some((name, version_text)) = parsed.primary else {
            return;
        };

        let versions: Vec<String> = self
            .version_separator
            .split(&version_text)
            .map(|v| (self.version_cleaner)(v.trim()))
            .collect();

        let description = self.description(lines);
        self.merge(entries, blacklist, &name, versions, description);
    }

    fn description<'a>(&self, lines: impl Iterator<Item = &'a str>) -> String {
        let description = lines
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if self.description_separator.is_empty() {
            return description;
        }
        match description.split_once(self.description_separator.as_str()) {
            Some((before, _)) => before.trim().to_string(),
            None => description,
        }
    }

    /// Add or union one software entry. The single place entries combine.
    fn merge<I>(
        &self,
        entries: &mut Vec<SoftwareInfo>,
        blacklist: &Blacklist,
        name: &str,
        versions: I,
        description: String,
    ) where
        I: IntoIterator<Item = String>,
    {
        let name = name.trim().to_lowercase();
        if name.is_empty() || self.exclude.contains(&name) || blacklist.contains(&name) {
            return;
        }

        match entries.iter_mut().find(|entry| entry.name == name) {
            Some(existing) => {
                existing.versions.extend(versions);
                if existing.description.is_empty() {
                    existing.description = description;
                }
            }
            None => entries.push(SoftwareInfo {
                name,
                versions: versions.into_iter().collect(),
                description,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block_parsers::{ContainerManifest, KnownPrefix};
    use pretty_assertions::assert_eq;

    fn extract(grammar: &BlockGrammar, text: &str) -> Vec<SoftwareInfo> {
        grammar.extract(text, &Blacklist::empty())
    }

    #[test]
    fn single_block_with_description() {
        let got = extract(&BlockGrammar::new(), "  foo: 1.0,2.0\n    some description");
        assert_eq!(got, vec![SoftwareInfo::new("foo", ["1.0", "2.0"], "some description")]);
    }

    #[test]
    fn splits_on_two_space_headers_only() {
        let text = "  gcc: gcc/11.4.0, gcc/12.2.0\n    The GNU Compiler Collection.\n  cmake: cmake/3.27.7\n";
        let got = extract(&BlockGrammar::new(), text);
        assert_eq!(
            got,
            vec![
                SoftwareInfo::new("gcc", ["11.4.0", "12.2.0"], "The GNU Compiler Collection."),
                SoftwareInfo::new("cmake", ["3.27.7"], ""),
            ]
        );
    }

    #[test]
    fn description_cut_at_separator() {
        let text = "  nco: nco/5.1.6\n    netCDF operators.\n    ----\n    Lmod: loaded by default";
        let got = extract(&BlockGrammar::new(), text);
        assert_eq!(got[0].description, "netCDF operators.");
    }

    #[test]
    fn slash_name_keeps_first_segment() {
        let got = extract(&BlockGrammar::new(), "  cuda/toolkit: cuda/12.1");
        assert_eq!(got[0].name, "cuda");
    }

    #[test]
    fn repeated_name_unions_versions() {
        let text = "  Python: python/3.10\n    First.\n  python: python/3.11, python/3.10";
        let got = extract(&BlockGrammar::new(), text);
        assert_eq!(got, vec![SoftwareInfo::new("python", ["3.10", "3.11"], "First.")]);
    }

    #[test]
    fn unmatched_header_dropped() {
        let text = "Available modules\n  gcc: gcc/12";
        let got = extract(&BlockGrammar::new(), text);
        assert_eq!(got.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(), vec!["gcc"]);
    }

    #[test]
    fn exclusions_are_case_insensitive() {
        let grammar = BlockGrammar::new().excluding(["Default"]);
        let got = extract(&grammar, "  default: x/1\n  gcc: gcc/12");
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].name, "gcc");
    }

    #[test]
    fn blacklist_applies() {
        let got = BlockGrammar::new().extract("  lmod: lmod/8\n  gcc: gcc/12", &Blacklist::from_iter(["lmod"]));
        assert_eq!(got.len(), 1);
    }

    #[test]
    fn single_group_header_has_unknown_version() {
        let grammar = BlockGrammar::new()
            .with_boundary(r"\s{4}[/\w.-]+(?:/[\w-])*")
            .unwrap()
            .with_header(r"([\w-]+(?:-[\w/-]+)?)")
            .unwrap();
        let got = extract(&grammar, "    gaussian\n    ansys-fluent");
        assert_eq!(
            got,
            vec![
                SoftwareInfo::new("gaussian", [""], ""),
                SoftwareInfo::new("ansys-fluent", [""], ""),
            ]
        );
    }

    #[test]
    fn known_prefix_sees_earlier_blocks() {
        let grammar = BlockGrammar::new().with_header_parser(KnownPrefix);
        let text = "  intel: intel/2023\n  intel-mkl: intel-mkl-2023.1";
        let got = extract(&grammar, text);
        assert_eq!(got, vec![SoftwareInfo::new("intel", ["2023", "mkl-2023.1"], "")]);
    }

    #[test]
    fn container_pairs_all_merge() {
        let grammar = BlockGrammar::new().with_header_parser(ContainerManifest);
        let text = "  pytorch: pytorch/1.12\n  AI: AI/pytorch_1.13.1,AI/tensorflow_2.10\n    Bundled AI stack.";
        let got = extract(&grammar, text);
        assert_eq!(
            got,
            vec![
                SoftwareInfo::new("pytorch", ["1.12", "1.13.1"], ""),
                SoftwareInfo::new("tensorflow", ["2.10"], ""),
            ]
        );
    }

    #[test]
    fn custom_version_separator() {
        let grammar = BlockGrammar::new().with_version_separator(";").unwrap();
        let got = extract(&grammar, "  foo: foo/1.0; foo/2.0\n    desc");
        assert_eq!(got, vec![SoftwareInfo::new("foo", ["1.0", "2.0"], "desc")]);
    }

    #[test]
    fn custom_version_cleaner() {
        fn strip_v(version: &str) -> String {
            version.trim_start_matches('v').to_string()
        }
        let grammar = BlockGrammar::new().with_version_cleaner(strip_v);
        let got = extract(&grammar, "  hdf5: v1.12, v1.14");
        assert_eq!(got, vec![SoftwareInfo::new("hdf5", ["1.12", "1.14"], "")]);
    }

    #[test]
    fn custom_description_separator() {
        let text = "  nco: nco/5.1.6\n    netCDF operators.\n    ###\n    site note";
        let grammar = BlockGrammar::new().with_description_separator("###");
        assert_eq!(extract(&grammar, text)[0].description, "netCDF operators.");

        // The default separator no longer cuts.
        let text = "  nco: nco/5.1.6\n    netCDF operators.\n    ----\n    site note";
        assert_eq!(
            extract(&grammar, text)[0].description,
            "netCDF operators. ---- site note"
        );
    }

    #[test]
    fn empty_description_separator_keeps_everything() {
        let grammar = BlockGrammar::new().with_description_separator("");
        let got = extract(&grammar, "  nco: nco/5\n    a\n    ----\n    b");
        assert_eq!(got[0].description, "a ---- b");
    }

    #[test]
    fn container_name_with_underscore() {
        let grammar = BlockGrammar::new().with_header_parser(ContainerManifest);
        let got = extract(&grammar, "  AI: AI/py_torch_1.0,AI/keras_2.9");
        assert_eq!(
            got,
            vec![
                SoftwareInfo::new("py_torch", ["1.0"], ""),
                SoftwareInfo::new("keras", ["2.9"], ""),
            ]
        );
    }

    #[test]
    fn bad_pattern_is_an_error() {
        assert!(matches!(
            BlockGrammar::new().with_header("(unclosed"),
            Err(Error::Pattern { .. })
        ));
    }
}
