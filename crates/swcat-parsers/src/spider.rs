//! Text-block normalizer over `module spider` listings.
//!
//! One listing per resource; the resource is named by the listing's file name
//! (text before the first `_`). Several listings for the same resource are
//! merged into one software list.

use crate::block_parsers::{ContainerManifest, DigitSuffix, KnownPrefix};
use crate::blocks::BlockGrammar;
use swcat_core::{Blacklist, Dispatcher, Error, ResourceBlockMap, SoftwareInfo};

const DARWIN_BOUNDARY: &str = r"\s{4}[/\w.-]+(?:/[\w-])*";
const DARWIN_HEADER: &str = r"([\w-]+(?:-[\w/-]+)?)";

/// The grammar table for the known resource providers, in priority order.
pub fn default_grammars() -> Result<Dispatcher<BlockGrammar>, Error> {
    let darwin = BlockGrammar::new()
        .with_boundary(DARWIN_BOUNDARY)?
        .with_header(DARWIN_HEADER)?
        .excluding(["available"]);

    Ok(Dispatcher::new(BlockGrammar::new())
        .register(
            "delta",
            BlockGrammar::new()
                .with_header_parser(KnownPrefix)
                .excluding(["default"]),
        )
        .register("darwin", darwin)
        .register("kyric", BlockGrammar::new().with_header_parser(DigitSuffix))
        .register(
            "bridges",
            BlockGrammar::new().with_header_parser(ContainerManifest),
        )
        .register("ookami", BlockGrammar::new().excluding(["null"]))
        .register(
            "expanse",
            BlockGrammar::new().excluding(["defaultmodules", "default-environment"]),
        ))
}

/// Resource identifier of a listing file: the text before the first `_`.
pub fn resource_from_file_name(file_name: &str) -> &str {
    file_name
        .split_once('_')
        .map_or(file_name, |(resource, _)| resource)
}

/// Per-source extraction over module listings.
pub struct BlockNormalizer {
    grammars: Dispatcher<BlockGrammar>,
    blacklist: Blacklist,
}

impl BlockNormalizer {
    pub fn new(grammars: Dispatcher<BlockGrammar>, blacklist: Blacklist) -> Self {
        Self {
            grammars,
            blacklist,
        }
    }

    pub fn with_default_sources(blacklist: Blacklist) -> Result<Self, Error> {
        Ok(Self::new(default_grammars()?, blacklist))
    }

    /// Extract one resource's listing.
    pub fn normalize_listing(&self, resource: &str, text: &str) -> Vec<SoftwareInfo> {
        self.grammars.select(resource).extract(text, &self.blacklist)
    }

    /// Extract a set of `(file_name, content)` listings.
    pub fn normalize<'a, I>(&self, listings: I) -> ResourceBlockMap
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut out = ResourceBlockMap::new();
        for (file_name, text) in listings {
            let resource = resource_from_file_name(file_name);
            let grammar = self.grammars.select(resource);
            let entries = out.entry(resource.to_string()).or_default();
            let before = entries.len();
            grammar.extract_into(text, &self.blacklist, entries);
            tracing::info!(
                resource,
                file = file_name,
                added = entries.len() - before,
                total = entries.len(),
                "parsed module listing"
            );
        }
        out
    }
}
