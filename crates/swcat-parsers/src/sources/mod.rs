//! Per-source record routines.
//!
//! Every resource provider reports module names in its own convention. A
//! [`RecordParser`] turns one raw sighting into a canonical
//! [`ParseOutcome`]; [`default_dispatcher`] maps resource identifiers to the
//! routine for their site.
//!
//! All routines run [`clean_name_version`] first (see
//! [`RecordParser::parse`]) and then apply their own rewriting in
//! [`RecordParser::rewrite`].

mod cray;
mod ookami;
mod sites;

pub use cray::Delta;
pub use ookami::Ookami;
pub use sites::{Anvil, Bridges, Jetstream, Kyric, Stampede, Tamu};

use swcat_core::clean::clean_name_version;
use swcat_core::{Dispatcher, ParseOutcome, RawInstallationRecord};

/// A site-specific name/version routine.
pub trait RecordParser: Send + Sync {
    /// Short label for log lines.
    fn source(&self) -> &'static str;

    /// Site-specific rewriting of an already-cleaned pair.
    fn rewrite(&self, name: String, version: String) -> ParseOutcome;

    /// Clean the raw pair, then [`rewrite`](Self::rewrite) it.
    fn parse(&self, record: &RawInstallationRecord) -> ParseOutcome {
        let Some(raw_name) = record.app_name.as_deref() else {
            return ParseOutcome::failed("record has no AppName");
        };
        let (name, version) = clean_name_version(raw_name, record.version());
        self.rewrite(name, version)
    }
}

/// Cleaning only. Used for sites without their own conventions and as the
/// dispatcher fallback.
#[derive(Debug, Clone, Copy)]
pub struct Generic(pub &'static str);

impl RecordParser for Generic {
    fn source(&self) -> &'static str {
        self.0
    }

    fn rewrite(&self, name: String, version: String) -> ParseOutcome {
        ParseOutcome::from_pair(name, version)
    }
}

/// Boxed routine as stored in the dispatcher.
pub type BoxedParser = Box<dyn RecordParser>;

/// The routine table for the known resource providers, in priority order.
pub fn default_dispatcher() -> Dispatcher<BoxedParser> {
    Dispatcher::new(Box::new(Generic("generic")) as BoxedParser)
        .register("kyric", Box::new(Kyric))
        .register("delta", Box::new(Delta))
        .register("bridges", Box::new(Bridges))
        .register("stampede", Box::new(Stampede))
        .register("anvil", Box::new(Anvil))
        .register("darwin", Box::new(Generic("darwin")))
        .register("tamu", Box::new(Tamu))
        .register("jetstream", Box::new(Jetstream))
        .register("ookami", Box::new(Ookami))
        .register("expanse", Box::new(Generic("expanse")))
}

/// Join non-empty path-like version parts with `/`.
pub(crate) fn slash_join(parts: &[&str]) -> String {
    parts
        .iter()
        .copied()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}
