//! swcat-parsers: the two ingestion paths.
//!
//! - [`records`]: `{AppName, AppVersion}` sightings from the operations API,
//!   normalised by the per-site routines in [`sources`].
//! - [`spider`]: free-text `module spider` listings, extracted by the
//!   per-site [`blocks::BlockGrammar`]s with the header parsers in
//!   [`block_parsers`].

pub mod block_parsers;
pub mod blocks;
pub mod records;
pub mod sources;
pub mod spider;

pub use blocks::BlockGrammar;
pub use records::{decode_operations, RecordBatch, RecordNormalizer};
pub use sources::{default_dispatcher, RecordParser};
pub use spider::{default_grammars, resource_from_file_name, BlockNormalizer};
