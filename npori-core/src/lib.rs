//! # Streaming Nirvana to PORI conversion.
//!
//! This crate converts large, deeply nested Nirvana annotation exports
//! (one object per genomic position, with nested variants, transcripts and
//! samples) into the flat record lists a PORI report ingests. Conversion
//! is incremental: a streaming parse pushes (path, event, value) tokens
//! through per-flavor path registries into a bounded per-record context
//! tree, each finished record is massaged and spilled to a scratch file,
//! and a second pass consolidates the accepted records down to one
//! representative per gene.

pub mod adapter;
pub mod cnv;
pub mod consolidate;
pub mod consts;
pub mod context;
pub mod errors;
pub mod models;
pub mod ranker;
pub mod router;
pub mod scratch;
pub mod stream;
pub mod token;
pub mod utils;
pub mod vcf;

// re-expose the conversion surface
pub use adapter::{Adapter, Converter, Hook, convert};
pub use cnv::CnvAdapter;
pub use consolidate::consolidate_by_gene;
pub use errors::ConvertError;
pub use models::{CopyVariant, SmallMutation, Transcript};
pub use vcf::VcfAdapter;
