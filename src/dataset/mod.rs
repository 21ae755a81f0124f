//! Dataset assembly.
//!
//! Pairs recordings with their annotations, cuts one clip per utterance
//! with usable text, and writes the metadata table and README.

mod builder;
mod discovery;
mod metadata;

pub use builder::{BuildConfig, BuildReport, Dataset, build};
pub use discovery::{Corpus, CorpusEntry, discover_corpus, list_files};
pub use metadata::{UtteranceRecord, utterance_id, write_metadata, write_readme};
