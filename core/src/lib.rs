//! In-memory verse search over a pipe-delimited corpus.
//!
//! A [`VerseIndex`] is built once from the corpus and then queried many
//! times. Every verse word is lower-cased and reduced to a stem, counted per
//! verse, and normalized by the largest per-verse count in the corpus.
//! Queries multiply the normalized scores of each query stem per verse.

pub mod error;
pub mod index;
pub mod query;
pub mod tokenizer;

pub use error::{LoadError, RecordError};
pub use index::{BuildStats, Location, Posting, Verse, VerseIndex};
pub use query::{RankOrder, ScoredLocation, SearchOptions};
