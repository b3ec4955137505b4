//! Minimal inverted-index engine for TREC-style corpora.
//!
//! Records are split out of corpus files, their tagged fields extracted, tokenized with one
//! [`Analyzer`] strategy and merged into per-field postings. A finalized [`InvertedIndex`]
//! answers vocabulary and frequency statistics.

pub mod config;
pub mod corpus;
pub mod error;
pub mod extract;
pub mod index;
pub mod persist;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod tokenizer;

pub use config::IndexConfig;
pub use error::{ConfigError, ExtractError, IndexError};
pub use extract::{Document, Field};
pub use index::{DocId, DocMeta, FieldIndex, IndexWriter, InvertedIndex, Posting};
pub use report::Report;
pub use stats::FieldStats;
pub use tokenizer::{Analyzer, StandardOptions};
