use std::path::PathBuf;
use thiserror::Error;

use crate::extract::Field;

/// Per-record parse failures. The offending record is skipped.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("<{field}> opened at byte {offset} is never closed")]
    UnclosedTag { field: Field, offset: usize },

    #[error("record has no DOCNO")]
    MissingIdentifier,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndexError {
    #[error("duplicate DOCNO {docno:?}, keeping the first one")]
    DuplicateDocument { docno: String },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown analyzer {0:?} (expected verbatim, whitespace-simple, stopword-filtered or standard)")]
    UnknownAnalyzer(String),

    #[error("file_suffix must not be empty")]
    EmptySuffix,

    #[error("corpus_location is not a directory: {0:?}")]
    CorpusNotADirectory(PathBuf),

    #[error("unknown field {0:?}")]
    UnknownField(String),
}
