use serde::Serialize;
use std::fmt;

use crate::extract::Field;
use crate::index::InvertedIndex;
use crate::stats::FieldStats;
use crate::tokenizer::Analyzer;

pub const DEFAULT_PROBE_TERM: &str = "new";

/// The textual/JSON summary printed after a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub analyzer: Analyzer,
    pub field: Field,
    pub term: String,
    pub doc_count: u32,
    pub term_doc_freq: u32,
    pub term_total_freq: u64,
    #[serde(flatten)]
    pub field_stats: FieldStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary: Option<Vec<String>>,
    /// Prefix every line with the analyzer name (comparison runs).
    #[serde(skip)]
    pub labelled: bool,
}

impl Report {
    pub fn collect(index: &InvertedIndex, field: Field, term: &str) -> Self {
        Self {
            analyzer: index.analyzer(),
            field,
            term: term.to_string(),
            doc_count: index.doc_count(),
            term_doc_freq: index.doc_freq(field, term),
            term_total_freq: index.total_term_freq(field, term),
            field_stats: index.field_stats(field),
            vocabulary: None,
            labelled: false,
        }
    }

    pub fn with_vocabulary(mut self, index: &InvertedIndex) -> Self {
        self.vocabulary = Some(index.vocabulary(self.field).map(str::to_string).collect());
        self
    }

    pub fn labelled(mut self) -> Self {
        self.labelled = true;
        self
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = if self.labelled { format!("{}- ", self.analyzer) } else { String::new() };
        if let Some(vocab) = &self.vocabulary {
            writeln!(f, "{p}*******Vocabulary-Start**********")?;
            writeln!(f, "{p}{}", vocab.join("\t"))?;
            writeln!(f, "{p}*******Vocabulary-End**********")?;
        }
        let (field, term, s) = (self.field, &self.term, &self.field_stats);
        writeln!(f, "{p}Total number of documents in the corpus: {}", self.doc_count)?;
        writeln!(f, "{p}Number of documents containing the term {term:?} for field {:?}: {}", field.tag(), self.term_doc_freq)?;
        writeln!(f, "{p}Number of occurrences of {term:?} in the field {:?}: {}", field.tag(), self.term_total_freq)?;
        writeln!(f, "{p}Size of the vocabulary for this field: {}", s.vocabulary_size)?;
        writeln!(f, "{p}Number of documents that have at least one term for this field: {}", s.doc_count)?;
        writeln!(f, "{p}Number of tokens for this field: {}", s.sum_total_term_freq)?;
        write!(f, "{p}Number of postings for this field: {}", s.sum_doc_freq)
    }
}
