//! Read-only statistics over a finalized [`InvertedIndex`].
//!
//! Unknown fields and terms are not errors: every count for them is zero.

use serde::Serialize;

use crate::extract::Field;
use crate::index::InvertedIndex;

/// Aggregates for one field, as printed in the report table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FieldStats {
    pub vocabulary_size: u64,
    pub doc_count: u32,
    pub sum_total_term_freq: u64,
    pub sum_doc_freq: u64,
}

impl InvertedIndex {
    /// Documents added, including ones whose text fields produced no terms.
    pub fn doc_count(&self) -> u32 { self.docs.len() as u32 }

    pub fn doc_freq(&self, field: Field, term: &str) -> u32 { self.postings(field, term).len() as u32 }

    pub fn total_term_freq(&self, field: Field, term: &str) -> u64 {
        self.postings(field, term).iter().map(|p| p.term_freq as u64).sum()
    }

    pub fn vocabulary_size(&self, field: Field) -> u64 {
        self.field_index(field).map_or(0, |f| f.postings.len() as u64)
    }

    /// Distinct terms of `field` in byte order.
    pub fn vocabulary(&self, field: Field) -> impl Iterator<Item = &str> {
        self.field_index(field).into_iter().flat_map(|f| f.postings.keys().map(String::as_str))
    }

    pub fn field_doc_count(&self, field: Field) -> u32 { self.field_index(field).map_or(0, |f| f.doc_count) }

    pub fn sum_total_term_freq(&self, field: Field) -> u64 {
        self.field_index(field).map_or(0, |f| f.sum_total_term_freq)
    }

    pub fn sum_doc_freq(&self, field: Field) -> u64 { self.field_index(field).map_or(0, |f| f.sum_doc_freq) }

    pub fn field_stats(&self, field: Field) -> FieldStats {
        FieldStats {
            vocabulary_size: self.vocabulary_size(field),
            doc_count: self.field_doc_count(field),
            sum_total_term_freq: self.sum_total_term_freq(field),
            sum_doc_freq: self.sum_doc_freq(field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Document;
    use crate::index::IndexWriter;
    use crate::tokenizer::Analyzer;

    fn build(texts: &[&str]) -> InvertedIndex {
        let mut w = IndexWriter::new(Analyzer::standard());
        for (i, text) in texts.iter().enumerate() {
            w.add_document(Document::new(format!("D{i}"), [(Field::Text, text.to_string())])).unwrap();
        }
        w.finalize()
    }

    #[test]
    fn single_document_scenario() {
        let index = build(&["new new car"]);
        assert_eq!(index.doc_count(), 1);
        assert_eq!(index.vocabulary(Field::Text).collect::<Vec<_>>(), vec!["car", "new"]);
        assert_eq!(index.doc_freq(Field::Text, "new"), 1);
        assert_eq!(index.total_term_freq(Field::Text, "new"), 2);
        assert_eq!(
            index.field_stats(Field::Text),
            FieldStats { vocabulary_size: 2, doc_count: 1, sum_total_term_freq: 3, sum_doc_freq: 2 }
        );
    }

    #[test]
    fn frequencies_accumulate_across_documents() {
        let index = build(&["new car", "new new new", "old"]);
        assert_eq!(index.doc_freq(Field::Text, "new"), 2);
        assert_eq!(index.total_term_freq(Field::Text, "new"), 4);
    }

    #[test]
    fn empty_documents_count_but_have_no_terms() {
        let index = build(&["", "the"]);
        assert_eq!(index.doc_count(), 2);
        assert_eq!(index.field_doc_count(Field::Text), 0);
        assert_eq!(index.field_doc_count(Field::Docno), 2);
    }

    #[test]
    fn unknown_terms_and_fields_are_zero() {
        let index = InvertedIndex::empty(Analyzer::standard());
        assert_eq!(index.doc_count(), 0);
        assert_eq!(index.doc_freq(Field::Text, "new"), 0);
        assert_eq!(index.total_term_freq(Field::Head, "new"), 0);
        assert_eq!(index.field_stats(Field::Text), FieldStats::default());
        assert_eq!(index.vocabulary(Field::Text).count(), 0);
    }

    #[test]
    fn postings_invariants_hold() {
        let index = build(&["a rose is a rose", "rose garden", "garden gate gate"]);
        let f = index.field_index(Field::Text).unwrap();
        let ttf: u64 = index.vocabulary(Field::Text).map(|t| index.total_term_freq(Field::Text, t)).sum();
        let df: u64 = index.vocabulary(Field::Text).map(|t| index.doc_freq(Field::Text, t) as u64).sum();
        assert_eq!(ttf, f.sum_total_term_freq);
        assert_eq!(df, f.sum_doc_freq);
    }
}
