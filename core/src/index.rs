use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::error::IndexError;
use crate::extract::{Document, Field};
use crate::tokenizer::Analyzer;

pub type DocId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocMeta {
    pub docno: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    pub term_freq: u32,
}

/// Postings and aggregates for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIndex {
    pub postings: BTreeMap<String, Vec<Posting>>, // postings sorted by doc_id
    /// Documents with at least one term in this field.
    pub doc_count: u32,
    /// Total tokens across all documents.
    pub sum_total_term_freq: u64,
    /// Total postings across all terms.
    pub sum_doc_freq: u64,
}

impl FieldIndex {
    fn add(&mut self, doc_id: DocId, tokens: Vec<String>) {
        if tokens.is_empty() { return; }
        let num_tokens = tokens.len() as u64;
        let mut tf_counts: HashMap<String, u32> = HashMap::new();
        for term in tokens {
            *tf_counts.entry(term).or_insert(0) += 1;
        }
        self.doc_count += 1;
        self.sum_total_term_freq += num_tokens;
        self.sum_doc_freq += tf_counts.len() as u64;
        // doc ids only grow, so appending keeps every list sorted
        for (term, term_freq) in tf_counts {
            self.postings.entry(term).or_default().push(Posting { doc_id, term_freq });
        }
    }
}

/// Accumulates documents for one analyzer. Nothing is queryable until [`IndexWriter::finalize`].
pub struct IndexWriter {
    analyzer: Analyzer,
    fields: BTreeMap<Field, FieldIndex>,
    docs: Vec<DocMeta>,
    doc_id_map: HashMap<String, DocId>,
}

impl IndexWriter {
    pub fn new(analyzer: Analyzer) -> Self {
        Self { analyzer, fields: BTreeMap::new(), docs: Vec::new(), doc_id_map: HashMap::new() }
    }

    pub fn analyzer(&self) -> Analyzer { self.analyzer }

    pub fn num_docs(&self) -> u32 { self.docs.len() as u32 }

    /// Tokenize every field of `doc` and merge its postings. DOCNO is indexed as one verbatim term.
    pub fn add_document(&mut self, doc: Document) -> Result<DocId, IndexError> {
        if self.doc_id_map.contains_key(doc.docno()) {
            return Err(IndexError::DuplicateDocument { docno: doc.docno().to_string() });
        }
        let doc_id = self.docs.len() as DocId;
        for (field, text) in doc.fields() {
            let tokens = if field.is_identifier() {
                Analyzer::Verbatim.tokenize(text)
            } else {
                self.analyzer.tokenize(text)
            };
            self.fields.entry(field).or_default().add(doc_id, tokens);
        }
        self.doc_id_map.insert(doc.docno().to_string(), doc_id);
        self.docs.push(DocMeta { docno: doc.docno().to_string() });
        Ok(doc_id)
    }

    pub fn finalize(self) -> InvertedIndex {
        let index = InvertedIndex { analyzer: self.analyzer, fields: self.fields, docs: self.docs };
        tracing::debug!(analyzer = %index.analyzer, num_docs = index.docs.len(), "index finalized");
        index
    }
}

/// Immutable, finalized index. Query it through the statistics methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvertedIndex {
    pub(crate) analyzer: Analyzer,
    pub(crate) fields: BTreeMap<Field, FieldIndex>,
    pub(crate) docs: Vec<DocMeta>,
}

impl InvertedIndex {
    pub fn empty(analyzer: Analyzer) -> Self { IndexWriter::new(analyzer).finalize() }

    pub(crate) fn from_parts(analyzer: Analyzer, fields: BTreeMap<Field, FieldIndex>, docs: Vec<DocMeta>) -> Self {
        Self { analyzer, fields, docs }
    }

    pub fn analyzer(&self) -> Analyzer { self.analyzer }

    pub fn field_index(&self, field: Field) -> Option<&FieldIndex> { self.fields.get(&field) }

    pub fn postings(&self, field: Field, term: &str) -> &[Posting] {
        self.field_index(field)
            .and_then(|f| f.postings.get(term))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn doc_meta(&self, doc_id: DocId) -> Option<&DocMeta> { self.docs.get(doc_id as usize) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(docno: &str, text: &str) -> Document {
        Document::new(docno, [(Field::Text, text.to_string())])
    }

    #[test]
    fn postings_are_sorted_by_doc_id() {
        let mut w = IndexWriter::new(Analyzer::WhitespaceSimple);
        for (i, text) in ["car", "bus", "car car", "car"].iter().enumerate() {
            w.add_document(doc(&i.to_string(), text)).unwrap();
        }
        let index = w.finalize();
        let ids: Vec<DocId> = index.postings(Field::Text, "car").iter().map(|p| p.doc_id).collect();
        assert_eq!(ids, vec![0, 2, 3]);
        assert_eq!(index.postings(Field::Text, "car")[1].term_freq, 2);
    }

    #[test]
    fn duplicate_docno_keeps_first() {
        let mut w = IndexWriter::new(Analyzer::standard());
        w.add_document(doc("A", "first")).unwrap();
        let err = w.add_document(doc("A", "second")).unwrap_err();
        assert_eq!(err, IndexError::DuplicateDocument { docno: "A".into() });
        let index = w.finalize();
        assert_eq!(index.docs.len(), 1);
        assert!(index.postings(Field::Text, "second").is_empty());
        assert_eq!(index.postings(Field::Text, "first").len(), 1);
    }

    #[test]
    fn docno_is_not_tokenized() {
        let mut w = IndexWriter::new(Analyzer::standard());
        w.add_document(doc("FT911-3 B", "")).unwrap();
        let index = w.finalize();
        assert_eq!(index.postings(Field::Docno, "FT911-3 B").len(), 1);
        assert!(index.field_index(Field::Text).map_or(true, |f| f.doc_count == 0));
    }
}
