//! corpus files → records → documents → index writer → finalized index.

use anyhow::Result;
use rayon::prelude::*;
use serde::Serialize;
use std::path::Path;

use crate::config::IndexConfig;
use crate::corpus::{discover_files, read_corpus_file};
use crate::extract::{split_records, Document};
use crate::index::{IndexWriter, InvertedIndex};
use crate::persist::{save_index, IndexPaths};
use crate::tokenizer::Analyzer;

/// What happened to the records of one build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub files: usize,
    pub records: usize,
    pub added: usize,
    pub skipped_malformed: usize,
    pub skipped_duplicates: usize,
}

impl IngestReport {
    pub fn is_clean(&self) -> bool { self.skipped_malformed == 0 && self.skipped_duplicates == 0 }
}

pub struct BuildOutcome {
    pub index: InvertedIndex,
    pub ingest: IngestReport,
}

/// Feed every record of `content` into `writer`. Bad records are logged and skipped.
pub fn ingest_content(writer: &mut IndexWriter, content: &str, source: &str, report: &mut IngestReport) {
    for record in split_records(content) {
        report.records += 1;
        let doc = match Document::from_record(record) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(file = source, record = report.records, error = %e, "skipping malformed record");
                report.skipped_malformed += 1;
                continue;
            }
        };
        match writer.add_document(doc) {
            Ok(_) => report.added += 1,
            Err(e) => {
                tracing::warn!(file = source, error = %e, "skipping duplicate document");
                report.skipped_duplicates += 1;
            }
        }
    }
}

/// Index every matching file under `corpus_dir` in memory. I/O errors abort the build.
pub fn build_index(corpus_dir: &Path, suffix: &str, analyzer: Analyzer) -> Result<BuildOutcome> {
    let files = discover_files(corpus_dir, suffix)?;
    if files.is_empty() {
        tracing::warn!(corpus = %corpus_dir.display(), suffix, "no corpus files matched, index will be empty");
    }

    let mut writer = IndexWriter::new(analyzer);
    let mut ingest = IngestReport::default();
    for file in &files {
        tracing::info!(%analyzer, file = %file.display(), "indexing file");
        let content = read_corpus_file(file)?;
        ingest_content(&mut writer, &content, &file.to_string_lossy(), &mut ingest);
        ingest.files += 1;
    }

    let index = writer.finalize();
    tracing::info!(
        %analyzer,
        files = ingest.files,
        num_docs = index.doc_count(),
        skipped_malformed = ingest.skipped_malformed,
        skipped_duplicates = ingest.skipped_duplicates,
        "indexing completed successfully"
    );
    Ok(BuildOutcome { index, ingest })
}

/// Validate `config`, build the index and persist it to `config.index_location`.
pub fn build_and_save(config: &IndexConfig) -> Result<BuildOutcome> {
    config.validate()?;
    let outcome = build_index(&config.corpus_location, &config.file_suffix, config.analyzer)?;
    save_index(&IndexPaths::new(&config.index_location), &outcome.index)?;
    tracing::info!(output = %config.index_location.display(), "index saved");
    Ok(outcome)
}

/// Build and save one index per strategy in [`Analyzer::ALL`], each under
/// `index_root/<analyzer name>`. Builds run in parallel; outcomes come back in `ALL` order.
pub fn compare_analyzers(corpus_dir: &Path, index_root: &Path, suffix: &str) -> Result<Vec<BuildOutcome>> {
    Analyzer::ALL
        .par_iter()
        .map(|analyzer| {
            let config = IndexConfig {
                index_location: index_root.join(analyzer.name()),
                corpus_location: corpus_dir.to_path_buf(),
                file_suffix: suffix.to_string(),
                analyzer: *analyzer,
            };
            build_and_save(&config)
        })
        .collect()
}
