use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::tokenizer::Analyzer;

pub const DEFAULT_SUFFIX: &str = "trectext";

/// Everything one index build needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    /// Output directory for the persisted index.
    pub index_location: PathBuf,
    /// Directory scanned (non-recursively) for corpus files.
    pub corpus_location: PathBuf,
    /// Only files whose name ends with this are read.
    pub file_suffix: String,
    #[serde(alias = "analyzer_strategy")]
    pub analyzer: Analyzer,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            index_location: PathBuf::from("./Index"),
            corpus_location: PathBuf::from("./corpus"),
            file_suffix: DEFAULT_SUFFIX.to_string(),
            analyzer: Analyzer::default(),
        }
    }
}

impl IndexConfig {
    /// Read a JSON config file. Absent keys fall back to the defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).with_context(|| format!("reading config {path:?}"))?;
        let config: IndexConfig =
            serde_json::from_str(&raw).with_context(|| format!("parsing config {path:?}"))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.file_suffix.is_empty() {
            return Err(ConfigError::EmptySuffix);
        }
        if !self.corpus_location.is_dir() {
            return Err(ConfigError::CorpusNotADirectory(self.corpus_location.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::StandardOptions;

    #[test]
    fn partial_json_uses_defaults() {
        let config: IndexConfig =
            serde_json::from_str(r#"{"corpus_location": "/data/ft", "analyzer": "stopword-filtered"}"#).unwrap();
        assert_eq!(config.corpus_location, PathBuf::from("/data/ft"));
        assert_eq!(config.file_suffix, DEFAULT_SUFFIX);
        assert_eq!(config.analyzer, Analyzer::StopwordFiltered);
    }

    #[test]
    fn standard_options_deserialize() {
        let config: IndexConfig =
            serde_json::from_str(r#"{"analyzer": {"standard": {"stopwords": false, "stem": true}}}"#).unwrap();
        assert_eq!(config.analyzer, Analyzer::Standard(StandardOptions { stopwords: false, stem: true }));
    }

    #[test]
    fn every_analyzer_name_deserializes() {
        for (name, expected) in [
            ("verbatim", Analyzer::Verbatim),
            ("whitespace-simple", Analyzer::WhitespaceSimple),
            ("stopword-filtered", Analyzer::StopwordFiltered),
            ("standard", Analyzer::standard()),
        ] {
            let config: IndexConfig = serde_json::from_str(&format!(r#"{{"analyzer": "{name}"}}"#)).unwrap();
            assert_eq!(config.analyzer, expected, "{name}");
        }
    }

    #[test]
    fn analyzer_strategy_key_is_accepted() {
        let config: IndexConfig = serde_json::from_str(r#"{"analyzer_strategy": "verbatim"}"#).unwrap();
        assert_eq!(config.analyzer, Analyzer::Verbatim);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(serde_json::from_str::<IndexConfig>(r#"{"analyser": "verbatim"}"#).is_err());
        assert!(serde_json::from_str::<IndexConfig>(r#"{"analyzer": "porter"}"#).is_err());
    }

    #[test]
    fn config_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = IndexConfig { analyzer: Analyzer::WhitespaceSimple, ..IndexConfig::default() };
        fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();
        assert_eq!(IndexConfig::from_json_file(&path).unwrap(), config);
    }

    #[test]
    fn empty_suffix_is_rejected() {
        let config = IndexConfig { file_suffix: String::new(), ..IndexConfig::default() };
        assert_eq!(config.validate(), Err(ConfigError::EmptySuffix));
    }

    #[test]
    fn missing_corpus_dir_is_rejected() {
        let config = IndexConfig { corpus_location: PathBuf::from("/definitely/not/here"), ..IndexConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::CorpusNotADirectory(_))));
    }
}
