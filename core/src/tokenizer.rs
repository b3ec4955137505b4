use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::ConfigError;

/// Tokens longer than this many chars are dropped (not split) by the standard analyzer.
pub const MAX_TOKEN_LEN: usize = 255;

lazy_static! {
    static ref LETTERS: Regex = Regex::new(r"\p{L}+").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a", "an", "and", "are", "as", "at", "be", "but", "by",
            "for", "if", "in", "into", "is", "it",
            "no", "not", "of", "on", "or", "such",
            "that", "the", "their", "then", "there", "these", "they", "this", "to",
            "was", "will", "with",
        ];
        words.iter().copied().collect()
    };
}

pub fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// Knobs for [`Analyzer::Standard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct StandardOptions {
    pub stopwords: bool,
    pub stem: bool,
}

impl Default for StandardOptions {
    fn default() -> Self { Self { stopwords: true, stem: false } }
}

/// Analysis strategy applied to field text before indexing.
///
/// Deserializes from a plain name (anything [`FromStr`] accepts) or from
/// `{"standard": {...}}` when the standard options need tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "AnalyzerRepr")]
pub enum Analyzer {
    /// Whole field text is a single term.
    Verbatim,
    /// Runs of letters, lowercased.
    WhitespaceSimple,
    /// `WhitespaceSimple` minus the English stop set.
    StopwordFiltered,
    /// Unicode word segmentation with normalization.
    Standard(StandardOptions),
}

impl Analyzer {
    /// Every strategy, in the order the comparison run reports them.
    pub const ALL: [Analyzer; 4] = [
        Analyzer::Verbatim,
        Analyzer::WhitespaceSimple,
        Analyzer::StopwordFiltered,
        Analyzer::Standard(StandardOptions { stopwords: true, stem: false }),
    ];

    pub fn standard() -> Self { Analyzer::Standard(StandardOptions::default()) }

    pub fn name(&self) -> &'static str {
        match self {
            Analyzer::Verbatim => "verbatim",
            Analyzer::WhitespaceSimple => "whitespace-simple",
            Analyzer::StopwordFiltered => "stopword-filtered",
            Analyzer::Standard(_) => "standard",
        }
    }

    /// Convert field text into normalized terms, in input order.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        match self {
            Analyzer::Verbatim => verbatim(text),
            Analyzer::WhitespaceSimple => letters(text, false),
            Analyzer::StopwordFiltered => letters(text, true),
            Analyzer::Standard(opts) => standard(text, opts),
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self { Analyzer::standard() }
}

impl fmt::Display for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

impl FromStr for Analyzer {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "verbatim" | "keyword" => Ok(Analyzer::Verbatim),
            "whitespace-simple" | "simple" => Ok(Analyzer::WhitespaceSimple),
            "stopword-filtered" | "stop" => Ok(Analyzer::StopwordFiltered),
            "standard" => Ok(Analyzer::standard()),
            other => Err(ConfigError::UnknownAnalyzer(other.to_string())),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AnalyzerRepr {
    Name(String),
    Standard { standard: StandardOptions },
}

impl TryFrom<AnalyzerRepr> for Analyzer {
    type Error = ConfigError;

    fn try_from(repr: AnalyzerRepr) -> Result<Self, Self::Error> {
        match repr {
            AnalyzerRepr::Name(name) => name.parse(),
            AnalyzerRepr::Standard { standard } => Ok(Analyzer::Standard(standard)),
        }
    }
}

fn verbatim(text: &str) -> Vec<String> {
    if text.is_empty() { Vec::new() } else { vec![text.to_string()] }
}

fn letters(text: &str, drop_stopwords: bool) -> Vec<String> {
    LETTERS
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .filter(|t| !(drop_stopwords && is_stopword(t)))
        .collect()
}

fn standard(text: &str, opts: &StandardOptions) -> Vec<String> {
    let normalized = text.nfkc().collect::<String>().to_lowercase();
    let mut tokens = Vec::new();
    for word in normalized.unicode_words() {
        if word.chars().count() > MAX_TOKEN_LEN { continue; }
        let word = strip_possessive(word);
        if word.is_empty() { continue; }
        if opts.stopwords && is_stopword(word) { continue; }
        let term = if opts.stem { STEMMER.stem(word).into_owned() } else { word.to_string() };
        tokens.push(term);
    }
    tokens
}

fn strip_possessive(word: &str) -> &str {
    word.strip_suffix("'s")
        .or_else(|| word.strip_suffix("\u{2019}s"))
        .unwrap_or(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbatim_keeps_whole_text() {
        assert_eq!(Analyzer::Verbatim.tokenize("New York Times"), vec!["New York Times"]);
        assert!(Analyzer::Verbatim.tokenize("").is_empty());
    }

    #[test]
    fn simple_splits_on_non_letters() {
        let t = Analyzer::WhitespaceSimple.tokenize("The U.S. car-maker's 3rd plant");
        assert_eq!(t, vec!["the", "u", "s", "car", "maker", "s", "rd", "plant"]);
    }

    #[test]
    fn stop_drops_stopwords() {
        let t = Analyzer::StopwordFiltered.tokenize("The car is in the garage");
        assert_eq!(t, vec!["car", "garage"]);
    }

    #[test]
    fn standard_strips_possessives_and_keeps_numbers() {
        let t = Analyzer::standard().tokenize("The company's 1994 report, revised.");
        assert_eq!(t, vec!["company", "1994", "report", "revised"]);
    }

    #[test]
    fn standard_stemming_is_opt_in() {
        let a = Analyzer::Standard(StandardOptions { stopwords: true, stem: true });
        assert_eq!(a.tokenize("running cars"), vec!["run", "car"]);
    }

    #[test]
    fn overlong_tokens_are_measured_in_chars() {
        let fits = "é".repeat(MAX_TOKEN_LEN);
        let too_long = "é".repeat(MAX_TOKEN_LEN + 1);
        let t = Analyzer::standard().tokenize(&format!("{fits} {too_long} ok"));
        assert_eq!(t, vec![fits, "ok".to_string()]);
    }

    #[test]
    fn serde_accepts_names_and_standard_map() {
        let a: Analyzer = serde_json::from_str(r#""standard""#).unwrap();
        assert_eq!(a, Analyzer::standard());
        let a: Analyzer = serde_json::from_str(r#"{"standard": {}}"#).unwrap();
        assert_eq!(a, Analyzer::standard());
        let a: Analyzer = serde_json::from_str(r#"{"standard": {"stem": true}}"#).unwrap();
        assert_eq!(a, Analyzer::Standard(StandardOptions { stopwords: true, stem: true }));
        assert!(serde_json::from_str::<Analyzer>(r#""porter""#).is_err());
        for analyzer in Analyzer::ALL {
            let json = serde_json::to_string(&analyzer).unwrap();
            assert_eq!(serde_json::from_str::<Analyzer>(&json).unwrap(), analyzer);
        }
    }

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("keyword".parse::<Analyzer>().unwrap(), Analyzer::Verbatim);
        assert_eq!("Stop".parse::<Analyzer>().unwrap(), Analyzer::StopwordFiltered);
        assert!("porter".parse::<Analyzer>().is_err());
    }
}
