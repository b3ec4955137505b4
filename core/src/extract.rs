//! Tag-delimited field extraction for TREC-style records.
//!
//! A corpus file is a concatenation of records terminated by `</DOC>`. Inside a
//! record each recognized field may appear any number of times as
//! `<NAME>...</NAME>`; all occurrences are concatenated in encounter order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{ConfigError, ExtractError};

pub const RECORD_END: &str = "</DOC>";

/// Recognized record fields, in extraction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    Docno,
    FileId,
    First,
    Second,
    Text,
    Head,
    Byline,
    Dateline,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Docno,
        Field::FileId,
        Field::First,
        Field::Second,
        Field::Text,
        Field::Head,
        Field::Byline,
        Field::Dateline,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            Field::Docno => "DOCNO",
            Field::FileId => "FILEID",
            Field::First => "FIRST",
            Field::Second => "SECOND",
            Field::Text => "TEXT",
            Field::Head => "HEAD",
            Field::Byline => "BYLINE",
            Field::Dateline => "DATELINE",
        }
    }

    /// The identifier field is indexed as one untokenized term.
    pub fn is_identifier(&self) -> bool { matches!(self, Field::Docno) }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.tag()) }
}

impl FromStr for Field {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Field::ALL
            .into_iter()
            .find(|f| f.tag() == upper)
            .ok_or_else(|| ConfigError::UnknownField(s.to_string()))
    }
}

/// One parsed record. Lives only until the index writer has consumed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    docno: String,
    fields: BTreeMap<Field, String>,
}

impl Document {
    /// Build a document from already separated field texts. Missing fields are empty.
    pub fn new(docno: impl Into<String>, fields: impl IntoIterator<Item = (Field, String)>) -> Self {
        let docno = docno.into();
        let mut map: BTreeMap<Field, String> = Field::ALL.into_iter().map(|f| (f, String::new())).collect();
        map.extend(fields.into_iter().filter(|(f, _)| !f.is_identifier()));
        map.insert(Field::Docno, docno.clone());
        Self { docno, fields: map }
    }

    /// Parse one raw record. Surrounding whitespace of the DOCNO is trimmed.
    pub fn from_record(record: &str) -> Result<Self, ExtractError> {
        let mut fields = BTreeMap::new();
        for field in Field::ALL {
            fields.insert(field, extract_field(record, field)?);
        }
        let docno = fields.get(&Field::Docno).map(|s| s.trim().to_string()).unwrap_or_default();
        if docno.is_empty() {
            return Err(ExtractError::MissingIdentifier);
        }
        fields.insert(Field::Docno, docno.clone());
        Ok(Self { docno, fields })
    }

    pub fn docno(&self) -> &str { &self.docno }

    pub fn field(&self, field: Field) -> &str {
        self.fields.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn fields(&self) -> impl Iterator<Item = (Field, &str)> {
        self.fields.iter().map(|(f, s)| (*f, s.as_str()))
    }
}

/// Split file content into records, dropping empty or whitespace-only fragments.
pub fn split_records(content: &str) -> impl Iterator<Item = &str> {
    content.split(RECORD_END).filter(|r| !r.trim().is_empty())
}

/// Concatenate the inner text of every `<NAME>...</NAME>` pair for `field`.
pub fn extract_field(record: &str, field: Field) -> Result<String, ExtractError> {
    let open = format!("<{}>", field.tag());
    let close = format!("</{}>", field.tag());
    let mut out = String::new();
    let mut cursor = 0;
    while let Some(rel) = record[cursor..].find(&open) {
        let tag_at = cursor + rel;
        let start = tag_at + open.len();
        let Some(len) = record[start..].find(&close) else {
            return Err(ExtractError::UnclosedTag { field, offset: tag_at });
        };
        out.push_str(&record[start..start + len]);
        cursor = start + len + close.len();
    }
    Ok(out)
}
