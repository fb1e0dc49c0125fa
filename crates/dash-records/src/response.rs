//! Query response envelope
//!
//! The query endpoint has been observed to answer with either a bare list of
//! records or a paged object carrying the records under `results`. Both are
//! accepted here so nothing past this boundary has to care.

use crate::error::DecodeError;
use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Paged response form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordPage {
    /// Total matching records across all pages
    #[serde(default)]
    pub count: Option<u64>,
    /// Link to the following page
    #[serde(default)]
    pub next: Option<String>,
    /// Link to the preceding page
    #[serde(default)]
    pub previous: Option<String>,
    /// Records on this page
    pub results: Vec<Record>,
}

/// Either response form of the query endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RecordsResponse {
    /// Bare list of records
    List(Vec<Record>),
    /// Paged envelope
    Page(RecordPage),
}

impl RecordsResponse {
    /// Decode a response body
    ///
    /// # Errors
    /// `DecodeError::Malformed` if the body is neither form
    pub fn parse(body: &str) -> Result<Self, DecodeError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Decode a response body from raw bytes
    ///
    /// # Errors
    /// `DecodeError::Malformed` if the body is neither form
    pub fn from_slice(body: &[u8]) -> Result<Self, DecodeError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Read a dataset file in either form
    ///
    /// # Errors
    /// `DecodeError::Io` if the file cannot be read, `Malformed` otherwise
    pub fn read_file(path: impl AsRef<Path>) -> Result<Self, DecodeError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| DecodeError::io_error(path, e))?;
        Self::from_slice(&bytes)
    }

    /// Records carried by the response
    #[inline]
    #[must_use]
    pub fn records(&self) -> &[Record] {
        match self {
            Self::List(records) => records,
            Self::Page(page) => &page.results,
        }
    }

    /// Link to the following page, if any
    #[inline]
    #[must_use]
    pub fn next_page(&self) -> Option<&str> {
        match self {
            Self::List(_) => None,
            Self::Page(page) => page.next.as_deref(),
        }
    }

    /// Take the records
    #[inline]
    #[must_use]
    pub fn into_records(self) -> Vec<Record> {
        match self {
            Self::List(records) => records,
            Self::Page(page) => page.results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn accepts_bare_list() {
        let response = RecordsResponse::parse(r#"[{"topic": "oil"}, {"topic": "gas"}]"#).unwrap();

        assert!(matches!(response, RecordsResponse::List(_)));
        assert_eq!(response.records().len(), 2);
        assert_eq!(response.next_page(), None);
    }

    #[test]
    fn accepts_paged_envelope() {
        let body = r#"{
            "count": 250,
            "next": "?page=2",
            "previous": null,
            "results": [{"topic": "oil", "end_year": 2030}]
        }"#;
        let response = RecordsResponse::parse(body).unwrap();

        assert_eq!(response.next_page(), Some("?page=2"));
        let records = response.into_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].end_year, Some(2030));
    }

    #[test]
    fn empty_forms_are_valid() {
        assert!(RecordsResponse::parse("[]").unwrap().records().is_empty());
        assert!(RecordsResponse::parse(r#"{"results": []}"#)
            .unwrap()
            .records()
            .is_empty());
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(matches!(
            RecordsResponse::parse(r#"{"error": "Invalid page number"}"#),
            Err(DecodeError::Malformed(_))
        ));
        assert!(RecordsResponse::parse("not json").is_err());
    }

    #[test]
    fn reads_dataset_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"region": "Asia", "intensity": 4}}]"#).unwrap();

        let response = RecordsResponse::read_file(file.path()).unwrap();
        assert_eq!(response.records()[0].region, "Asia");
    }

    #[test]
    fn missing_dataset_file_is_io_error() {
        let err = RecordsResponse::read_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, DecodeError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
