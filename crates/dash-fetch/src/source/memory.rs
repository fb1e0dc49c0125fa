use super::RecordSource;
use crate::error::FetchError;
use async_trait::async_trait;
use dash_filters::FilterQuery;
use dash_records::{DecodeError, Record, RecordsResponse};
use std::path::Path;
use tracing::debug;

/// A loaded dataset answering queries locally
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordSource {
    records: Vec<Record>,
}

impl MemoryRecordSource {
    /// Source over an in-memory dataset
    #[must_use]
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Source over a JSON file in either response form
    ///
    /// # Errors
    /// `DecodeError` if the file cannot be read or parsed
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DecodeError> {
        let records = RecordsResponse::read_file(path)?.into_records();
        Ok(Self { records })
    }

    /// The full dataset
    #[inline]
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

#[async_trait]
impl RecordSource for MemoryRecordSource {
    async fn fetch(&self, query: &FilterQuery) -> Result<Vec<Record>, FetchError> {
        let hits: Vec<Record> = query.filter(&self.records).cloned().collect();
        debug!(%query, total = self.records.len(), hits = hits.len(), "filtered local dataset");
        Ok(hits)
    }
}
