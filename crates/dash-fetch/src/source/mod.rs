//! Record sources
//!
//! A [`RecordSource`] answers a sparse filter query with the matching records.

mod http;
mod memory;

pub use http::{HttpRecordSource, DEFAULT_ENDPOINT_PATH};
pub use memory::MemoryRecordSource;

use crate::error::FetchError;
use async_trait::async_trait;
use dash_filters::FilterQuery;
use dash_records::Record;
use std::sync::Arc;

/// Anything that can answer a filter query
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Records matching every constraint in `query`
    async fn fetch(&self, query: &FilterQuery) -> Result<Vec<Record>, FetchError>;
}

#[async_trait]
impl<T: RecordSource + ?Sized> RecordSource for Arc<T> {
    async fn fetch(&self, query: &FilterQuery) -> Result<Vec<Record>, FetchError> {
        (**self).fetch(query).await
    }
}
