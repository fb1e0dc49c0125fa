use super::RecordSource;
use crate::error::FetchError;
use async_trait::async_trait;
use dash_filters::FilterQuery;
use dash_records::{Record, RecordsResponse};
use std::time::Duration;
use tracing::{debug, info};

/// Default query endpoint path
pub const DEFAULT_ENDPOINT_PATH: &str = "/api/data/";

/// Query service reached over HTTP
///
/// Issues `GET {base_url}{path}?field=value...` and accepts either a bare
/// list of records or a paged object with `results`.
#[derive(Debug, Clone)]
pub struct HttpRecordSource {
    client: reqwest::Client,
    base_url: String,
    endpoint: String,
    timeout: Duration,
    follow_pages: bool,
    max_pages: usize,
}

impl HttpRecordSource {
    /// Default per-request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Default page limit when following `next` links
    pub const DEFAULT_MAX_PAGES: usize = 100;

    /// Source for a service root such as `http://localhost:8000`
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Source sharing an existing client
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            endpoint: join(base_url, DEFAULT_ENDPOINT_PATH),
            timeout: Self::DEFAULT_TIMEOUT,
            follow_pages: false,
            max_pages: Self::DEFAULT_MAX_PAGES,
        }
    }

    /// Set endpoint path
    #[must_use]
    pub fn with_path(mut self, path: &str) -> Self {
        self.endpoint = join(&self.base_url, path);
        self
    }

    /// Set per-request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Follow `next` links for at most `max_pages` pages
    #[must_use]
    pub fn with_page_following(mut self, max_pages: usize) -> Self {
        self.follow_pages = true;
        self.max_pages = max_pages.max(1);
        self
    }

    /// Full endpoint URL
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn fetch_page(
        &self,
        query: &FilterQuery,
        page: usize,
    ) -> Result<RecordsResponse, FetchError> {
        let mut request = self
            .client
            .get(&self.endpoint)
            .query(&query.pairs())
            .timeout(self.timeout);
        if page > 1 {
            request = request.query(&[("page", page)]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(RecordsResponse::from_slice(&body)?)
    }
}

#[async_trait]
impl RecordSource for HttpRecordSource {
    async fn fetch(&self, query: &FilterQuery) -> Result<Vec<Record>, FetchError> {
        let mut records = Vec::new();
        let mut page = 1;

        loop {
            debug!(endpoint = %self.endpoint, %query, page, "requesting records");
            let response = self.fetch_page(query, page).await?;
            let more = self.follow_pages && response.next_page().is_some();
            records.extend(response.into_records());

            if !more || page >= self.max_pages {
                break;
            }
            page += 1;
        }

        info!(endpoint = %self.endpoint, %query, pages = page, count = records.len(), "records fetched");
        Ok(records)
    }
}

fn join(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        assert_eq!(
            HttpRecordSource::new("http://localhost:8000/").endpoint(),
            "http://localhost:8000/api/data/"
        );
        assert_eq!(
            HttpRecordSource::new("http://localhost:8000")
                .with_path("records")
                .endpoint(),
            "http://localhost:8000/records"
        );
    }

    #[test]
    fn page_limit_is_at_least_one() {
        let source = HttpRecordSource::new("http://localhost:8000").with_page_following(0);
        assert!(source.follow_pages);
        assert_eq!(source.max_pages, 1);
    }
}
