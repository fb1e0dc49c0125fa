//! Testing utilities for the dashboard workspace
//!
//! Shared record fixtures and a scriptable record source.

#![allow(missing_docs)]

use async_trait::async_trait;
use dash_fetch::{FetchError, RecordSource};
use dash_filters::FilterQuery;
use dash_records::Record;
use parking_lot::Mutex;
use std::collections::VecDeque;

pub fn record(end_year: Option<i32>, topic: &str, sector: &str, region: &str, intensity: f64) -> Record {
    Record {
        end_year,
        topic: topic.to_string(),
        sector: sector.to_string(),
        region: region.to_string(),
        intensity,
        ..Record::default()
    }
}

/// A small dataset touching every field, with a few empty values
pub fn sample_records() -> Vec<Record> {
    vec![
        Record {
            end_year: Some(2030),
            topic: "oil".into(),
            sector: "Energy".into(),
            pestle: "Economic".into(),
            source: "EIA".into(),
            country: "United States of America".into(),
            region: "Northern America".into(),
            intensity: 6.0,
            likelihood: 3.0,
            relevance: 2.0,
        },
        Record {
            end_year: Some(2025),
            topic: "gas".into(),
            sector: "Energy".into(),
            pestle: "Industries".into(),
            source: "OPEC".into(),
            country: "Iran".into(),
            region: "Western Asia".into(),
            intensity: 4.0,
            likelihood: 2.0,
            relevance: 3.0,
        },
        Record {
            end_year: None,
            topic: "oil".into(),
            sector: String::new(),
            pestle: "Economic".into(),
            source: "Reuters".into(),
            country: "India".into(),
            region: "Southern Asia".into(),
            intensity: 2.0,
            likelihood: 1.0,
            relevance: 1.0,
        },
        Record {
            end_year: Some(2030),
            topic: "market".into(),
            sector: "Retail".into(),
            pestle: String::new(),
            source: "EIA".into(),
            country: String::new(),
            region: "Northern America".into(),
            intensity: 8.0,
            likelihood: 4.0,
            relevance: 5.0,
        },
    ]
}

/// JSON body for `records` in the paged response form
pub fn paged_body(records: &[Record]) -> String {
    serde_json::json!({
        "count": records.len(),
        "next": null,
        "previous": null,
        "results": records,
    })
    .to_string()
}

enum Reply {
    Records(Vec<Record>),
    Status(u16),
}

/// Record source that records every query and answers from a script
///
/// Scripted replies are consumed in order; once exhausted, every query is
/// answered by filtering the fallback dataset.
#[derive(Default)]
pub struct RecordingSource {
    fallback: Vec<Record>,
    script: Mutex<VecDeque<Reply>>,
    queries: Mutex<Vec<FilterQuery>>,
}

impl RecordingSource {
    pub fn new(fallback: Vec<Record>) -> Self {
        Self {
            fallback,
            ..Self::default()
        }
    }

    /// Next query answers with `records`
    pub fn then_records(self, records: Vec<Record>) -> Self {
        self.script.lock().push_back(Reply::Records(records));
        self
    }

    /// Next query fails with `status`
    pub fn then_status(self, status: u16) -> Self {
        self.script.lock().push_back(Reply::Status(status));
        self
    }

    pub fn queries(&self) -> Vec<FilterQuery> {
        self.queries.lock().clone()
    }

    pub fn calls(&self) -> usize {
        self.queries.lock().len()
    }
}

#[async_trait]
impl RecordSource for RecordingSource {
    async fn fetch(&self, query: &FilterQuery) -> Result<Vec<Record>, FetchError> {
        self.queries.lock().push(query.clone());
        let reply = self.script.lock().pop_front();
        match reply {
            Some(Reply::Records(records)) => Ok(records),
            Some(Reply::Status(status)) => Err(FetchError::Status {
                status,
                url: format!("memory://records?{query}"),
            }),
            None => Ok(query.filter(&self.fallback).cloned().collect()),
        }
    }
}
