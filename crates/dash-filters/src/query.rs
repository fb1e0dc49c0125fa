//! Sparse query parameters for the record service

use dash_records::{Record, RecordField};
use serde::Serialize;
use std::fmt;

/// Constrained fields only, in field order, keyed by external name
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterQuery {
    params: Vec<(RecordField, String)>,
}

impl FilterQuery {
    /// Query with no constraints
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value constrained for `field`
    #[must_use]
    pub fn get(&self, field: RecordField) -> Option<&str> {
        self.params
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
    }

    /// Whether nothing is constrained
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Number of constrained fields
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// `(external name, value)` pairs for URL encoding
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        self.params
            .iter()
            .map(|(f, v)| (f.query_name(), v.as_str()))
            .collect()
    }

    /// Exact-match semantics of the query endpoint
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        self.params
            .iter()
            .all(|(field, value)| record.field_equals(*field, value))
    }

    /// Records of `records` satisfying the query
    pub fn filter<'a>(&'a self, records: &'a [Record]) -> impl Iterator<Item = &'a Record> + 'a {
        records.iter().filter(move |r| self.matches(r))
    }
}

impl<V: Into<String>> FromIterator<(RecordField, V)> for FilterQuery {
    fn from_iter<I: IntoIterator<Item = (RecordField, V)>>(iter: I) -> Self {
        let mut params: Vec<(RecordField, String)> = Vec::new();
        for (field, value) in iter {
            let value = value.into();
            match params.iter_mut().find(|(f, _)| *f == field) {
                Some(slot) => slot.1 = value,
                None => params.push((field, value)),
            }
        }
        params.sort_by_key(|(f, _)| *f);
        Self { params }
    }
}

impl Serialize for FilterQuery {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.params.len()))?;
        for (field, value) in &self.params {
            map.serialize_entry(field.query_name(), value)?;
        }
        map.end()
    }
}

impl fmt::Display for FilterQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, value)) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}={}", field.query_name(), value)?;
        }
        Ok(())
    }
}
