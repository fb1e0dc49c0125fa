//! The research record

use crate::field::{Label, Measure, RecordField};
use crate::wire;
use serde::{Deserialize, Serialize};

/// One research record as returned by the query service
///
/// Records have no identity beyond their position in a result list and are
/// never mutated after decoding.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    /// Projection end year, `None` when empty
    #[serde(
        default,
        deserialize_with = "wire::year",
        serialize_with = "wire::serialize_year"
    )]
    pub end_year: Option<i32>,
    /// Topic keyword
    #[serde(default, deserialize_with = "wire::text")]
    pub topic: String,
    /// Industry sector
    #[serde(default, deserialize_with = "wire::text")]
    pub sector: String,
    /// PESTLE category
    #[serde(default, deserialize_with = "wire::text")]
    pub pestle: String,
    /// Publishing source
    #[serde(default, deserialize_with = "wire::text")]
    pub source: String,
    /// Country
    #[serde(default, deserialize_with = "wire::text")]
    pub country: String,
    /// World region
    #[serde(default, deserialize_with = "wire::text")]
    pub region: String,
    /// Intensity score
    #[serde(default, deserialize_with = "wire::measure")]
    pub intensity: f64,
    /// Likelihood score
    #[serde(default, deserialize_with = "wire::measure")]
    pub likelihood: f64,
    /// Relevance score
    #[serde(default, deserialize_with = "wire::measure")]
    pub relevance: f64,
}

impl Record {
    /// Text value of a categorical field (`None` for `EndYear`)
    #[must_use]
    pub fn text(&self, field: RecordField) -> Option<&str> {
        match field {
            RecordField::EndYear => None,
            RecordField::Topic => Some(&self.topic),
            RecordField::Sector => Some(&self.sector),
            RecordField::Pestle => Some(&self.pestle),
            RecordField::Source => Some(&self.source),
            RecordField::Country => Some(&self.country),
            RecordField::Region => Some(&self.region),
        }
    }

    /// Axis label for a field, `None` when the value is empty
    #[must_use]
    pub fn label(&self, field: RecordField) -> Option<Label> {
        match field {
            RecordField::EndYear => self.end_year.map(Label::Year),
            other => self
                .text(other)
                .filter(|text| !text.is_empty())
                .map(Label::text),
        }
    }

    /// Exact-match comparison against a raw query value
    ///
    /// Years compare by their decimal representation; an empty year never
    /// matches.
    #[must_use]
    pub fn field_equals(&self, field: RecordField, value: &str) -> bool {
        match field {
            RecordField::EndYear => self.end_year.is_some_and(|year| year.to_string() == value),
            other => self.text(other) == Some(value),
        }
    }

    /// Numeric value of a measure
    #[inline]
    #[must_use]
    pub fn measure(&self, measure: Measure) -> f64 {
        match measure {
            Measure::Intensity => self.intensity,
            Measure::Likelihood => self.likelihood,
            Measure::Relevance => self.relevance,
        }
    }
}
