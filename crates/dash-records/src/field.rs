//! Record field identifiers and axis labels

use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical record field usable as a filter or chart axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    /// Year the record's projection ends
    EndYear,
    /// Topic keyword
    Topic,
    /// Industry sector
    Sector,
    /// PESTLE category
    Pestle,
    /// Publishing source
    Source,
    /// Country
    Country,
    /// World region
    Region,
}

impl RecordField {
    /// All fields in filter-panel order
    pub const ALL: [RecordField; 7] = [
        RecordField::EndYear,
        RecordField::Topic,
        RecordField::Sector,
        RecordField::Pestle,
        RecordField::Source,
        RecordField::Country,
        RecordField::Region,
    ];

    /// Name used by the query endpoint and the wire format
    #[inline]
    #[must_use]
    pub const fn query_name(self) -> &'static str {
        match self {
            Self::EndYear => "end_year",
            Self::Topic => "topic",
            Self::Sector => "sector",
            Self::Pestle => "pestle",
            Self::Source => "source",
            Self::Country => "country",
            Self::Region => "region",
        }
    }

    /// Name used by the filter selection
    #[inline]
    #[must_use]
    pub const fn selection_name(self) -> &'static str {
        match self {
            Self::EndYear => "endYear",
            other => other.query_name(),
        }
    }

    /// Human-readable label for filter dropdowns
    #[inline]
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::EndYear => "End Year",
            Self::Topic => "Topic",
            Self::Sector => "Sector",
            Self::Pestle => "PESTLE",
            Self::Source => "Source",
            Self::Country => "Country",
            Self::Region => "Region",
        }
    }

    /// Resolve a selection name or query name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.selection_name() == name || f.query_name() == name)
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selection_name())
    }
}

/// Numeric record field that charts sum or average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    /// Intensity score
    Intensity,
    /// Likelihood score
    Likelihood,
    /// Relevance score
    Relevance,
}

impl Measure {
    /// All measures
    pub const ALL: [Measure; 3] = [Measure::Intensity, Measure::Likelihood, Measure::Relevance];

    /// Wire name
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Intensity => "intensity",
            Self::Likelihood => "likelihood",
            Self::Relevance => "relevance",
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A distinct, non-empty field value used as a chart label
///
/// Years order numerically and before any text label; text orders
/// lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    /// Numeric year
    Year(i32),
    /// Text value
    Text(String),
}

impl Label {
    /// Create text label
    #[inline]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Year value, if this is a year label
    #[inline]
    #[must_use]
    pub fn as_year(&self) -> Option<i32> {
        match self {
            Self::Year(year) => Some(*year),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year(year) => write!(f, "{year}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<i32> for Label {
    fn from(year: i32) -> Self {
        Self::Year(year)
    }
}

impl From<&str> for Label {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}
