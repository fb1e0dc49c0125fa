//! Immutable filter selection

use crate::error::InvalidFieldError;
use crate::query::FilterQuery;
use dash_records::RecordField;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel meaning "no constraint on this field"
pub const ALL_SENTINEL: &str = "All";

/// One field's selection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilterValue {
    /// No constraint
    #[default]
    All,
    /// Field must equal this value exactly
    Exact(String),
}

impl FilterValue {
    /// Parse a dropdown value; `"All"` is the sentinel
    #[must_use]
    pub fn parse(value: impl Into<String>) -> Self {
        let value = value.into();
        if value == ALL_SENTINEL {
            Self::All
        } else {
            Self::Exact(value)
        }
    }

    /// Whether this is the sentinel
    #[inline]
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// The concrete value, if any
    #[inline]
    #[must_use]
    pub fn exact(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Exact(value) => Some(value),
        }
    }

    /// Dropdown representation
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.exact().unwrap_or(ALL_SENTINEL)
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::parse(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<FilterValue> for String {
    fn from(value: FilterValue) -> Self {
        match value {
            FilterValue::All => ALL_SENTINEL.to_string(),
            FilterValue::Exact(value) => value,
        }
    }
}

/// The current dropdown state
///
/// Every field starts at "All".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSelection {
    end_year: FilterValue,
    topic: FilterValue,
    sector: FilterValue,
    pestle: FilterValue,
    source: FilterValue,
    country: FilterValue,
    region: FilterValue,
}

impl FilterSelection {
    /// Selection for one field
    #[must_use]
    pub fn get(&self, field: RecordField) -> &FilterValue {
        match field {
            RecordField::EndYear => &self.end_year,
            RecordField::Topic => &self.topic,
            RecordField::Sector => &self.sector,
            RecordField::Pestle => &self.pestle,
            RecordField::Source => &self.source,
            RecordField::Country => &self.country,
            RecordField::Region => &self.region,
        }
    }

    /// New selection with one field replaced
    #[must_use]
    pub fn with(&self, field: RecordField, value: impl Into<FilterValue>) -> Self {
        let mut next = self.clone();
        let slot = match field {
            RecordField::EndYear => &mut next.end_year,
            RecordField::Topic => &mut next.topic,
            RecordField::Sector => &mut next.sector,
            RecordField::Pestle => &mut next.pestle,
            RecordField::Source => &mut next.source,
            RecordField::Country => &mut next.country,
            RecordField::Region => &mut next.region,
        };
        *slot = value.into();
        next
    }

    /// New selection with the field called `name` set to `value`
    ///
    /// `name` is a selection name (`endYear`) or query name (`end_year`).
    ///
    /// # Errors
    /// `InvalidFieldError` if `name` is not one of the seven fields
    pub fn set_field(&self, name: &str, value: &str) -> Result<Self, InvalidFieldError> {
        let field = RecordField::from_name(name).ok_or_else(|| InvalidFieldError::new(name))?;
        Ok(self.with(field, value))
    }

    /// Selection with every field at "All"
    #[inline]
    #[must_use]
    pub fn reset(&self) -> Self {
        Self::default()
    }

    /// Whether no field is constrained
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        RecordField::ALL.iter().all(|f| self.get(*f).is_all())
    }

    /// Constrained fields with their values, in field order
    pub fn active(&self) -> impl Iterator<Item = (RecordField, &str)> + '_ {
        RecordField::ALL
            .into_iter()
            .filter_map(|f| self.get(f).exact().map(|v| (f, v)))
    }

    /// Sparse query containing only constrained fields
    #[must_use]
    pub fn to_query(&self) -> FilterQuery {
        self.active().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_to_all() {
        let selection = FilterSelection::default();
        assert!(selection.is_unfiltered());
        assert!(RecordField::ALL.iter().all(|f| selection.get(*f) == &FilterValue::All));
        assert!(selection.to_query().is_empty());
    }

    #[test]
    fn set_field_replaces_one_field() {
        let base = FilterSelection::default().with(RecordField::Region, "Asia");
        let next = base.set_field("country", "India").unwrap();

        assert_eq!(next.get(RecordField::Country), &FilterValue::Exact("India".into()));
        assert_eq!(next.get(RecordField::Region), &FilterValue::Exact("Asia".into()));
        // the original is untouched
        assert_eq!(base.get(RecordField::Country), &FilterValue::All);
    }

    #[test]
    fn set_field_accepts_both_name_forms() {
        let a = FilterSelection::default().set_field("endYear", "2030").unwrap();
        let b = FilterSelection::default().set_field("end_year", "2030").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn all_value_clears_field() {
        let selection = FilterSelection::default()
            .set_field("topic", "oil")
            .unwrap()
            .set_field("topic", "All")
            .unwrap();
        assert!(selection.is_unfiltered());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = FilterSelection::default().set_field("impact", "high").unwrap_err();
        assert_eq!(err, InvalidFieldError::new("impact"));
        assert_eq!(err.to_string(), "unknown filter field: 'impact'");
    }

    #[test]
    fn reset_clears_everything() {
        let selection = FilterSelection::default()
            .with(RecordField::Topic, "oil")
            .with(RecordField::Pestle, "Economic")
            .with(RecordField::Source, "EIA");
        assert!(!selection.is_unfiltered());
        assert!(selection.reset().is_unfiltered());
    }

    #[test]
    fn serializes_with_selection_names() {
        let selection = FilterSelection::default().with(RecordField::EndYear, "2030");
        let json = serde_json::to_value(&selection).unwrap();

        assert_eq!(json["endYear"], "2030");
        assert_eq!(json["topic"], "All");

        let back: FilterSelection = serde_json::from_str(r#"{"sector": "Energy"}"#).unwrap();
        assert_eq!(back.get(RecordField::Sector).exact(), Some("Energy"));
        assert!(back.get(RecordField::EndYear).is_all());
    }
}
