//! Dropdown choices derived from a record snapshot

use crate::selection::FilterValue;
use dash_records::{Label, Record, RecordField};
use indexmap::IndexSet;
use serde::Serialize;

/// Choices for one dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldOptions {
    /// Field the dropdown controls
    pub field: RecordField,
    /// Dropdown caption
    pub label: &'static str,
    /// "All" followed by each distinct non-empty value
    pub values: Vec<FilterValue>,
}

impl FieldOptions {
    /// Whether `value` is offered
    #[must_use]
    pub fn contains(&self, value: &FilterValue) -> bool {
        self.values.contains(value)
    }

    /// Distinct concrete values, excluding "All"
    #[must_use]
    pub fn distinct(&self) -> usize {
        self.values.len().saturating_sub(1)
    }
}

/// Choices for all seven dropdowns, in filter-panel order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FilterOptions {
    fields: Vec<FieldOptions>,
}

impl FilterOptions {
    /// Collect distinct values per field
    ///
    /// End years sort ascending; other fields keep first-seen order.
    #[must_use]
    pub fn from_records(records: &[Record]) -> Self {
        let fields = RecordField::ALL
            .into_iter()
            .map(|field| {
                let mut seen: IndexSet<Label> =
                    records.iter().filter_map(|r| r.label(field)).collect();
                if field == RecordField::EndYear {
                    seen.sort();
                }

                let values = std::iter::once(FilterValue::All)
                    .chain(seen.into_iter().map(|l| FilterValue::Exact(l.to_string())))
                    .collect();

                FieldOptions {
                    field,
                    label: field.display_name(),
                    values,
                }
            })
            .collect();

        Self { fields }
    }

    /// Choices for one field
    #[must_use]
    pub fn get(&self, field: RecordField) -> Option<&FieldOptions> {
        self.fields.iter().find(|o| o.field == field)
    }

    /// All dropdowns
    pub fn iter(&self) -> impl Iterator<Item = &FieldOptions> {
        self.fields.iter()
    }
}
