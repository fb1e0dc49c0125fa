//! Summed series for line and bar charts

use dash_records::{Label, Measure, Record, RecordField};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// Parallel label/value sequences
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesData {
    /// Axis labels
    pub labels: Vec<Label>,
    /// One value per label
    pub values: Vec<f64>,
}

impl SeriesData {
    /// Whether the series should be drawn
    ///
    /// Requires at least one label and one strictly positive value.
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.labels.is_empty() && self.values.iter().any(|v| *v > 0.0)
    }

    /// Number of points
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the series has no points
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Sum of all values
    #[must_use]
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Value for a label
    #[must_use]
    pub fn value_of(&self, label: &Label) -> Option<f64> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| self.values[i])
    }

    /// Iterate label/value pairs
    pub fn iter(&self) -> impl Iterator<Item = (&Label, f64)> + '_ {
        self.labels.iter().zip(self.values.iter().copied())
    }
}

impl<L: Into<Label>> FromIterator<(L, f64)> for SeriesData {
    fn from_iter<I: IntoIterator<Item = (L, f64)>>(iter: I) -> Self {
        let (labels, values) = iter.into_iter().map(|(l, v)| (l.into(), v)).unzip();
        Self { labels, values }
    }
}

/// Sum `value_field` per distinct non-empty `year_field`, labels ascending
#[must_use]
pub fn time_series(records: &[Record], year_field: RecordField, value_field: Measure) -> SeriesData {
    let mut sums: BTreeMap<Label, f64> = BTreeMap::new();
    for record in records {
        if let Some(label) = record.label(year_field) {
            *sums.entry(label).or_insert(0.0) += record.measure(value_field);
        }
    }
    sums.into_iter().collect()
}

/// Sum `value_field` per distinct non-empty `group_field`, labels in
/// first-encountered order
#[must_use]
pub fn grouped_sum(records: &[Record], group_field: RecordField, value_field: Measure) -> SeriesData {
    let mut sums: IndexMap<Label, f64> = IndexMap::new();
    for record in records {
        if let Some(label) = record.label(group_field) {
            *sums.entry(label).or_insert(0.0) += record.measure(value_field);
        }
    }
    sums.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn yearly(year: Option<i32>, intensity: f64) -> Record {
        Record {
            end_year: year,
            intensity,
            ..Record::default()
        }
    }

    fn regional(region: &str, likelihood: f64) -> Record {
        Record {
            region: region.into(),
            likelihood,
            ..Record::default()
        }
    }

    #[test]
    fn time_series_sums_per_year() {
        let records = vec![
            yearly(Some(2020), 5.0),
            yearly(Some(2020), 3.0),
            yearly(Some(2021), 0.0),
        ];
        let series = time_series(&records, RecordField::EndYear, Measure::Intensity);

        assert_eq!(series.labels, vec![Label::Year(2020), Label::Year(2021)]);
        assert_eq!(series.values, vec![8.0, 0.0]);
        assert!(series.is_valid());
    }

    #[test]
    fn time_series_sorts_and_skips_empty_years() {
        let records = vec![
            yearly(Some(2040), 1.0),
            yearly(None, 100.0),
            yearly(Some(2018), 2.0),
            yearly(Some(2025), 3.0),
        ];
        let series = time_series(&records, RecordField::EndYear, Measure::Intensity);

        assert_eq!(
            series.labels,
            vec![Label::Year(2018), Label::Year(2025), Label::Year(2040)]
        );
        assert_eq!(series.total(), 6.0);
    }

    #[test]
    fn time_series_over_text_field_is_lexicographic() {
        let records = vec![
            Record { topic: "oil".into(), intensity: 1.0, ..Record::default() },
            Record { topic: "gas".into(), intensity: 2.0, ..Record::default() },
        ];
        let series = time_series(&records, RecordField::Topic, Measure::Intensity);
        assert_eq!(series.labels, vec![Label::text("gas"), Label::text("oil")]);
    }

    #[test]
    fn all_zero_series_is_invalid() {
        let records = vec![yearly(Some(2020), 0.0), yearly(Some(2021), 0.0)];
        let series = time_series(&records, RecordField::EndYear, Measure::Intensity);

        assert_eq!(series.len(), 2);
        assert!(!series.is_valid());
    }

    #[test]
    fn grouped_sum_keeps_encounter_order() {
        let records = vec![
            regional("World", 3.0),
            regional("Asia", 2.0),
            regional("", 9.0),
            regional("World", 4.0),
            regional("Africa", 1.0),
        ];
        let series = grouped_sum(&records, RecordField::Region, Measure::Likelihood);

        assert_eq!(
            series.labels,
            vec![Label::text("World"), Label::text("Asia"), Label::text("Africa")]
        );
        assert_eq!(series.values, vec![7.0, 2.0, 1.0]);
        assert_eq!(series.value_of(&Label::text("Asia")), Some(2.0));
    }

    #[test]
    fn empty_input_is_empty_and_invalid() {
        let series = grouped_sum(&[], RecordField::Country, Measure::Relevance);
        assert!(series.is_empty());
        assert!(series.values.is_empty());
        assert!(!series.is_valid());

        let series = time_series(&[], RecordField::EndYear, Measure::Intensity);
        assert!(series.is_empty());
        assert!(!series.is_valid());
    }
}
