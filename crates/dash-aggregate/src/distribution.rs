//! Category distribution for pie charts

use dash_records::{Label, Record, RecordField};
use indexmap::IndexMap;
use serde::Serialize;

/// Label of the bucket collecting below-threshold categories
pub const OTHER_LABEL: &str = "Other";

/// Default share of the record count below which a category is folded
pub const DEFAULT_THRESHOLD: f64 = 0.02;

/// One pie slice
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    /// Category, or "Other"
    pub label: Label,
    /// Records in this slice
    pub count: u64,
    /// Hue in degrees, evenly spaced around the color wheel
    pub hue: f64,
    /// Set only on the bucket of folded categories
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub folded: bool,
}

/// Category counts with small categories folded into "Other"
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Distribution {
    /// Surviving categories in encounter order, "Other" last if present
    pub slices: Vec<Slice>,
    /// Number of input records the threshold was measured against
    pub total: u64,
}

impl Distribution {
    /// Whether the distribution should be drawn
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.slices.iter().any(|s| s.count > 0)
    }

    /// Slice labels
    #[must_use]
    pub fn labels(&self) -> Vec<&Label> {
        self.slices.iter().map(|s| &s.label).collect()
    }

    /// Slice counts
    #[must_use]
    pub fn counts(&self) -> Vec<u64> {
        self.slices.iter().map(|s| s.count).collect()
    }

    /// The "Other" bucket, if one was emitted
    #[must_use]
    pub fn other(&self) -> Option<&Slice> {
        self.slices.last().filter(|s| s.folded)
    }
}

/// Count records per distinct non-empty `category_field` value
///
/// Categories whose count is strictly below `threshold * records.len()` are
/// merged into a trailing "Other" slice. Empty values are not categories
/// but still count toward the total.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn categorical_distribution(
    records: &[Record],
    category_field: RecordField,
    threshold: f64,
) -> Distribution {
    let mut counts: IndexMap<Label, u64> = IndexMap::new();
    for label in records.iter().filter_map(|r| r.label(category_field)) {
        *counts.entry(label).or_insert(0) += 1;
    }

    let total = records.len() as u64;
    let cutoff = threshold * total as f64;

    let mut kept: Vec<(Label, u64, bool)> = Vec::with_capacity(counts.len() + 1);
    let mut other = 0;
    for (label, count) in counts {
        if (count as f64) < cutoff {
            other += count;
        } else {
            kept.push((label, count, false));
        }
    }
    if other > 0 {
        kept.push((Label::text(OTHER_LABEL), other, true));
    }

    let n = kept.len() as f64;
    let slices = kept
        .into_iter()
        .enumerate()
        .map(|(i, (label, count, folded))| Slice {
            label,
            count,
            hue: i as f64 * 360.0 / n,
            folded,
        })
        .collect();

    Distribution { slices, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn topics(names: &[(&str, usize)]) -> Vec<Record> {
        names
            .iter()
            .flat_map(|(name, n)| {
                std::iter::repeat_with(move || Record {
                    topic: (*name).into(),
                    ..Record::default()
                })
                .take(*n)
            })
            .collect()
    }

    #[test]
    fn folds_small_categories_into_other() {
        // 100 records: cutoff is 2
        let records = topics(&[("oil", 60), ("gas", 37), ("coal", 1), ("wind", 1), ("tide", 1)]);
        let dist = categorical_distribution(&records, RecordField::Topic, DEFAULT_THRESHOLD);

        assert_eq!(
            dist.labels(),
            vec![&Label::text("oil"), &Label::text("gas"), &Label::text("Other")]
        );
        assert_eq!(dist.counts(), vec![60, 37, 3]);
        assert_eq!(dist.other().map(|s| s.count), Some(3));
        assert_eq!(dist.total, 100);
    }

    #[test]
    fn count_equal_to_cutoff_survives() {
        let records = topics(&[("oil", 98), ("gas", 2)]);
        let dist = categorical_distribution(&records, RecordField::Topic, DEFAULT_THRESHOLD);

        assert_eq!(dist.counts(), vec![98, 2]);
        assert!(dist.other().is_none());
    }

    #[test]
    fn real_other_category_is_not_the_folded_bucket() {
        let records = topics(&[("oil", 50), ("Other", 50)]);
        let dist = categorical_distribution(&records, RecordField::Topic, DEFAULT_THRESHOLD);

        assert_eq!(dist.labels(), vec![&Label::text("oil"), &Label::text("Other")]);
        assert!(dist.other().is_none());
        assert!(dist.slices.iter().all(|s| !s.folded));
    }

    #[test]
    fn real_other_category_sits_beside_folded_bucket() {
        let records = topics(&[("Other", 60), ("oil", 39), ("gas", 1)]);
        let dist = categorical_distribution(&records, RecordField::Topic, DEFAULT_THRESHOLD);

        assert_eq!(dist.counts(), vec![60, 39, 1]);
        assert_eq!(dist.other().map(|s| s.count), Some(1));
        assert!(!dist.slices[0].folded);
    }

    #[test]
    fn hues_are_evenly_spaced() {
        let records = topics(&[("a", 10), ("b", 10), ("c", 10), ("d", 10)]);
        let dist = categorical_distribution(&records, RecordField::Topic, DEFAULT_THRESHOLD);

        let hues: Vec<f64> = dist.slices.iter().map(|s| s.hue).collect();
        assert_eq!(hues, vec![0.0, 90.0, 180.0, 270.0]);
    }

    #[test]
    fn empty_categories_count_toward_total_only() {
        let mut records = topics(&[("oil", 3)]);
        records.push(Record::default());

        let dist = categorical_distribution(&records, RecordField::Topic, DEFAULT_THRESHOLD);
        assert_eq!(dist.labels(), vec![&Label::text("oil")]);
        assert_eq!(dist.total, 4);
    }

    #[test]
    fn zero_threshold_keeps_everything() {
        let records = topics(&[("oil", 500), ("gas", 1)]);
        let dist = categorical_distribution(&records, RecordField::Topic, 0.0);
        assert_eq!(dist.counts(), vec![500, 1]);
    }

    #[test]
    fn empty_input_is_invalid() {
        let dist = categorical_distribution(&[], RecordField::Topic, DEFAULT_THRESHOLD);
        assert!(dist.slices.is_empty());
        assert!(!dist.is_valid());
    }
}
