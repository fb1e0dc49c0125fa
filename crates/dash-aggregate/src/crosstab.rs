//! Cross-tabulated averages for heatmaps

use dash_records::{Label, Measure, Record, RecordField};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Which labels an axis admits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum AxisFilter {
    /// Every non-empty value
    #[default]
    Any,
    /// Years within `min..=max`; text labels are rejected
    YearRange {
        /// Inclusive lower bound
        min: i32,
        /// Inclusive upper bound
        max: i32,
    },
}

impl AxisFilter {
    /// Whether `label` belongs on the axis
    #[must_use]
    pub fn accepts(&self, label: &Label) -> bool {
        match *self {
            Self::Any => true,
            Self::YearRange { min, max } => label.as_year().is_some_and(|y| (min..=max).contains(&y)),
        }
    }
}

/// How axis labels are ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisOrder {
    /// First-encountered order
    #[default]
    Encounter,
    /// Ascending label order
    Ascending,
}

/// One side of a cross-tabulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Axis {
    /// Field supplying the labels
    pub field: RecordField,
    /// Admission filter
    pub filter: AxisFilter,
    /// Label ordering
    pub order: AxisOrder,
}

impl Axis {
    /// Axis over every non-empty value in encounter order
    #[inline]
    #[must_use]
    pub fn new(field: RecordField) -> Self {
        Self {
            field,
            filter: AxisFilter::Any,
            order: AxisOrder::Encounter,
        }
    }

    /// With admission filter
    #[inline]
    #[must_use]
    pub fn with_filter(mut self, filter: AxisFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Order labels ascending
    #[inline]
    #[must_use]
    pub fn ascending(mut self) -> Self {
        self.order = AxisOrder::Ascending;
        self
    }

    fn labels(&self, records: &[Record]) -> IndexSet<Label> {
        let mut labels: IndexSet<Label> = records
            .iter()
            .filter_map(|r| r.label(self.field))
            .filter(|l| self.filter.accepts(l))
            .collect();
        if self.order == AxisOrder::Ascending {
            labels.sort();
        }
        labels
    }
}

/// Row-major matrix of averages
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CrossTab {
    /// Row labels (heatmap y axis)
    pub rows: Vec<Label>,
    /// Column labels (heatmap x axis)
    pub cols: Vec<Label>,
    /// `cells[r][c]`, 0 where no record matches both labels
    pub cells: Vec<Vec<f64>>,
}

impl CrossTab {
    /// Whether the heatmap should be drawn
    ///
    /// Requires a row, a column, and one strictly positive cell.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.rows.is_empty()
            && !self.cols.is_empty()
            && self.cells.iter().flatten().any(|v| *v > 0.0)
    }

    /// Cell at row/column labels
    #[must_use]
    pub fn cell(&self, row: &Label, col: &Label) -> Option<f64> {
        let r = self.rows.iter().position(|l| l == row)?;
        let c = self.cols.iter().position(|l| l == col)?;
        Some(self.cells[r][c])
    }
}

/// Mean of `value_field` for every (row, column) label pair
#[must_use]
pub fn cross_tab_average(
    records: &[Record],
    rows: &Axis,
    cols: &Axis,
    value_field: Measure,
) -> CrossTab {
    let row_labels = rows.labels(records);
    let col_labels = cols.labels(records);

    let mut sums = vec![vec![0.0_f64; col_labels.len()]; row_labels.len()];
    let mut hits = vec![vec![0_u32; col_labels.len()]; row_labels.len()];

    for record in records {
        let (Some(row), Some(col)) = (record.label(rows.field), record.label(cols.field)) else {
            continue;
        };
        if let (Some(r), Some(c)) = (row_labels.get_index_of(&row), col_labels.get_index_of(&col)) {
            sums[r][c] += record.measure(value_field);
            hits[r][c] += 1;
        }
    }

    let cells = sums
        .into_iter()
        .zip(hits)
        .map(|(row_sums, row_hits)| {
            row_sums
                .into_iter()
                .zip(row_hits)
                .map(|(sum, n)| if n == 0 { 0.0 } else { sum / f64::from(n) })
                .collect()
        })
        .collect();

    CrossTab {
        rows: row_labels.into_iter().collect(),
        cols: col_labels.into_iter().collect(),
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rec(region: &str, year: Option<i32>, intensity: f64) -> Record {
        Record {
            region: region.into(),
            end_year: year,
            intensity,
            ..Record::default()
        }
    }

    fn heatmap_axes() -> (Axis, Axis) {
        (
            Axis::new(RecordField::Region),
            Axis::new(RecordField::EndYear)
                .with_filter(AxisFilter::YearRange { min: 2000, max: 2100 })
                .ascending(),
        )
    }

    #[test]
    fn averages_matching_records() {
        let records = vec![
            rec("Asia", Some(2030), 4.0),
            rec("Asia", Some(2030), 8.0),
            rec("Europe", Some(2025), 3.0),
        ];
        let (rows, cols) = heatmap_axes();
        let tab = cross_tab_average(&records, &rows, &cols, Measure::Intensity);

        assert_eq!(tab.rows, vec![Label::text("Asia"), Label::text("Europe")]);
        assert_eq!(tab.cols, vec![Label::Year(2025), Label::Year(2030)]);
        assert_eq!(tab.cells, vec![vec![0.0, 6.0], vec![3.0, 0.0]]);
        assert!(tab.is_valid());
    }

    #[test]
    fn missing_pair_is_zero_not_omitted() {
        let records = vec![rec("Asia", Some(2030), 4.0), rec("Europe", Some(2040), 2.0)];
        let (rows, cols) = heatmap_axes();
        let tab = cross_tab_average(&records, &rows, &cols, Measure::Intensity);

        assert_eq!(tab.cell(&Label::text("Asia"), &Label::Year(2040)), Some(0.0));
        assert_eq!(tab.cell(&Label::text("Europe"), &Label::Year(2030)), Some(0.0));
        assert_eq!(tab.cells.len(), 2);
        assert!(tab.cells.iter().all(|row| row.len() == 2));
    }

    #[test]
    fn year_filter_drops_out_of_range_and_empty() {
        let records = vec![
            rec("Asia", Some(1999), 5.0),
            rec("Asia", Some(2101), 5.0),
            rec("Asia", None, 5.0),
            rec("", Some(2050), 5.0),
            rec("Asia", Some(2100), 1.0),
        ];
        let (rows, cols) = heatmap_axes();
        let tab = cross_tab_average(&records, &rows, &cols, Measure::Intensity);

        assert_eq!(tab.rows, vec![Label::text("Asia")]);
        assert_eq!(tab.cols, vec![Label::Year(2050), Label::Year(2100)]);
        assert_eq!(tab.cells, vec![vec![0.0, 1.0]]);
    }

    #[test]
    fn all_zero_cells_are_invalid() {
        let records = vec![rec("Asia", Some(2030), 0.0)];
        let (rows, cols) = heatmap_axes();
        let tab = cross_tab_average(&records, &rows, &cols, Measure::Intensity);

        assert_eq!(tab.cells, vec![vec![0.0]]);
        assert!(!tab.is_valid());
    }

    #[test]
    fn empty_input_is_invalid() {
        let (rows, cols) = heatmap_axes();
        let tab = cross_tab_average(&[], &rows, &cols, Measure::Intensity);

        assert!(tab.rows.is_empty());
        assert!(tab.cols.is_empty());
        assert!(tab.cells.is_empty());
        assert!(!tab.is_valid());
    }

    #[test]
    fn year_filter_rejects_text() {
        let filter = AxisFilter::YearRange { min: 0, max: 3000 };
        assert!(!filter.accepts(&Label::text("2020")));
        assert!(filter.accepts(&Label::Year(2020)));
        assert!(AxisFilter::Any.accepts(&Label::text("x")));
    }
}
