//! Dashboard Aggregation Pipeline
//!
//! Pure functions mapping a record list to the shape each chart needs.
//!
//! # Core Concepts
//!
//! - [`time_series`] / [`grouped_sum`]: summed measure per label (line, bar)
//! - [`categorical_distribution`]: counts per category with small categories
//!   folded into "Other" (pie)
//! - [`cross_tab_average`]: mean measure per row/column pair (heatmap)
//! - [`flow_graph`]: three-tier co-occurrence graph (sankey)
//! - [`ChartKind`]: the six dashboard panels and their aggregation
//!
//! Every result carries an `is_valid()` verdict. Invalid results are not
//! errors: the renderer shows a placeholder instead of a chart.
//!
//! # Example
//!
//! ```rust
//! use dash_aggregate::time_series;
//! use dash_records::{Label, Measure, Record, RecordField};
//!
//! let records = vec![
//!     Record { end_year: Some(2020), intensity: 5.0, ..Record::default() },
//!     Record { end_year: Some(2020), intensity: 3.0, ..Record::default() },
//!     Record { end_year: Some(2021), intensity: 0.0, ..Record::default() },
//! ];
//!
//! let series = time_series(&records, RecordField::EndYear, Measure::Intensity);
//! assert_eq!(series.labels, vec![Label::Year(2020), Label::Year(2021)]);
//! assert_eq!(series.values, vec![8.0, 0.0]);
//! assert!(series.is_valid());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod chart;
mod crosstab;
mod distribution;
mod flow;
mod series;
mod theme;

pub use chart::{build_panels, Aggregation, ChartKind, ChartPanel, ChartSettings, RenderKind};
pub use crosstab::{cross_tab_average, Axis, AxisFilter, AxisOrder, CrossTab};
pub use distribution::{
    categorical_distribution, Distribution, Slice, DEFAULT_THRESHOLD, OTHER_LABEL,
};
pub use flow::{flow_graph, FlowEdge, FlowGraph};
pub use series::{grouped_sum, time_series, SeriesData};
pub use theme::Theme;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
