//! Chart kinds and panel assembly
//!
//! Panels are selected by [`ChartKind`], never by their display title.

use crate::crosstab::{cross_tab_average, Axis, AxisFilter, CrossTab};
use crate::distribution::{categorical_distribution, Distribution, DEFAULT_THRESHOLD};
use crate::flow::{flow_graph, FlowGraph};
use crate::series::{grouped_sum, time_series, SeriesData};
use crate::theme::Theme;
use dash_records::{Measure, Record, RecordField};
use serde::{Deserialize, Serialize};

/// How a renderer draws an aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderKind {
    /// Line chart
    Line,
    /// Bar chart
    Bar,
    /// Pie chart
    Pie,
    /// Heatmap
    Heatmap,
    /// Sankey diagram
    Sankey,
}

/// The dashboard's chart panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Summed intensity per end year
    IntensityOverYears,
    /// Summed likelihood per region
    LikelihoodByRegion,
    /// Summed relevance per country
    RelevanceByCountry,
    /// Record count per topic
    TopicDistribution,
    /// Mean intensity per region and year
    IntensityHeatmap,
    /// Topic → sector → region co-occurrence
    TopicSectorRegionFlow,
}

impl ChartKind {
    /// All panels in dashboard order
    pub const ALL: [ChartKind; 6] = [
        ChartKind::IntensityOverYears,
        ChartKind::LikelihoodByRegion,
        ChartKind::RelevanceByCountry,
        ChartKind::TopicDistribution,
        ChartKind::IntensityHeatmap,
        ChartKind::TopicSectorRegionFlow,
    ];

    /// Display title
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::IntensityOverYears => "Intensity Over Years",
            Self::LikelihoodByRegion => "Likelihood by Region",
            Self::RelevanceByCountry => "Relevance by Country",
            Self::TopicDistribution => "Topic Distribution",
            Self::IntensityHeatmap => "Intensity Heatmap (Regions vs Years)",
            Self::TopicSectorRegionFlow => "Topic-Sector-Region Flow",
        }
    }

    /// Renderer used for this panel
    #[must_use]
    pub const fn render_kind(self) -> RenderKind {
        match self {
            Self::IntensityOverYears => RenderKind::Line,
            Self::LikelihoodByRegion | Self::RelevanceByCountry => RenderKind::Bar,
            Self::TopicDistribution => RenderKind::Pie,
            Self::IntensityHeatmap => RenderKind::Heatmap,
            Self::TopicSectorRegionFlow => RenderKind::Sankey,
        }
    }

    /// Compute this panel's aggregation
    #[must_use]
    pub fn aggregate(self, records: &[Record], settings: &ChartSettings) -> Aggregation {
        match self {
            Self::IntensityOverYears => Aggregation::Series(time_series(
                records,
                RecordField::EndYear,
                Measure::Intensity,
            )),
            Self::LikelihoodByRegion => Aggregation::Series(grouped_sum(
                records,
                RecordField::Region,
                Measure::Likelihood,
            )),
            Self::RelevanceByCountry => Aggregation::Series(grouped_sum(
                records,
                RecordField::Country,
                Measure::Relevance,
            )),
            Self::TopicDistribution => Aggregation::Distribution(categorical_distribution(
                records,
                RecordField::Topic,
                settings.distribution_threshold,
            )),
            Self::IntensityHeatmap => {
                let rows = Axis::new(RecordField::Region);
                let cols = Axis::new(RecordField::EndYear)
                    .with_filter(AxisFilter::YearRange {
                        min: settings.heatmap_min_year,
                        max: settings.heatmap_max_year,
                    })
                    .ascending();
                Aggregation::CrossTab(cross_tab_average(records, &rows, &cols, Measure::Intensity))
            }
            Self::TopicSectorRegionFlow => Aggregation::Flow(flow_graph(
                records,
                RecordField::Topic,
                RecordField::Sector,
                RecordField::Region,
            )),
        }
    }
}

/// Tunables shared by the panel aggregations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartSettings {
    /// Share of records below which a topic folds into "Other"
    pub distribution_threshold: f64,
    /// First year on the heatmap
    pub heatmap_min_year: i32,
    /// Last year on the heatmap
    pub heatmap_max_year: i32,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            distribution_threshold: DEFAULT_THRESHOLD,
            heatmap_min_year: 2000,
            heatmap_max_year: 2100,
        }
    }
}

/// Chart-ready result of one panel
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Aggregation {
    /// Labels and values (line, bar)
    Series(SeriesData),
    /// Pie slices
    Distribution(Distribution),
    /// Heatmap matrix
    CrossTab(CrossTab),
    /// Sankey nodes and edges
    Flow(FlowGraph),
}

impl Aggregation {
    /// Whether the renderer should draw a chart rather than a placeholder
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self {
            Self::Series(s) => s.is_valid(),
            Self::Distribution(d) => d.is_valid(),
            Self::CrossTab(t) => t.is_valid(),
            Self::Flow(f) => f.is_valid(),
        }
    }

    /// Series data, if this is a series
    #[must_use]
    pub fn as_series(&self) -> Option<&SeriesData> {
        match self {
            Self::Series(s) => Some(s),
            _ => None,
        }
    }

    /// Distribution, if this is a distribution
    #[must_use]
    pub fn as_distribution(&self) -> Option<&Distribution> {
        match self {
            Self::Distribution(d) => Some(d),
            _ => None,
        }
    }

    /// Cross-tab, if this is a cross-tab
    #[must_use]
    pub fn as_cross_tab(&self) -> Option<&CrossTab> {
        match self {
            Self::CrossTab(t) => Some(t),
            _ => None,
        }
    }

    /// Flow graph, if this is a flow
    #[must_use]
    pub fn as_flow(&self) -> Option<&FlowGraph> {
        match self {
            Self::Flow(f) => Some(f),
            _ => None,
        }
    }
}

/// Everything a renderer needs to draw one panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPanel {
    /// Panel identity
    pub kind: ChartKind,
    /// Display title
    pub title: &'static str,
    /// Renderer to use
    pub render: RenderKind,
    /// Colors/fonts only
    pub theme: Theme,
    /// Data to draw
    pub aggregation: Aggregation,
}

impl ChartPanel {
    /// Aggregate `records` for `kind`
    #[must_use]
    pub fn build(kind: ChartKind, records: &[Record], settings: &ChartSettings, theme: Theme) -> Self {
        Self {
            kind,
            title: kind.title(),
            render: kind.render_kind(),
            theme,
            aggregation: kind.aggregate(records, settings),
        }
    }

    /// Whether to draw a chart (otherwise "No Data Available")
    #[inline]
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.aggregation.is_valid()
    }
}

/// Build every dashboard panel from one record snapshot
#[must_use]
pub fn build_panels(records: &[Record], settings: &ChartSettings, theme: Theme) -> Vec<ChartPanel> {
    ChartKind::ALL
        .iter()
        .map(|kind| ChartPanel::build(*kind, records, settings, theme))
        .collect()
}
