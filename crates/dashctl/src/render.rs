//! Plain-text rendering of panels and dropdown options

use dash_aggregate::{Aggregation, ChartPanel};
use dash_core::DashboardView;
use dash_filters::FilterOptions;
use std::fmt::Write;

/// Placeholder for a panel with nothing to draw
pub const NO_DATA: &str = "No Data Available";

/// One line per panel
#[must_use]
pub fn panels(panels: &[ChartPanel]) -> String {
    let mut out = String::new();
    for panel in panels {
        let _ = writeln!(out, "{}: {}", panel.title, describe(panel));
    }
    out
}

fn describe(panel: &ChartPanel) -> String {
    if !panel.has_data() {
        return NO_DATA.to_string();
    }
    match &panel.aggregation {
        Aggregation::Series(series) => {
            let top = series
                .iter()
                .max_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(label, value)| format!(", peak {label} = {value:.2}"))
                .unwrap_or_default();
            format!("{} points, total {:.2}{top}", series.len(), series.total())
        }
        Aggregation::Distribution(dist) => {
            let slices: Vec<String> = dist
                .slices
                .iter()
                .map(|s| format!("{} ({})", s.label, s.count))
                .collect();
            format!("{} records: {}", dist.total, slices.join(", "))
        }
        Aggregation::CrossTab(tab) => {
            format!("{} regions x {} years", tab.rows.len(), tab.cols.len())
        }
        Aggregation::Flow(graph) => {
            format!("{} nodes, {} links", graph.nodes.len(), graph.edges.len())
        }
    }
}

/// Status header followed by every panel
#[must_use]
pub fn view(view: &DashboardView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "status: {:?}, {} records", view.phase, view.record_count);
    if let Some(error) = view.error {
        let _ = writeln!(out, "error: {error}");
    }
    let active: Vec<String> = view
        .selection
        .active()
        .map(|(field, value)| format!("{}={value}", field.display_name()))
        .collect();
    if !active.is_empty() {
        let _ = writeln!(out, "filters: {}", active.join(", "));
    }
    out.push_str(&panels(&view.panels));
    out
}

/// One line per dropdown
#[must_use]
pub fn options(options: &FilterOptions) -> String {
    let mut out = String::new();
    for field in options.iter() {
        let values: Vec<&str> = field.values.iter().map(|v| v.as_str()).collect();
        let _ = writeln!(out, "{}: {}", field.label, values.join(", "));
    }
    out
}
