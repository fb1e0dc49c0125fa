//! Subcommand implementations
//!
//! Each returns the text to print so the binary stays a thin shell.

use crate::render;
use anyhow::Context;
use dash_aggregate::{build_panels, ChartPanel};
use dash_core::{Dashboard, DashboardConfig, DashboardEvent};
use dash_filters::{FilterOptions, FilterSelection};
use dash_records::{Record, RecordsResponse};
use std::path::{Path, PathBuf};
use tracing::info;

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<DashboardConfig> {
    match path {
        Some(path) => DashboardConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => Ok(DashboardConfig::default()),
    }
}

fn load_records(path: &Path) -> anyhow::Result<Vec<Record>> {
    let records = RecordsResponse::read_file(path)
        .with_context(|| format!("reading records from {}", path.display()))?
        .into_records();
    info!(path = %path.display(), count = records.len(), "dataset loaded");
    Ok(records)
}

/// Aggregate a local dataset after applying `selection`
///
/// # Errors
/// Unreadable dataset or configuration
pub fn summarize(
    data: &Path,
    config: Option<&PathBuf>,
    selection: &FilterSelection,
    json: bool,
) -> anyhow::Result<String> {
    let config = load_config(config)?;
    let records = load_records(data)?;
    let query = selection.to_query();
    let matching: Vec<Record> = query.filter(&records).cloned().collect();
    info!(%query, matching = matching.len(), "dataset filtered");

    let panels: Vec<ChartPanel> = build_panels(&matching, &config.chart_settings(), config.theme);
    if json {
        Ok(serde_json::to_string_pretty(&panels)?)
    } else {
        Ok(format!(
            "{} of {} records\n{}",
            matching.len(),
            records.len(),
            render::panels(&panels)
        ))
    }
}

/// Dropdown choices for a local dataset
///
/// # Errors
/// Unreadable dataset
pub fn options(data: &Path, json: bool) -> anyhow::Result<String> {
    let options = FilterOptions::from_records(&load_records(data)?);
    if json {
        Ok(serde_json::to_string_pretty(&options)?)
    } else {
        Ok(render::options(&options))
    }
}

/// Query the record service through a dashboard and render its view
///
/// # Errors
/// Invalid configuration or a failed fetch
pub async fn fetch(
    config: Option<&PathBuf>,
    base_url: Option<&str>,
    selection: &FilterSelection,
    json: bool,
) -> anyhow::Result<String> {
    let mut config = load_config(config)?;
    if let Some(url) = base_url {
        config = config.with_api_base_url(url);
    }

    let mut dashboard = Dashboard::connect(config)?;
    for (field, value) in selection.active() {
        dashboard.apply(DashboardEvent::set_filter(field.selection_name(), value))?;
    }
    let result = dashboard.refresh_now().await;
    dashboard.shutdown();
    let view = result.context("fetching records")?;

    if json {
        Ok(serde_json::to_string_pretty(&view)?)
    } else {
        Ok(render::view(&view))
    }
}
