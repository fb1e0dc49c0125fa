//! End-to-end event flow over a scripted record source

use dash_aggregate::{ChartKind, Theme};
use dash_core::{Dashboard, DashboardConfig, DashboardEvent};
use dash_fetch::LoadPhase;
use dash_filters::{FilterQuery, FilterSelection, FilterValue};
use dash_records::RecordField;
use dash_test_utils::{record, sample_records, RecordingSource};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

fn setup(source: RecordingSource) -> (Dashboard, Arc<RecordingSource>) {
    let source = Arc::new(source);
    let dashboard = Dashboard::new(DashboardConfig::default(), source.clone()).unwrap();
    (dashboard, source)
}

#[tokio::test(start_paused = true)]
async fn initial_load_fills_every_panel() {
    let (dash, source) = setup(RecordingSource::new(sample_records()));
    assert_eq!(dash.view().phase, LoadPhase::Idle);

    dash.start();
    sleep(Duration::from_millis(10)).await;

    assert_eq!(source.queries(), vec![FilterQuery::new()]);
    let view = dash.view();
    assert_eq!(view.phase, LoadPhase::Ready);
    assert_eq!(view.record_count, 4);
    assert_eq!(view.panels.len(), 6);
    assert!(view.panels.iter().all(|p| p.has_data()));

    let years = view.options.get(RecordField::EndYear).unwrap();
    assert_eq!(
        years.values,
        vec![
            FilterValue::All,
            FilterValue::Exact("2025".into()),
            FilterValue::Exact("2030".into()),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn rapid_filter_changes_fetch_once_with_final_selection() {
    let (mut dash, source) = setup(RecordingSource::new(sample_records()));

    dash.apply(DashboardEvent::set_filter("region", "Northern America")).unwrap();
    sleep(Duration::from_millis(150)).await;
    dash.apply(DashboardEvent::set_filter("endYear", "2025")).unwrap();
    sleep(Duration::from_millis(150)).await;
    dash.apply(DashboardEvent::set_filter("endYear", "2030")).unwrap();
    assert_eq!(source.calls(), 0);

    sleep(Duration::from_millis(600)).await;

    let expected = FilterSelection::default()
        .with(RecordField::Region, "Northern America")
        .with(RecordField::EndYear, "2030")
        .to_query();
    assert_eq!(source.queries(), vec![expected]);

    let view = dash.view();
    assert_eq!(view.record_count, 2);
    assert_eq!(view.selection, *dash.selection());
}

#[tokio::test(start_paused = true)]
async fn failed_fetch_keeps_stale_panels_with_banner() {
    let source = RecordingSource::new(Vec::new())
        .then_records(vec![
            record(Some(2030), "oil", "Energy", "Asia", 5.0),
            record(Some(2031), "gas", "Energy", "Asia", 3.0),
        ])
        .then_status(502);
    let (mut dash, source) = setup(source);

    dash.start();
    sleep(Duration::from_millis(10)).await;
    let before = dash.view();

    dash.apply(DashboardEvent::set_filter("topic", "oil")).unwrap();
    sleep(Duration::from_secs(1)).await;

    let after = dash.view();
    assert_eq!(source.calls(), 2);
    assert_eq!(after.phase, LoadPhase::Failed);
    assert_eq!(after.error, Some("Failed to load filtered data. Please try again."));
    assert_eq!(after.record_count, 2);
    assert_eq!(after.panels, before.panels);
}

#[tokio::test(start_paused = true)]
async fn shutdown_inside_window_issues_no_fetch() {
    let (mut dash, source) = setup(RecordingSource::new(sample_records()));

    dash.apply(DashboardEvent::set_filter("sector", "Energy")).unwrap();
    sleep(Duration::from_millis(300)).await;
    dash.shutdown();
    dash.apply(DashboardEvent::Refresh).unwrap();

    sleep(Duration::from_secs(2)).await;
    assert_eq!(source.calls(), 0);
    assert_eq!(dash.view().phase, LoadPhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn reset_fetches_unfiltered_data() {
    let (mut dash, source) = setup(RecordingSource::new(sample_records()));

    dash.apply(DashboardEvent::set_filter("pestle", "Economic")).unwrap();
    sleep(Duration::from_millis(600)).await;
    assert_eq!(dash.view().record_count, 2);

    dash.apply(DashboardEvent::ResetFilters).unwrap();
    sleep(Duration::from_millis(600)).await;

    assert_eq!(source.calls(), 2);
    assert_eq!(source.queries()[1], FilterQuery::new());
    assert_eq!(dash.view().record_count, 4);
    assert!(dash.selection().is_unfiltered());
}

#[tokio::test(start_paused = true)]
async fn theme_only_restyles_panels() {
    let (mut dash, source) = setup(RecordingSource::new(sample_records()));
    dash.start();
    sleep(Duration::from_millis(10)).await;
    let light = dash.view();

    dash.apply(DashboardEvent::ToggleTheme).unwrap();
    let dark = dash.view();

    assert_eq!(source.calls(), 1);
    assert_eq!(dark.theme, Theme::Dark);
    for (l, d) in light.panels.iter().zip(&dark.panels) {
        assert_eq!(l.aggregation, d.aggregation);
        assert_eq!(d.theme, Theme::Dark);
    }
    assert_eq!(dark.panels[3].kind, ChartKind::TopicDistribution);
}

#[tokio::test]
async fn refresh_now_returns_the_loaded_view() {
    let (dash, _) = setup(RecordingSource::new(sample_records()));
    let view = dash.refresh_now().await.unwrap();
    assert_eq!(view.phase, LoadPhase::Ready);
    assert_eq!(view.record_count, 4);
}
