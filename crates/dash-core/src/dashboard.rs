//! The dashboard coordinator
//!
//! [`Dashboard`] owns the filter selection, the theme and the fetch
//! coordinator. All state changes go through [`Dashboard::apply`]; all
//! rendering input comes from [`Dashboard::view`].

use crate::config::DashboardConfig;
use crate::error::Result;
use dash_aggregate::{build_panels, ChartPanel, ChartSettings, Theme};
use dash_fetch::{FetchCoordinator, FetchSnapshot, LoadPhase, RecordSource};
use dash_filters::{FilterOptions, FilterSelection};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info};

/// A user action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardEvent {
    /// Dropdown change; `value` of `"All"` clears the field
    SetFilter {
        /// Selection or query name of the field
        name: String,
        /// New value
        value: String,
    },
    /// Reset every dropdown to "All"
    ResetFilters,
    /// Switch between light and dark
    ToggleTheme,
    /// Fetch the current selection again, immediately
    Refresh,
}

impl DashboardEvent {
    /// Create filter change event
    #[inline]
    pub fn set_filter(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::SetFilter {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// Load phase of the Record Store
    pub phase: LoadPhase,
    /// Banner text when the last fetch failed
    pub error: Option<&'static str>,
    /// Active theme
    pub theme: Theme,
    /// Current dropdown state
    pub selection: FilterSelection,
    /// Dropdown choices derived from the current records
    pub options: FilterOptions,
    /// Records behind the panels
    pub record_count: usize,
    /// The six chart panels
    pub panels: Vec<ChartPanel>,
}

impl DashboardView {
    /// Build a view from a fetch snapshot
    #[must_use]
    pub fn from_snapshot(
        snapshot: &FetchSnapshot,
        selection: &FilterSelection,
        settings: &ChartSettings,
        theme: Theme,
    ) -> Self {
        Self {
            phase: snapshot.phase,
            error: snapshot.error,
            theme,
            selection: selection.clone(),
            options: FilterOptions::from_records(&snapshot.records),
            record_count: snapshot.records.len(),
            panels: build_panels(&snapshot.records, settings, theme),
        }
    }

    /// Whether the loading indicator should show
    #[inline]
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }
}

/// Dashboard state and its fetch pipeline
#[derive(Debug)]
pub struct Dashboard {
    config: DashboardConfig,
    selection: FilterSelection,
    theme: Theme,
    coordinator: FetchCoordinator,
}

impl Dashboard {
    /// Dashboard over an arbitrary record source
    ///
    /// # Errors
    /// `DashError::Config` if `config` fails validation
    pub fn new(config: DashboardConfig, source: Arc<dyn RecordSource>) -> Result<Self> {
        config.validate()?;
        let coordinator = FetchCoordinator::with_window(source, config.debounce());
        info!(
            endpoint = %config.api_base_url,
            debounce_ms = config.debounce_ms,
            "dashboard created"
        );
        Ok(Self {
            theme: config.theme,
            config,
            selection: FilterSelection::default(),
            coordinator,
        })
    }

    /// Dashboard over the configured HTTP endpoint
    ///
    /// # Errors
    /// `DashError::Config` if `config` fails validation
    pub fn connect(config: DashboardConfig) -> Result<Self> {
        config.validate()?;
        let source = Arc::new(config.http_source());
        Self::new(config, source)
    }

    /// Issue the initial, unfiltered load
    pub fn start(&self) {
        self.coordinator.fetch_now(&self.selection);
    }

    /// Apply one user action
    ///
    /// Filter changes schedule a debounced fetch; a refresh fetches at once.
    ///
    /// # Errors
    /// `DashError::InvalidField` for an unknown field name; state is left
    /// unchanged
    pub fn apply(&mut self, event: DashboardEvent) -> Result<()> {
        debug!(?event, "applying event");
        match event {
            DashboardEvent::SetFilter { name, value } => {
                let next = self
                    .selection
                    .set_field(&name, &value)
                    .inspect_err(|_| error!(field = %name, "rejected filter change for unknown field"))?;
                self.replace_selection(next);
            }
            DashboardEvent::ResetFilters => {
                let next = self.selection.reset();
                self.replace_selection(next);
            }
            DashboardEvent::ToggleTheme => {
                self.theme = self.theme.toggled();
                info!(theme = ?self.theme, "theme toggled");
            }
            DashboardEvent::Refresh => {
                self.coordinator.fetch_now(&self.selection);
            }
        }
        Ok(())
    }

    fn replace_selection(&mut self, next: FilterSelection) {
        if next == self.selection {
            debug!("selection unchanged");
            return;
        }
        self.selection = next;
        self.coordinator.request(&self.selection);
    }

    /// Fetch the current selection and wait for it
    ///
    /// # Errors
    /// `DashError::Fetch` when the source fails or the load is superseded
    pub async fn refresh_now(&self) -> Result<DashboardView> {
        let snapshot = self.coordinator.load(&self.selection).await?;
        Ok(self.view_of(&snapshot))
    }

    /// Current view
    #[must_use]
    pub fn view(&self) -> DashboardView {
        self.view_of(&self.coordinator.snapshot())
    }

    fn view_of(&self, snapshot: &FetchSnapshot) -> DashboardView {
        DashboardView::from_snapshot(
            snapshot,
            &self.selection,
            &self.config.chart_settings(),
            self.theme,
        )
    }

    /// Current dropdown state
    #[inline]
    #[must_use]
    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    /// Active theme
    #[inline]
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// The fetch coordinator, for subscribing to snapshots
    #[inline]
    #[must_use]
    pub fn coordinator(&self) -> &FetchCoordinator {
        &self.coordinator
    }

    /// Stop all scheduled and in-flight fetching
    pub fn shutdown(&self) {
        self.coordinator.shutdown();
    }
}
