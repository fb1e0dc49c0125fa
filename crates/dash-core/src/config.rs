//! Dashboard configuration

use crate::error::{DashError, Result};
use dash_aggregate::{ChartSettings, Theme, DEFAULT_THRESHOLD};
use dash_fetch::{HttpRecordSource, DEFAULT_ENDPOINT_PATH};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Inclusive year span shown on the heatmap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSpan {
    /// First year
    pub min: i32,
    /// Last year
    pub max: i32,
}

impl Default for YearSpan {
    fn default() -> Self {
        Self { min: 2000, max: 2100 }
    }
}

/// Dashboard configuration
///
/// Every key is optional in TOML; missing keys take their defaults.
///
/// ```toml
/// api_base_url = "http://localhost:8000"
/// debounce_ms = 250
/// theme = "dark"
///
/// [heatmap_years]
/// min = 2016
/// max = 2050
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Root of the query service
    pub api_base_url: String,
    /// Query endpoint path
    pub endpoint_path: String,
    /// Quiet window before a filter change is fetched
    pub debounce_ms: u64,
    /// Per-request timeout
    pub request_timeout_secs: u64,
    /// Follow `next` links in paged responses
    pub follow_pages: bool,
    /// Page limit when following links
    pub max_pages: usize,
    /// Share of records below which a topic folds into "Other"
    pub distribution_threshold: f64,
    /// Heatmap columns
    pub heatmap_years: YearSpan,
    /// Initial theme
    pub theme: Theme,
}

impl DashboardConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse TOML and validate
    ///
    /// # Errors
    /// `DashError::ConfigParse` for malformed TOML, `DashError::Config` for
    /// out-of-range values
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    /// `DashError::ConfigIo` if the file cannot be read, otherwise as
    /// [`Self::from_toml_str`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| DashError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// `DashError::Config` naming the first offending key
    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(DashError::config("api_base_url must not be empty"));
        }
        if self.endpoint_path.trim().is_empty() {
            return Err(DashError::config("endpoint_path must not be empty"));
        }
        if !(0.0..=1.0).contains(&self.distribution_threshold) {
            return Err(DashError::config(format!(
                "distribution_threshold must be within [0, 1], got {}",
                self.distribution_threshold
            )));
        }
        if self.heatmap_years.min > self.heatmap_years.max {
            return Err(DashError::config(format!(
                "heatmap_years.min ({}) exceeds heatmap_years.max ({})",
                self.heatmap_years.min, self.heatmap_years.max
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(DashError::config("request_timeout_secs must be positive"));
        }
        Ok(())
    }

    /// With service root
    #[inline]
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// With debounce window
    #[inline]
    #[must_use]
    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// With initial theme
    #[inline]
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// With page following up to `max_pages`
    #[inline]
    #[must_use]
    pub fn with_page_following(mut self, max_pages: usize) -> Self {
        self.follow_pages = true;
        self.max_pages = max_pages;
        self
    }

    /// Debounce window
    #[inline]
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Per-request timeout
    #[inline]
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Aggregation tunables
    #[must_use]
    pub fn chart_settings(&self) -> ChartSettings {
        ChartSettings {
            distribution_threshold: self.distribution_threshold,
            heatmap_min_year: self.heatmap_years.min,
            heatmap_max_year: self.heatmap_years.max,
        }
    }

    /// HTTP source for the configured endpoint
    #[must_use]
    pub fn http_source(&self) -> HttpRecordSource {
        let source = HttpRecordSource::new(&self.api_base_url)
            .with_path(&self.endpoint_path)
            .with_timeout(self.request_timeout());
        if self.follow_pages {
            source.with_page_following(self.max_pages)
        } else {
            source
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            endpoint_path: DEFAULT_ENDPOINT_PATH.to_string(),
            debounce_ms: 500,
            request_timeout_secs: 30,
            follow_pages: false,
            max_pages: 100,
            distribution_threshold: DEFAULT_THRESHOLD,
            heatmap_years: YearSpan::default(),
            theme: Theme::Light,
        }
    }
}
