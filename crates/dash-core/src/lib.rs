//! Dashboard Core
//!
//! Ties the pieces together:
//! - [`DashboardConfig`]: TOML-backed settings with validated defaults
//! - [`Dashboard`]: one update function over [`DashboardEvent`]s
//! - [`DashboardView`]: phase, error banner, dropdown options and six panels
//!
//! # Example
//!
//! ```rust,no_run
//! use dash_core::{Dashboard, DashboardConfig, DashboardEvent};
//!
//! # async fn example() -> dash_core::Result<()> {
//! let config = DashboardConfig::load("dashboard.toml")?;
//! let mut dashboard = Dashboard::connect(config)?;
//!
//! dashboard.start();
//! dashboard.apply(DashboardEvent::set_filter("region", "Northern America"))?;
//!
//! let view = dashboard.view();
//! println!("{} panels over {} records", view.panels.len(), view.record_count);
//! dashboard.shutdown();
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod dashboard;
pub mod error;

pub use config::{DashboardConfig, YearSpan};
pub use dashboard::{Dashboard, DashboardEvent, DashboardView};
pub use error::{DashError, Result};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving a dashboard
    pub use crate::{Dashboard, DashboardConfig, DashboardEvent, DashboardView};
    pub use dash_aggregate::{Aggregation, ChartKind, ChartPanel, Theme};
    pub use dash_fetch::LoadPhase;
    pub use dash_filters::FilterSelection;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
