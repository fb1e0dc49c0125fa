//! Filter Controller
//!
//! - [`FilterSelection`]: seven independent fields, each "All" or one value
//! - [`FilterQuery`]: the sparse query sent to the record service
//! - [`FilterOptions`]: dropdown choices derived from a record snapshot
//!
//! Selections are immutable; every change produces a new value.
//!
//! # Example
//!
//! ```rust
//! use dash_filters::FilterSelection;
//! use dash_records::RecordField;
//!
//! let selection = FilterSelection::default()
//!     .set_field("topic", "oil")
//!     .unwrap()
//!     .set_field("endYear", "2030")
//!     .unwrap();
//!
//! let query = selection.to_query();
//! assert_eq!(query.get(RecordField::EndYear), Some("2030"));
//! assert_eq!(query.to_string(), "end_year=2030&topic=oil");
//! assert!(selection.set_field("colour", "red").is_err());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod options;
pub mod query;
pub mod selection;

pub use error::InvalidFieldError;
pub use options::{FieldOptions, FilterOptions};
pub use query::FilterQuery;
pub use selection::{FilterSelection, FilterValue, ALL_SENTINEL};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
