//! Research record data model
//!
//! The records feeding the dashboard come from an external query service and
//! are decoded leniently at this boundary:
//! - missing or `null` text becomes `""`
//! - missing or non-numeric measures become `0`
//! - `end_year` is an integer or empty
//!
//! # Example
//!
//! ```rust
//! use dash_records::{Label, RecordField, RecordsResponse};
//!
//! let body = r#"{"count": 1, "results": [{"end_year": 2020, "topic": "oil"}]}"#;
//! let records = RecordsResponse::parse(body).unwrap().into_records();
//!
//! assert_eq!(records[0].label(RecordField::EndYear), Some(Label::Year(2020)));
//! assert_eq!(records[0].intensity, 0.0);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod field;
pub mod record;
pub mod response;
mod wire;

pub use error::DecodeError;
pub use field::{Label, Measure, RecordField};
pub use record::Record;
pub use response::{RecordPage, RecordsResponse};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
