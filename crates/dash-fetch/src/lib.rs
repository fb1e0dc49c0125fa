//! Fetch Coordinator
//!
//! Everything between a filter selection and the Record Store:
//! - [`RecordSource`]: the query service seam, with HTTP and in-memory
//!   implementations
//! - [`Debouncer`]: trailing-edge scheduling with cancellable handles
//! - [`FetchCoordinator`]: debounced fetching published as [`FetchSnapshot`]s
//!
//! # Example
//!
//! ```rust,no_run
//! use dash_fetch::{FetchCoordinator, HttpRecordSource, LoadPhase};
//! use dash_filters::FilterSelection;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), dash_fetch::FetchError> {
//! let source = Arc::new(HttpRecordSource::new("http://localhost:8000"));
//! let coordinator = FetchCoordinator::new(source);
//!
//! let selection = FilterSelection::default().set_field("region", "Asia").unwrap();
//! let snapshot = coordinator.load(&selection).await?;
//! assert_eq!(snapshot.phase, LoadPhase::Ready);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod coordinator;
pub mod debounce;
pub mod error;
pub mod source;

pub use coordinator::{FetchCoordinator, FetchSnapshot, LoadPhase};
pub use debounce::{DebounceHandle, Debouncer, DEFAULT_WINDOW};
pub use error::{FetchError, LOAD_FAILED_MESSAGE};
pub use source::{HttpRecordSource, MemoryRecordSource, RecordSource, DEFAULT_ENDPOINT_PATH};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
