//! Debounced fetch coordination
//!
//! The coordinator turns filter selections into queries, runs them against a
//! [`RecordSource`] and publishes whole-value [`FetchSnapshot`]s over a
//! `tokio::sync::watch` channel. Each request gets a generation number; only
//! the latest generation may publish, and nothing publishes after shutdown.

use crate::debounce::{Debouncer, DEFAULT_WINDOW};
use crate::error::FetchError;
use crate::source::RecordSource;
use dash_filters::{FilterQuery, FilterSelection};
use dash_records::Record;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Load state of the Record Store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadPhase {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A fetch is in flight
    Loading,
    /// Last fetch succeeded
    Ready,
    /// Last fetch failed; records are from an earlier success
    Failed,
}

impl LoadPhase {
    /// Whether the latest request has finished
    #[inline]
    #[must_use]
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Ready | Self::Failed)
    }
}

/// Published coordinator state
#[derive(Debug, Clone, Default)]
pub struct FetchSnapshot {
    /// Load phase
    pub phase: LoadPhase,
    /// Record Store for the last successful query
    pub records: Arc<Vec<Record>>,
    /// User-facing error from the last failed fetch
    pub error: Option<&'static str>,
    /// Query of the latest request
    pub query: Option<FilterQuery>,
    /// Request that produced this snapshot
    pub generation: u64,
}

struct Shared {
    source: Arc<dyn RecordSource>,
    state: watch::Sender<FetchSnapshot>,
    latest: AtomicU64,
    closed: AtomicBool,
}

impl Shared {
    fn next_generation(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Apply `update` only if `generation` is still current
    ///
    /// Returns the snapshot as published, before any later generation can
    /// replace it.
    fn publish(
        &self,
        generation: u64,
        update: impl FnOnce(&mut FetchSnapshot),
    ) -> Option<FetchSnapshot> {
        let mut published = None;
        self.state.send_if_modified(|snapshot| {
            if self.closed.load(Ordering::Acquire) || self.latest.load(Ordering::Acquire) != generation {
                return false;
            }
            update(snapshot);
            snapshot.generation = generation;
            published = Some(snapshot.clone());
            true
        });
        published
    }

    async fn run(&self, generation: u64, query: FilterQuery) -> Result<FetchSnapshot, FetchError> {
        let pending = query.clone();
        self.publish(generation, |s| {
            s.phase = LoadPhase::Loading;
            s.query = Some(pending);
            s.error = None;
        });

        match self.source.fetch(&query).await {
            Ok(records) => {
                let count = records.len();
                let published = self.publish(generation, |s| {
                    s.phase = LoadPhase::Ready;
                    s.records = Arc::new(records);
                    s.error = None;
                });
                if let Some(snapshot) = published {
                    info!(%query, count, generation, "record store replaced");
                    Ok(snapshot)
                } else {
                    debug!(%query, generation, "discarding superseded result");
                    Err(FetchError::Cancelled)
                }
            }
            Err(err) => {
                warn!(%query, generation, error = %err, "fetch failed");
                self.publish(generation, |s| {
                    s.phase = LoadPhase::Failed;
                    s.error = Some(err.user_message());
                });
                Err(err)
            }
        }
    }
}

/// Debounced bridge between filter selections and the Record Store
pub struct FetchCoordinator {
    shared: Arc<Shared>,
    debouncer: Debouncer,
}

impl std::fmt::Debug for FetchCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchCoordinator")
            .field("window", &self.debouncer.window())
            .field("generation", &self.shared.latest.load(Ordering::Relaxed))
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

impl FetchCoordinator {
    /// Coordinator with the default 500 ms window
    #[must_use]
    pub fn new(source: Arc<dyn RecordSource>) -> Self {
        Self::with_window(source, DEFAULT_WINDOW)
    }

    /// Coordinator with a custom debounce window
    #[must_use]
    pub fn with_window(source: Arc<dyn RecordSource>, window: Duration) -> Self {
        let (state, _) = watch::channel(FetchSnapshot::default());
        Self {
            shared: Arc::new(Shared {
                source,
                state,
                latest: AtomicU64::new(0),
                closed: AtomicBool::new(false),
            }),
            debouncer: Debouncer::new(window),
        }
    }

    /// Schedule a fetch for `selection` after the quiet window
    ///
    /// Supersedes any pending or in-flight request.
    pub fn request(&self, selection: &FilterSelection) {
        if self.is_closed() {
            debug!("ignoring request after shutdown");
            return;
        }
        let query = selection.to_query();
        let generation = self.shared.next_generation();
        debug!(%query, generation, window_ms = self.debouncer.window().as_millis(), "fetch scheduled");

        let shared = Arc::clone(&self.shared);
        self.debouncer.schedule(async move {
            // failures are already published and logged
            let _ = shared.run(generation, query).await;
        });
    }

    /// Start a fetch for `selection` immediately
    pub fn fetch_now(&self, selection: &FilterSelection) {
        if self.is_closed() {
            debug!("ignoring fetch after shutdown");
            return;
        }
        let query = selection.to_query();
        let generation = self.shared.next_generation();
        debug!(%query, generation, "fetch triggered");

        let shared = Arc::clone(&self.shared);
        self.debouncer.trigger(async move {
            let _ = shared.run(generation, query).await;
        });
    }

    /// Fetch `selection` and wait for the outcome
    ///
    /// # Errors
    /// The source's `FetchError`, or `FetchError::Cancelled` if a newer
    /// request or shutdown superseded this one
    pub async fn load(&self, selection: &FilterSelection) -> Result<FetchSnapshot, FetchError> {
        if self.is_closed() {
            return Err(FetchError::Cancelled);
        }
        self.debouncer.cancel();
        let generation = self.shared.next_generation();
        self.shared.run(generation, selection.to_query()).await
    }

    /// Current snapshot
    #[must_use]
    pub fn snapshot(&self) -> FetchSnapshot {
        self.shared.state.borrow().clone()
    }

    /// Receiver notified on every published change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FetchSnapshot> {
        self.shared.state.subscribe()
    }

    /// Whether a request is waiting out the window or running
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Whether `shutdown` has run
    #[inline]
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.shared.closed.load(Ordering::Acquire)
    }

    /// Cancel pending and in-flight work; no state changes afterwards
    pub fn shutdown(&self) {
        if !self.shared.closed.swap(true, Ordering::AcqRel) {
            info!("fetch coordinator shut down");
        }
        self.debouncer.cancel();
    }
}

impl Drop for FetchCoordinator {
    fn drop(&mut self) {
        self.shutdown();
    }
}
