// src/loader.rs
//! Load orchestration: registry, then catalog, then ranking and layout.
//!
//! One `FeedLoader` owns the published state of a feed. Each load cycle
//! builds a fresh immutable `FeedSnapshot` and swaps it in whole, so a reader
//! holding the previous `Arc` never sees a half-updated card list. Fetch and
//! decode failures never escape a cycle: they are logged, recorded in the
//! snapshot's report, and the cycle still completes.

use crate::api::FeedRepository;
use crate::composing::compose_cards;
use crate::constants::HISTORY_WINDOW;
use crate::error::{classify_load_failure, AppError, LoadFailure};
use crate::history::{visited_domains, HistoryProvider};
use crate::model::{Card, SourceRegistry};
use crate::ranking::rank_items;
use crate::types::FeedResource;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

/// Source of "now" for recency scoring.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Where a loader is in its cycle. Failures collapse to `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    Idle,
    LoadingSources,
    LoadingCatalog,
    Ready,
}

/// The stage that ended a cycle early, and why.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageFailure {
    pub resource: FeedResource,
    pub failure: LoadFailure,
}

/// What happened during the cycle that produced a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadReport {
    /// Sequence number of the cycle, starting at 1. Zero before any load.
    pub cycle: u64,
    pub completed_at: Option<DateTime<Utc>>,
    pub items_decoded: usize,
    pub records_dropped: usize,
    pub visited_domains: usize,
    pub failure: Option<StageFailure>,
}

impl LoadReport {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Everything one load cycle publishes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeedSnapshot {
    pub cards: Vec<Card>,
    pub sources: SourceRegistry,
    pub report: LoadReport,
}

/// Result delivered once per load call.
pub type LoadOutcome = Result<Arc<FeedSnapshot>, AppError>;

/// Loads, ranks and composes one feed.
pub struct FeedLoader {
    repository: Arc<dyn FeedRepository>,
    history: Arc<dyn HistoryProvider>,
    history_window: usize,
    clock: Clock,
    state: RwLock<LoadState>,
    snapshot: RwLock<Arc<FeedSnapshot>>,
    in_flight: AtomicBool,
    cycles: AtomicU64,
}

impl FeedLoader {
    pub fn new(repository: Arc<dyn FeedRepository>, history: Arc<dyn HistoryProvider>) -> Self {
        Self {
            repository,
            history,
            history_window: HISTORY_WINDOW,
            clock: Arc::new(Utc::now),
            state: RwLock::new(LoadState::Idle),
            snapshot: RwLock::new(Arc::new(FeedSnapshot::default())),
            in_flight: AtomicBool::new(false),
            cycles: AtomicU64::new(0),
        }
    }

    /// Sets how many recent history entries feed personalization.
    pub fn with_history_window(mut self, window: usize) -> Self {
        self.history_window = window;
        self
    }

    /// Replaces the clock used for recency scoring.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn state(&self) -> LoadState {
        *self.state.read()
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> Arc<FeedSnapshot> {
        self.snapshot.read().clone()
    }

    /// Runs one load cycle to completion.
    pub async fn load(&self) -> LoadOutcome {
        self.load_until_cancelled(&CancellationToken::new()).await
    }

    /// Runs one load cycle unless `cancel` fires first.
    ///
    /// Returns `LoadInFlight` if another cycle is running on this loader and
    /// `LoadCancelled` if the token fired; neither publishes anything.
    /// Every other outcome publishes a new snapshot and returns it.
    pub async fn load_until_cancelled(&self, cancel: &CancellationToken) -> LoadOutcome {
        let Some(_guard) = SingleFlight::acquire(&self.in_flight) else {
            log::warn!("Load requested while another load is in flight");
            return Err(AppError::LoadInFlight);
        };

        let prior_state = self.state();
        let previous = self.snapshot();
        let cycle = self.cycles.fetch_add(1, Ordering::SeqCst) + 1;
        log::info!("Starting feed load cycle {}", cycle);

        let snapshot = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                log::info!("Feed load cycle {} cancelled", cycle);
                self.set_state(prior_state);
                return Err(AppError::LoadCancelled);
            }
            snapshot = self.run_cycle(cycle, &previous) => Arc::new(snapshot),
        };

        *self.snapshot.write() = Arc::clone(&snapshot);
        self.set_state(LoadState::Ready);

        match &snapshot.report.failure {
            None => log::info!(
                "Feed load cycle {} ready: {} cards from {} items ({} dropped)",
                cycle,
                snapshot.cards.len(),
                snapshot.report.items_decoded,
                snapshot.report.records_dropped
            ),
            Some(failed) => log::warn!(
                "Feed load cycle {} ready without a new card list: {} failed ({})",
                cycle,
                failed.resource,
                failed.failure
            ),
        }

        Ok(snapshot)
    }

    /// Runs a load cycle on the runtime and invokes `on_complete` exactly
    /// once with its outcome.
    pub fn spawn_load_with<F>(
        self: &Arc<Self>,
        cancel: CancellationToken,
        on_complete: F,
    ) -> tokio::task::JoinHandle<()>
    where
        F: FnOnce(LoadOutcome) + Send + 'static,
    {
        let loader = Arc::clone(self);
        tokio::spawn(async move {
            let outcome = loader.load_until_cancelled(&cancel).await;
            on_complete(outcome);
        })
    }

    /// Runs a load cycle on the runtime and delivers its outcome through a
    /// single-use channel.
    pub fn spawn_load(self: &Arc<Self>, cancel: CancellationToken) -> oneshot::Receiver<LoadOutcome> {
        let (sender, receiver) = oneshot::channel();
        self.spawn_load_with(cancel, move |outcome| {
            if sender.send(outcome).is_err() {
                log::debug!("Load completed after its receiver was dropped");
            }
        });
        receiver
    }

    async fn run_cycle(&self, cycle: u64, previous: &FeedSnapshot) -> FeedSnapshot {
        self.set_state(LoadState::LoadingSources);
        let sources = match self.repository.fetch_sources().await {
            Ok(sources) => {
                log::info!("Loaded {} publishers", sources.len());
                sources
            }
            Err(e) => {
                log::error!("Failed to load the source registry: {}", e);
                return FeedSnapshot {
                    cards: previous.cards.clone(),
                    sources: previous.sources.clone(),
                    report: self.failed_report(cycle, FeedResource::Sources, &e),
                };
            }
        };

        self.set_state(LoadState::LoadingCatalog);
        let catalog = match self.repository.fetch_catalog().await {
            Ok(catalog) => catalog,
            Err(e) => {
                log::error!("Failed to load the catalog: {}", e);
                return FeedSnapshot {
                    cards: previous.cards.clone(),
                    sources,
                    report: self.failed_report(cycle, FeedResource::Catalog, &e),
                };
            }
        };

        let records_dropped = catalog.dropped();
        let items_decoded = catalog.items.len();
        let visited = visited_domains(self.history.as_ref(), self.history_window).await;

        let ranked = rank_items(catalog.items, (self.clock)(), &visited);
        let cards = compose_cards(&ranked);

        FeedSnapshot {
            cards,
            sources,
            report: LoadReport {
                cycle,
                completed_at: Some((self.clock)()),
                items_decoded,
                records_dropped,
                visited_domains: visited.len(),
                failure: None,
            },
        }
    }

    fn failed_report(&self, cycle: u64, resource: FeedResource, error: &AppError) -> LoadReport {
        LoadReport {
            cycle,
            completed_at: Some((self.clock)()),
            failure: Some(StageFailure {
                resource,
                failure: classify_load_failure(error),
            }),
            ..LoadReport::default()
        }
    }

    fn set_state(&self, state: LoadState) {
        log::debug!("Feed loader state -> {:?}", state);
        *self.state.write() = state;
    }
}

/// Holds the loader's in-flight flag for the duration of one cycle.
struct SingleFlight<'a> {
    flag: &'a AtomicBool,
}

impl<'a> SingleFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for SingleFlight<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
