//! Recompute
//!
//! Owns the cart summary lifecycle: loads fee settings on activation and on
//! cart changes, keeps the latest classification, and republishes the
//! reconciled summary whenever its inputs change.

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use feesplit::{CartSnapshot, Classification, FeeConfiguration, Reconciler, SummaryView, classify};
use tokio::{sync::watch, task::JoinHandle, time::Instant};
use tracing::{debug, info};

use crate::settings::ConfigSource;

/// Lifecycle phase of a [`SummaryRecomputer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not activated yet
    Idle,

    /// A settings fetch is in flight
    Fetching,

    /// The latest fetch has settled
    Ready,
}

/// What the summary renderer sees.
#[derive(Debug, Clone, PartialEq)]
pub struct RecomputeOutput {
    /// Current phase
    pub phase: Phase,

    /// Render inputs for the latest cart snapshot
    pub view: Arc<SummaryView>,
}

/// When cart changes may trigger a new settings fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshPolicy {
    /// Minimum time between fetch starts; zero refetches on every change
    pub min_interval: Duration,
}

impl Default for RefreshPolicy {
    fn default() -> Self {
        Self {
            min_interval: Duration::from_secs(60),
        }
    }
}

#[derive(Debug)]
struct State {
    classification: Arc<Classification>,
    snapshot: Option<CartSnapshot>,
    generation: u64,
    alive: bool,
}

#[derive(Debug)]
struct Inner {
    reconciler: Reconciler,
    state: Mutex<State>,
    output: watch::Sender<RecomputeOutput>,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Installs the result of fetch `generation`, unless it was superseded or
    /// the recomputer was torn down. A failed fetch keeps the cached
    /// classification and only settles the phase.
    fn apply(&self, generation: u64, config: Option<&FeeConfiguration>) {
        let classification = config.map(classify);
        let mut state = self.lock();

        if !state.alive {
            debug!(generation, "recomputer torn down, discarding fee settings");
            return;
        }

        if state.generation != generation {
            debug!(
                generation,
                current = state.generation,
                "fee settings superseded, discarding"
            );
            return;
        }

        let Some(classification) = classification else {
            info!(generation, "fee settings unavailable, keeping cached classification");

            self.output
                .send_modify(|output| output.phase = Phase::Ready);
            return;
        };

        info!(
            packaging_skus = classification.packaging_ids().len(),
            deposit_skus = classification.deposit_ids().len(),
            "fee settings applied"
        );

        state.classification = Arc::new(classification);

        let view = state
            .snapshot
            .as_ref()
            .map(|snapshot| SummaryView::derive(snapshot, &state.classification, &self.reconciler));

        self.output.send_modify(|output| {
            output.phase = Phase::Ready;

            if let Some(view) = view {
                output.view = Arc::new(view);
            }
        });
    }
}

/// Keeps a cart summary in step with cart changes and fee settings.
///
/// Each instance owns its cached classification and output; instances never
/// share state. Methods that start a fetch must be called from within a tokio
/// runtime.
pub struct SummaryRecomputer {
    source: Arc<dyn ConfigSource>,
    refresh: RefreshPolicy,
    inner: Arc<Inner>,
    last_fetch: Option<Instant>,
    in_flight: Option<JoinHandle<()>>,
}

impl SummaryRecomputer {
    /// Create an idle recomputer.
    #[must_use]
    pub fn new(source: Arc<dyn ConfigSource>, reconciler: Reconciler, refresh: RefreshPolicy) -> Self {
        let (output, _receiver) = watch::channel(RecomputeOutput {
            phase: Phase::Idle,
            view: Arc::default(),
        });

        Self {
            source,
            refresh,
            inner: Arc::new(Inner {
                reconciler,
                state: Mutex::new(State {
                    classification: Arc::default(),
                    snapshot: None,
                    generation: 0,
                    alive: true,
                }),
                output,
            }),
            last_fetch: None,
            in_flight: None,
        }
    }

    /// Start the initial settings fetch. Calling it again has no effect.
    pub fn activate(&mut self) {
        if self.last_fetch.is_none() {
            self.start_fetch();
        }
    }

    /// Recompute the summary for a new cart snapshot.
    ///
    /// The summary is derived immediately with the classification cached
    /// before this call; a settings fetch started here only affects later
    /// publications. A fetch is started when items or totalizers changed and
    /// the refresh interval has elapsed since the previous one.
    pub fn update_cart(&mut self, snapshot: CartSnapshot) {
        let relevant_change = {
            let mut state = self.inner.lock();

            if !state.alive {
                return;
            }

            let relevant_change = state.snapshot.as_ref().is_none_or(|previous| {
                previous.items != snapshot.items || previous.totalizers != snapshot.totalizers
            });

            let view = SummaryView::derive(&snapshot, &state.classification, &self.inner.reconciler);
            state.snapshot = Some(snapshot);

            self.inner
                .output
                .send_modify(|output| output.view = Arc::new(view));

            relevant_change
        };

        if relevant_change && self.refetch_due() {
            self.start_fetch();
        } else {
            debug!(relevant_change, "cart recomputed without refetching fee settings");
        }
    }

    /// Latest published output.
    pub fn current(&self) -> RecomputeOutput {
        self.inner.output.borrow().clone()
    }

    /// Receiver notified on every publication.
    pub fn subscribe(&self) -> watch::Receiver<RecomputeOutput> {
        self.inner.output.subscribe()
    }

    /// Classification the next recompute will use.
    pub fn classification(&self) -> Arc<Classification> {
        Arc::clone(&self.inner.lock().classification)
    }

    /// Wait until the latest fetch has settled.
    ///
    /// Never resolves on a recomputer that was not activated and has seen no
    /// cart change.
    pub async fn settled(&self) -> RecomputeOutput {
        let mut receiver = self.subscribe();

        match receiver.wait_for(|output| output.phase == Phase::Ready).await {
            Ok(output) => output.clone(),
            Err(_closed) => self.current(),
        }
    }

    /// Stop applying fetch results. Any in-flight fetch is abandoned.
    pub fn teardown(&mut self) {
        self.inner.lock().alive = false;

        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }

    fn refetch_due(&self) -> bool {
        self.last_fetch
            .is_none_or(|started| started.elapsed() >= self.refresh.min_interval)
    }

    fn start_fetch(&mut self) {
        let generation = {
            let mut state = self.inner.lock();
            state.generation += 1;
            state.generation
        };

        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }

        debug!(generation, "fetching fee settings");

        self.inner
            .output
            .send_modify(|output| output.phase = Phase::Fetching);
        self.last_fetch = Some(Instant::now());

        let source = Arc::clone(&self.source);
        let inner = Arc::downgrade(&self.inner);

        self.in_flight = Some(tokio::spawn(async move {
            let config = source.load().await;

            if let Some(inner) = inner.upgrade() {
                inner.apply(generation, config.as_ref());
            }
        }));
    }
}

impl fmt::Debug for SummaryRecomputer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SummaryRecomputer")
            .field("refresh", &self.refresh)
            .field("inner", &self.inner)
            .field("last_fetch", &self.last_fetch)
            .finish_non_exhaustive()
    }
}

impl Drop for SummaryRecomputer {
    fn drop(&mut self) {
        self.teardown();
    }
}
