//! Refresh controller: turns manual and timed refresh requests into fetch-and-apply cycles.
//!
//! The controller owns the `FetchState` and at most one repeating timer. It exposes three
//! operations:
//!
//! - `RefreshController::start()` — run one cycle right away, then arm a timer that runs a
//!   cycle every `refresh_interval`. Re-arming cancels the previous timer first.
//! - `RefreshController::refresh_now()` — run one cycle outside the schedule; the timer is
//!   left alone.
//! - `RefreshController::stop()` — cancel the timer. Cycles already in flight still finish
//!   and still apply their result.
//!
//! Concurrency notes:
//! - Every cycle is its own Tokio task and its `JoinHandle` is returned to the caller.
//!   Cycles may overlap (a manual refresh during a slow timed one); by default the last one
//!   to complete wins. With `ControllerConfig::discard_stale`, each cycle carries a
//!   generation number and results older than the last applied one are dropped.
//! - `is_loading` is derived from the number of pending cycles, so it only drops back to
//!   `false` once the last of them is done.
//! - All writes to the state go through one mutex and are published through a
//!   `tokio::sync::watch` channel.
//! - A cycle that is aborted through its handle still leaves the in-flight count, so
//!   `is_loading` cannot get stuck.
//! - The timer task holds a handle to the controller; it runs until `stop()` even if every
//!   other handle is dropped. Each armed timer carries an epoch and only spawns while its
//!   epoch is current, so no tick starts a cycle once `stop()` has returned.
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use log::{debug, info, warn};
use quote_common::{ControllerConfig, Quote, QuoteSource, Result};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::model::FetchState;

/// What caused a cycle. Only used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Start,
    Timer,
    Manual,
}

/// Cycle bookkeeping that is not part of the published state.
#[derive(Debug, Default)]
struct Progress {
    /// Cycles started so far; the newest cycle's generation.
    started: u64,
    /// Cycles started but not yet finished.
    in_flight: usize,
    /// Generation of the cycle whose quote is currently shown.
    applied: u64,
}

/// The armed timer, if any.
#[derive(Debug, Default)]
struct Timer {
    handle: Option<JoinHandle<()>>,
    /// Bumped on every `start` and `stop`; a timer task only fires while its epoch is current.
    epoch: u64,
}

struct Shared {
    source: Arc<dyn QuoteSource>,
    config: ControllerConfig,
    progress: Mutex<Progress>,
    state: watch::Sender<FetchState>,
    timer: Mutex<Timer>,
}

/// Pending cycle. Dropping it settles the bookkeeping whether or not the fetch finished.
struct Cycle {
    controller: RefreshController,
    generation: u64,
    outcome: Option<Result<Quote>>,
}

impl Drop for Cycle {
    fn drop(&mut self) {
        self.controller.finish_cycle(self.generation, self.outcome.take());
    }
}

/// Handle to a refresh controller. Cloning is cheap and every clone drives the same state.
#[derive(Clone)]
pub struct RefreshController {
    shared: Arc<Shared>,
}

impl RefreshController {
    /// Create a controller with the default 10 second refresh interval.
    pub fn new(source: Arc<dyn QuoteSource>) -> Self {
        Self::with_config(source, ControllerConfig::default())
    }

    /// Create a controller with an explicit configuration.
    pub fn with_config(source: Arc<dyn QuoteSource>, config: ControllerConfig) -> Self {
        let (state, _) = watch::channel(FetchState::default());
        Self {
            shared: Arc::new(Shared {
                source,
                config,
                progress: Mutex::new(Progress::default()),
                state,
                timer: Mutex::new(Timer::default()),
            }),
        }
    }

    /// Run one cycle immediately and arm the repeating timer.
    ///
    /// Any previously armed timer is cancelled first, so at most one timer is ever active.
    /// Returns the handle of the immediate cycle.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&self) -> JoinHandle<()> {
        let mut timer = lock(&self.shared.timer);
        if let Some(previous) = timer.handle.take() {
            debug!("Cancelling previously armed refresh timer");
            previous.abort();
        }
        timer.epoch += 1;

        let first = self.spawn_cycle(Trigger::Start);
        timer.handle = Some(self.spawn_timer(timer.epoch));
        info!(
            "Auto-refresh armed every {}s",
            self.shared.config.refresh_interval.as_secs_f64()
        );
        first
    }

    /// Run one cycle now without touching the timer schedule.
    pub fn refresh_now(&self) -> JoinHandle<()> {
        self.spawn_cycle(Trigger::Manual)
    }

    /// Cancel the repeating timer. Safe to call when nothing is armed.
    pub fn stop(&self) {
        let mut timer = lock(&self.shared.timer);
        timer.epoch += 1;
        if let Some(handle) = timer.handle.take() {
            handle.abort();
            info!("Auto-refresh stopped");
        }
    }

    /// Whether a repeating timer is currently armed.
    pub fn is_running(&self) -> bool {
        lock(&self.shared.timer).handle.is_some()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> FetchState {
        self.shared.state.borrow().clone()
    }

    /// Receiver that is notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.shared.state.subscribe()
    }

    /// Number of cycles started since creation.
    pub fn cycles_started(&self) -> u64 {
        lock(&self.shared.progress).started
    }

    fn spawn_timer(&self, epoch: u64) -> JoinHandle<()> {
        let period = self.shared.config.refresh_interval;
        let first_tick = Instant::now() + period;
        let controller = self.clone();

        tokio::spawn(async move {
            let mut ticker = interval_at(first_tick, period);
            // Missed ticks after a stall collapse into one.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if !controller.fire_tick(epoch) {
                    debug!("Refresh timer #{epoch} superseded, exiting");
                    break;
                }
            }
        })
    }

    /// Spawn a timed cycle unless the timer of `epoch` was stopped or re-armed.
    ///
    /// The timer lock is held across the spawn, so `stop()` cannot return in between.
    fn fire_tick(&self, epoch: u64) -> bool {
        let timer = lock(&self.shared.timer);
        if timer.epoch != epoch {
            return false;
        }
        self.spawn_cycle(Trigger::Timer);
        true
    }

    /// Mark the cycle as started before spawning, so `is_loading` is visible right away.
    fn spawn_cycle(&self, trigger: Trigger) -> JoinHandle<()> {
        let generation = self.begin_cycle();
        debug!("Starting refresh cycle #{generation} ({trigger:?})");

        let mut cycle = Cycle {
            controller: self.clone(),
            generation,
            outcome: None,
        };
        tokio::spawn(async move {
            let outcome = cycle.controller.shared.source.fetch_random_quote().await;
            cycle.outcome = Some(outcome);
            drop(cycle);
        })
    }

    fn begin_cycle(&self) -> u64 {
        let mut progress = lock(&self.shared.progress);
        progress.started += 1;
        progress.in_flight += 1;
        self.shared.state.send_if_modified(|state| {
            let was_loading = state.is_loading;
            state.is_loading = true;
            !was_loading
        });
        progress.started
    }

    /// `outcome` is `None` when the cycle was aborted before the fetch returned.
    fn finish_cycle(&self, generation: u64, outcome: Option<Result<Quote>>) {
        let mut progress = lock(&self.shared.progress);
        progress.in_flight -= 1;
        let stale = self.shared.config.discard_stale && generation < progress.applied;

        self.shared.state.send_modify(|state| {
            match outcome {
                None => {
                    debug!("Cycle #{generation} was cancelled before completing");
                }
                Some(Ok(_)) if stale => {
                    debug!(
                        "Dropping result of cycle #{generation}, cycle #{} already applied",
                        progress.applied
                    );
                }
                Some(Ok(quote)) => {
                    debug!("Cycle #{generation} applied quote {}", quote.id);
                    progress.applied = generation;
                    state.current_quote = Some(quote);
                    state.last_updated = Some(Utc::now());
                    state.last_error = None;
                }
                Some(Err(e)) => {
                    warn!("Quote fetch failed ({}): {}", e.kind(), e);
                    state.last_error = Some(e.to_string());
                }
            }
            state.is_loading = progress.in_flight > 0;
        });
    }
}

/// Lock a mutex, recovering the data if a previous holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
