//! Auto-refresh scheduling.
//!
//! A countdown ticks once per second and triggers a re-fetch when it
//! reaches zero. The countdown itself is a pure state machine; the
//! `Poller` drives it on a tokio task and owns a command channel for
//! pause/resume/manual-refresh/shutdown.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::session::EventStore;
use crate::source::EventSource;

/// Countdown state machine behind the auto-refresh timer
#[derive(Debug, Clone)]
pub struct Countdown {
    initial: u32,
    remaining: u32,
    paused: bool,
}

impl Countdown {
    pub fn new(initial_secs: u32) -> Self {
        Self {
            initial: initial_secs,
            remaining: initial_secs,
            paused: false,
        }
    }

    /// One-second tick. Returns true when a refresh should fire; the
    /// countdown rewinds on fire. A paused countdown never fires.
    pub fn tick(&mut self) -> bool {
        if self.paused {
            return false;
        }
        if self.remaining == 0 {
            self.remaining = self.initial;
            return true;
        }
        self.remaining -= 1;
        false
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resuming restarts the countdown from its configured initial
    /// value, not from where it left off
    pub fn resume(&mut self) {
        self.paused = false;
        self.remaining = self.initial;
    }

    /// Manual refresh rewinds the countdown
    pub fn reset(&mut self) {
        self.remaining = self.initial;
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

/// Repository + pull request the poller watches
#[derive(Debug, Clone)]
pub struct PollTarget {
    pub owner: String,
    pub repo: String,
    pub pull_request: u64,
}

enum PollCommand {
    Pause,
    Resume,
    RefreshNow,
    Shutdown,
}

/// Handle to a running poller. Dropping the handle aborts the task, so a
/// torn-down view cannot leak its timer.
pub struct PollerHandle {
    tx: mpsc::UnboundedSender<PollCommand>,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    pub fn pause(&self) {
        let _ = self.tx.send(PollCommand::Pause);
    }

    pub fn resume(&self) {
        let _ = self.tx.send(PollCommand::Resume);
    }

    /// Fetch immediately and rewind the countdown. Ignored while a fetch
    /// is already in flight.
    pub fn refresh_now(&self) {
        let _ = self.tx.send(PollCommand::RefreshNow);
    }

    /// Graceful stop: lets the poller task finish its loop
    pub async fn shutdown(mut self) {
        let _ = self.tx.send(PollCommand::Shutdown);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Spawns the auto-refresh loop. One fetch is issued immediately;
/// afterwards the countdown schedules the rest. Fetches run as separate
/// tasks and may overlap a manual refresh; the store's generation guard
/// discards whichever snapshot is stale.
pub fn spawn_poller(
    source: Arc<dyn EventSource>,
    target: PollTarget,
    interval_secs: u32,
    store: Arc<Mutex<EventStore>>,
) -> PollerHandle {
    let (tx, mut rx) = mpsc::unbounded_channel();

    let task = tokio::spawn(async move {
        let mut countdown = Countdown::new(interval_secs);
        let generation = AtomicU64::new(0);
        let in_flight = Arc::new(AtomicBool::new(false));

        spawn_fetch(&source, &target, &store, &generation, &in_flight);

        let mut ticker = tokio::time::interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    // the timer idles while a fetch is outstanding
                    if !in_flight.load(Ordering::SeqCst) && countdown.tick() {
                        spawn_fetch(&source, &target, &store, &generation, &in_flight);
                    }
                }
                cmd = rx.recv() => match cmd {
                    Some(PollCommand::Pause) => countdown.pause(),
                    Some(PollCommand::Resume) => countdown.resume(),
                    Some(PollCommand::RefreshNow) => {
                        if !in_flight.load(Ordering::SeqCst) {
                            countdown.reset();
                            spawn_fetch(&source, &target, &store, &generation, &in_flight);
                        }
                    }
                    Some(PollCommand::Shutdown) | None => break,
                },
            }
        }
    });

    PollerHandle {
        tx,
        task: Some(task),
    }
}

fn spawn_fetch(
    source: &Arc<dyn EventSource>,
    target: &PollTarget,
    store: &Arc<Mutex<EventStore>>,
    generation: &AtomicU64,
    in_flight: &Arc<AtomicBool>,
) {
    let source = Arc::clone(source);
    let store = Arc::clone(store);
    let in_flight = Arc::clone(in_flight);
    let generation = generation.fetch_add(1, Ordering::SeqCst) + 1;
    let target = target.clone();

    in_flight.store(true, Ordering::SeqCst);

    tokio::spawn(async move {
        let result = source
            .events(&target.owner, &target.repo, target.pull_request)
            .await;

        {
            let mut store = store.lock().expect("event store lock poisoned");
            match result {
                Ok(response) => {
                    if store.apply_events(generation, response.events) {
                        log::info!(
                            "Refreshed {}/{}#{} ({} events, generation {})",
                            target.owner,
                            target.repo,
                            target.pull_request,
                            store.events().len(),
                            generation
                        );
                    } else {
                        log::debug!("Discarded stale snapshot (generation {})", generation);
                    }
                }
                Err(e) => {
                    let message = e.to_string();
                    if store.apply_error(generation, message.clone()) {
                        log::warn!("Refresh failed: {}", message);
                    }
                }
            }
        }

        in_flight.store(false, Ordering::SeqCst);
    });
}
