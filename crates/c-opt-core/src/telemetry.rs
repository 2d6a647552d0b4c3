//! ---
//! opt_section: "03-feeds"
//! opt_subsection: "module"
//! opt_type: "source"
//! opt_scope: "code"
//! opt_description: "Telemetry feed runtime and snapshot publication."
//! opt_version: "v0.1.0"
//! opt_owner: "tbd"
//! ---
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use c_opt_common::config::TelemetryFeedConfig;
use c_opt_sim::{TelemetrySample, TelemetrySampler, Trends};

/// Consistent per-tick view of the telemetry feed. All three parts are
/// replaced together under one watch update, so readers never observe a
/// latest sample that is missing from the history.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TelemetrySnapshot {
    pub latest: Option<TelemetrySample>,
    pub trends: Option<Trends>,
    /// Up to `history_capacity` most recent samples, oldest first.
    pub history: VecDeque<TelemetrySample>,
}

/// Periodic publisher of synthetic telemetry samples and trend sets.
///
/// `start` spawns a timer task whose first tick fires immediately; `stop`
/// signals shutdown and aborts the task. Both are idempotent. The sampler is
/// only touched from inside the tick, so swapping in a non-random
/// implementation changes nothing about the publication contract.
pub struct TelemetryFeed {
    config: TelemetryFeedConfig,
    sampler: Arc<Mutex<Box<dyn TelemetrySampler>>>,
    state: Arc<watch::Sender<TelemetrySnapshot>>,
    shutdown: broadcast::Sender<()>,
    task: Option<JoinHandle<()>>,
}

impl TelemetryFeed {
    pub fn new(config: TelemetryFeedConfig, sampler: Box<dyn TelemetrySampler>) -> Self {
        let (state, _) = watch::channel(TelemetrySnapshot::default());
        let (shutdown, _) = broadcast::channel(4);
        Self {
            config,
            sampler: Arc::new(Mutex::new(sampler)),
            state: Arc::new(state),
            shutdown,
            task: None,
        }
    }

    /// Begin the repeating generation cycle. No-op when already running.
    pub fn start(&mut self) {
        if self.task.is_some() {
            return;
        }
        let sampler = Arc::clone(&self.sampler);
        let state = Arc::clone(&self.state);
        let capacity = self.config.history_capacity;
        let period = self.config.tick_interval;
        let mut shutdown = self.shutdown.subscribe();
        self.task = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = shutdown.recv() => {
                        debug!("telemetry feed shutdown signal received");
                        break;
                    }
                    _ = interval.tick() => run_tick(&sampler, &state, capacity),
                }
            }
        }));
        info!(
            period_ms = period.as_millis() as u64,
            capacity, "telemetry feed started"
        );
    }

    /// Cancel the timer task. Idempotent and safe to call before `start`;
    /// after it returns no further ticks mutate published state.
    pub fn stop(&mut self) {
        let _ = self.shutdown.send(());
        if let Some(task) = self.task.take() {
            task.abort();
            info!("telemetry feed stopped");
        }
    }

    /// Run one generation cycle outside the timer. Used by tests and by
    /// callers that drive the feed manually.
    pub fn tick(&self) {
        run_tick(&self.sampler, &self.state, self.config.history_capacity);
    }

    /// Most recent sample, `None` before the first tick.
    pub fn latest(&self) -> Option<TelemetrySample> {
        self.state.borrow().latest.clone()
    }

    /// Latest trend set, `None` before the first tick.
    pub fn trends(&self) -> Option<Trends> {
        self.state.borrow().trends
    }

    /// Rolling history, oldest first.
    pub fn history(&self) -> Vec<TelemetrySample> {
        self.state.borrow().history.iter().cloned().collect()
    }

    /// Full consistent snapshot of the feed.
    pub fn snapshot(&self) -> TelemetrySnapshot {
        self.state.borrow().clone()
    }

    /// Watch receiver delivering one snapshot per tick.
    pub fn subscribe(&self) -> watch::Receiver<TelemetrySnapshot> {
        self.state.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }
}

impl Drop for TelemetryFeed {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

fn run_tick(
    sampler: &Mutex<Box<dyn TelemetrySampler>>,
    state: &watch::Sender<TelemetrySnapshot>,
    capacity: usize,
) {
    let (sample, trends) = {
        let mut sampler = sampler.lock().expect("sampler lock poisoned");
        (sampler.sample(), sampler.trends())
    };
    debug!(
        kiln_temp_c = sample.kiln_temp_c,
        energy_per_ton_kwh = sample.energy_per_ton_kwh,
        mill_power_kw = sample.mill_power_kw,
        "telemetry sample published"
    );
    state.send_modify(|snapshot| {
        snapshot.history.push_back(sample.clone());
        while snapshot.history.len() > capacity {
            snapshot.history.pop_front();
        }
        snapshot.latest = Some(sample);
        snapshot.trends = Some(trends);
    });
}
