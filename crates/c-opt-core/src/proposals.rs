//! ---
//! opt_section: "03-feeds"
//! opt_subsection: "module"
//! opt_type: "source"
//! opt_scope: "code"
//! opt_description: "Proposal feed runtime and pending-list operations."
//! opt_version: "v0.1.0"
//! opt_owner: "tbd"
//! ---
use std::sync::{Arc, Mutex};

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use c_opt_common::config::ProposalFeedConfig;
use c_opt_sim::{OptimizationProposal, ProposalSource};

/// Periodic publisher of the pending optimization-proposal list.
///
/// The first `start` seeds the list with the source's fixed proposals;
/// restarting never reseeds. The timer fires one full period after start,
/// and each cycle may prepend one freshly spawned proposal before truncating
/// to capacity. Approve and reject are destructive removals; neither outcome
/// is retained beyond a structured log line.
pub struct ProposalFeed {
    config: ProposalFeedConfig,
    source: Arc<Mutex<Box<dyn ProposalSource>>>,
    state: Arc<watch::Sender<Vec<OptimizationProposal>>>,
    shutdown: broadcast::Sender<()>,
    task: Option<JoinHandle<()>>,
    seeded: bool,
}

impl ProposalFeed {
    pub fn new(config: ProposalFeedConfig, source: Box<dyn ProposalSource>) -> Self {
        let (state, _) = watch::channel(Vec::new());
        let (shutdown, _) = broadcast::channel(4);
        Self {
            config,
            source: Arc::new(Mutex::new(source)),
            state: Arc::new(state),
            shutdown,
            task: None,
            seeded: false,
        }
    }

    /// Seed the pending list (first start only) and begin the spawn cycle.
    /// No-op when already running.
    pub fn start(&mut self) {
        if self.task.is_some() {
            return;
        }
        if !self.seeded {
            let seeds = self.source.lock().expect("source lock poisoned").seed();
            info!(count = seeds.len(), "proposal feed seeded");
            self.state.send_modify(|list| *list = seeds);
            self.seeded = true;
        }
        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);
        let capacity = self.config.capacity;
        let period = self.config.tick_interval;
        let mut shutdown = self.shutdown.subscribe();
        self.task = Some(tokio::spawn(async move {
            let first = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(first, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = shutdown.recv() => {
                        debug!("proposal feed shutdown signal received");
                        break;
                    }
                    _ = interval.tick() => run_tick(&source, &state, capacity),
                }
            }
        }));
        info!(
            period_ms = period.as_millis() as u64,
            capacity, "proposal feed started"
        );
    }

    /// Cancel the timer task. Idempotent and safe to call before `start`.
    pub fn stop(&mut self) {
        let _ = self.shutdown.send(());
        if let Some(task) = self.task.take() {
            task.abort();
            info!("proposal feed stopped");
        }
    }

    /// Run one spawn cycle outside the timer.
    pub fn tick(&self) {
        run_tick(&self.source, &self.state, self.config.capacity);
    }

    /// Pending proposals, newest first.
    pub fn list(&self) -> Vec<OptimizationProposal> {
        self.state.borrow().clone()
    }

    /// Remove the proposal with this id, if present. Unknown ids are ignored.
    pub fn approve(&self, id: &str) {
        self.resolve(id, "approved");
    }

    /// Remove the proposal with this id, if present. Unknown ids are ignored.
    pub fn reject(&self, id: &str) {
        self.resolve(id, "rejected");
    }

    /// Watch receiver delivering the pending list on every change.
    pub fn subscribe(&self) -> watch::Receiver<Vec<OptimizationProposal>> {
        self.state.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    fn resolve(&self, id: &str, decision: &str) {
        let mut removed = false;
        self.state.send_modify(|list| {
            let before = list.len();
            list.retain(|proposal| proposal.id != id);
            removed = list.len() != before;
        });
        if removed {
            info!(proposal = id, decision, "proposal resolved");
        } else {
            debug!(proposal = id, decision, "resolution for unknown proposal ignored");
        }
    }
}

impl Drop for ProposalFeed {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

fn run_tick(
    source: &Mutex<Box<dyn ProposalSource>>,
    state: &watch::Sender<Vec<OptimizationProposal>>,
    capacity: usize,
) {
    let spawned = source.lock().expect("source lock poisoned").maybe_spawn();
    match spawned {
        Some(proposal) => {
            info!(
                proposal = %proposal.id,
                action = %proposal.action,
                risk = ?proposal.risk_level,
                "optimization proposal spawned"
            );
            state.send_modify(|list| {
                list.insert(0, proposal);
                list.truncate(capacity);
            });
        }
        None => debug!("no proposal spawned this cycle"),
    }
}
