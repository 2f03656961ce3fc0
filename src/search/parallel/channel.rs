//! Work distribution and result channels for parallel scan workers.

use crate::search::scanner::BaseScan;
use crossbeam_channel::{Receiver, Sender, unbounded};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Message sent from workers to the coordinator.
#[derive(Debug, Clone)]
pub enum WorkerMessage {
    /// Worker finished one outer base.
    Batch { worker_id: usize, batch: BaseScan },
    /// Worker has no more work (queue drained or stop requested).
    Finished { worker_id: usize, bases_scanned: usize },
}

/// State shared by the coordinator and every worker.
#[derive(Debug, Default)]
pub struct SharedState {
    /// Flag to signal all workers to stop before their next base.
    pub should_stop: AtomicBool,
    /// Number of bases completed across all workers.
    pub bases_completed: AtomicUsize,
}

impl SharedState {
    /// Check if we should stop scanning.
    pub fn should_stop(&self) -> bool {
        self.should_stop.load(Ordering::SeqCst)
    }

    /// Ask every worker to stop before its next base.
    pub fn signal_stop(&self) {
        self.should_stop.store(true, Ordering::SeqCst);
    }

    /// Record one finished base and return the new total.
    pub fn record_base(&self) -> usize {
        self.bases_completed.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn completed(&self) -> usize {
        self.bases_completed.load(Ordering::SeqCst)
    }
}

/// Channel endpoints for a worker.
pub struct WorkerChannels {
    /// Pull base indices to scan.
    pub jobs: Receiver<usize>,
    /// Send results to the coordinator.
    pub to_coordinator: Sender<WorkerMessage>,
    /// Shared stop flag and counters.
    pub shared: Arc<SharedState>,
}

/// Channel endpoints for the coordinator.
pub struct CoordinatorChannels {
    /// Batches and completion notices from every worker.
    pub from_workers: Receiver<WorkerMessage>,
    /// Stop flag and base counter.
    pub shared: Arc<SharedState>,
}

/// Create channels for `num_workers` workers with every index in `0..num_jobs` queued.
pub fn create_channels(
    num_workers: usize,
    num_jobs: usize,
) -> (CoordinatorChannels, Vec<WorkerChannels>) {
    let shared = Arc::new(SharedState::default());

    // Pre-filled job queue; dropping the sender lets workers see the end
    let (job_tx, job_rx) = unbounded();
    for index in 0..num_jobs {
        let _ = job_tx.send(index);
    }
    drop(job_tx);

    // Batches flow back without back-pressure
    let (worker_tx, coordinator_rx) = unbounded();

    let worker_channels = (0..num_workers)
        .map(|_| WorkerChannels {
            jobs: job_rx.clone(),
            to_coordinator: worker_tx.clone(),
            shared: Arc::clone(&shared),
        })
        .collect();

    let coordinator = CoordinatorChannels {
        from_workers: coordinator_rx,
        shared,
    };

    (coordinator, worker_channels)
}
