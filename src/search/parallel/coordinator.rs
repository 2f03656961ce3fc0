//! Parallel scan coordinator that manages worker threads.

use crate::search::parallel::channel::{
    CoordinatorChannels, WorkerChannels, WorkerMessage, create_channels,
};
use crate::search::parallel::config::ParallelConfig;
use crate::search::progress::ProgressSink;
use crate::search::result::ScanResult;
use crate::search::scanner::{BaseScan, Scanner};
use crossbeam_channel::RecvTimeoutError;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Run the scan with one outer base per job, spread across worker threads.
///
/// Workers keep private per-base accumulators and hand them to the
/// coordinator, which reassembles them in base order. The solution lists
/// are therefore identical to a sequential scan of the same range.
pub fn run_parallel_scan(
    scanner: &Scanner<'_>,
    config: &ParallelConfig,
    progress: &dyn ProgressSink,
) -> ScanResult {
    let start_time = Instant::now();
    let num_bases = scanner.bases().len();
    let num_workers = config.effective_workers(num_bases);

    let (coordinator_channels, worker_channels) = create_channels(num_workers, num_bases);
    info!(workers = num_workers, bases = num_bases, "starting parallel scan");

    let slots = thread::scope(|scope| {
        for (worker_id, channels) in worker_channels.into_iter().enumerate() {
            scope.spawn(move || run_worker(worker_id, scanner, channels, progress));
        }
        run_coordinator(coordinator_channels, num_bases, num_workers, config, start_time)
    });

    let completed = slots.iter().all(Option::is_some);
    if !completed {
        let missing = slots.iter().filter(|slot| slot.is_none()).count();
        warn!(missing, "parallel scan stopped before every base was scanned");
    }

    let mut statistics = scanner.initial_statistics();
    statistics.workers = num_workers;
    statistics.elapsed_time = start_time.elapsed();
    scanner.assemble(slots.into_iter().flatten(), statistics, completed)
}

/// Coordinator loop that collects per-base batches until every worker has finished.
fn run_coordinator(
    channels: CoordinatorChannels,
    num_bases: usize,
    num_workers: usize,
    config: &ParallelConfig,
    start_time: Instant,
) -> Vec<Option<BaseScan>> {
    let mut slots: Vec<Option<BaseScan>> = vec![None; num_bases];
    let mut finished_count = 0;
    let deadline = config.timeout.map(|t| start_time + t);

    loop {
        if deadline.is_some_and(|d| Instant::now() >= d) && !channels.shared.should_stop() {
            warn!(
                completed = channels.shared.completed(),
                total = num_bases,
                "timeout reached, stopping workers"
            );
            channels.shared.signal_stop();
        }

        // Receive with timeout to allow periodic deadline checks
        match channels
            .from_workers
            .recv_timeout(Duration::from_millis(100))
        {
            Ok(WorkerMessage::Batch { worker_id, batch }) => {
                debug!(
                    worker_id,
                    base_index = batch.base_index,
                    exact = batch.exact.len(),
                    near_misses = batch.near_misses.len(),
                    "received batch"
                );
                let index = batch.base_index;
                slots[index] = Some(batch);
            }
            Ok(WorkerMessage::Finished {
                worker_id,
                bases_scanned,
            }) => {
                debug!(worker_id, bases_scanned, "worker finished");
                finished_count += 1;
                if finished_count >= num_workers {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                // All senders dropped, we're done
                break;
            }
        }
    }

    slots
}

/// Worker loop: pull base indices until the queue is empty or a stop is signalled.
fn run_worker(
    worker_id: usize,
    scanner: &Scanner<'_>,
    channels: WorkerChannels,
    progress: &dyn ProgressSink,
) {
    let mut bases_scanned = 0;

    while !channels.shared.should_stop() {
        let Ok(base_index) = channels.jobs.recv() else {
            break;
        };

        let batch = scanner.scan_base(base_index, progress);
        bases_scanned += 1;
        channels.shared.record_base();

        if channels
            .to_coordinator
            .send(WorkerMessage::Batch { worker_id, batch })
            .is_err()
        {
            break;
        }
    }

    let _ = channels.to_coordinator.send(WorkerMessage::Finished {
        worker_id,
        bases_scanned,
    });
}
