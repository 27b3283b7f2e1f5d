//! Fixed-size worker pool fed through a rendezvous job queue.
//!
//! Both channels are zero-capacity: the coordinator blocks until a worker
//! takes a job, and a worker blocks until the sink takes a result. That
//! couples producer speed to consumer speed without an explicit depth
//! limit.
//!
//! Shutdown runs in a fixed order:
//! 1. the coordinator drops the job sender after the last job,
//! 2. each worker drains the queue and exits, and is joined,
//! 3. the last result sender goes away with the last worker,
//! 4. the sink sees the closed channel, finishes, and is joined.
//!
//! [`WorkerPool::run`] returns only after step 4.
//!
//! A sink that stops early raises the pool's stop flag. The coordinator
//! queues nothing more, idle workers exit before their next job, and busy
//! ones bail out at their next [`JobResults::ensure_open`] check.

use std::fmt::Display;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crossbeam_channel::{Receiver, Sender, bounded};
use ipmd5_common::error::{RangeParseError, SearchError};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::matcher::ScanError;

/// Why a single job did not complete.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("invalid job: {0}")]
    Invalid(#[from] RangeParseError),
    #[error("result channel closed")]
    ResultsClosed,
}

impl From<ScanError<JobError>> for JobError {
    fn from(err: ScanError<JobError>) -> Self {
        match err {
            ScanError::Range(e) => JobError::Invalid(e),
            ScanError::Emit(e) => e,
        }
    }
}

/// Reported to the pool observer once per job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobEvent {
    Finished { worker: usize, units: u64 },
    Failed { worker: usize },
}

pub type JobObserver<'a> = Option<&'a (dyn Fn(JobEvent) + Sync)>;

/// The result side of a job, as seen by the work function.
pub struct JobResults<'a, R> {
    tx: Sender<R>,
    stop: &'a AtomicBool,
}

impl<R> JobResults<'_, R> {
    /// Hands one result to the sink, blocking until it is taken.
    pub fn send(&self, result: R) -> Result<(), JobError> {
        self.ensure_open()?;
        self.tx.send(result).map_err(|_| JobError::ResultsClosed)
    }

    /// Fails once the sink has stopped. Long jobs call this periodically.
    pub fn ensure_open(&self) -> Result<(), JobError> {
        if self.stop.load(Ordering::Acquire) {
            return Err(JobError::ResultsClosed);
        }
        Ok(())
    }
}

/// Raises the stop flag when the sink thread ends, panicking or not.
struct StopOnDrop<'a>(&'a AtomicBool);

impl Drop for StopOnDrop<'_> {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Release);
    }
}

/// Totals gathered from every worker, plus whatever the sink returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolReport<T> {
    pub jobs_completed: u64,
    pub jobs_failed: u64,
    pub units: u64,
    pub sink: T,
}

#[derive(Debug, Default)]
struct WorkerTotals {
    completed: u64,
    failed: u64,
    units: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerPool {
    workers: NonZeroUsize,
}

impl WorkerPool {
    /// A pool of `workers` threads. Zero is treated as one.
    pub fn new(workers: usize) -> Self {
        Self {
            workers: NonZeroUsize::new(workers).unwrap_or(NonZeroUsize::MIN),
        }
    }

    /// One worker per logical CPU, minus one left for the coordinator and sink.
    pub fn from_available_parallelism() -> Self {
        let cpus = thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        Self::new(cpus.saturating_sub(1))
    }

    pub fn workers(&self) -> usize {
        self.workers.get()
    }

    /// Feeds `jobs` to the workers and drains their results into `consume`.
    ///
    /// `work` runs on a worker thread with the worker's 1-based id, the job,
    /// and the job's [`JobResults`]; it returns how many units it processed.
    /// A job error other than [`JobError::ResultsClosed`] is logged and
    /// counted, and the worker moves on. A closed result side stops the
    /// worker.
    ///
    /// `consume` runs on its own thread and owns the receiving end until the
    /// channel closes. If it returns early, no further jobs start.
    pub fn run<I, J, R, W, C, T>(
        &self,
        jobs: I,
        work: W,
        consume: C,
        on_job_done: JobObserver<'_>,
    ) -> Result<PoolReport<T>, SearchError>
    where
        I: IntoIterator<Item = J>,
        J: Display + Send,
        R: Send,
        W: Fn(usize, &J, &JobResults<'_, R>) -> Result<u64, JobError> + Sync,
        C: FnOnce(Receiver<R>) -> Result<T, SearchError> + Send,
        T: Send,
    {
        let stop = AtomicBool::new(false);
        let stop = &stop;

        thread::scope(|scope| {
            let (job_tx, job_rx) = bounded::<J>(0);
            let (result_tx, result_rx) = bounded::<R>(0);

            let sink = thread::Builder::new()
                .name("ipmd5-sink".into())
                .spawn_scoped(scope, move || {
                    let _stop = StopOnDrop(stop);
                    consume(result_rx)
                })
                .map_err(|e| SearchError::Spawn("sink", e))?;

            let mut handles = Vec::with_capacity(self.workers());
            for id in 1..=self.workers() {
                let jobs = job_rx.clone();
                let results = JobResults {
                    tx: result_tx.clone(),
                    stop,
                };
                let work = &work;

                let handle = thread::Builder::new()
                    .name(format!("ipmd5-worker-{id}"))
                    .spawn_scoped(scope, move || {
                        worker_loop(id, jobs, results, work, on_job_done)
                    })
                    .map_err(|e| SearchError::Spawn("worker", e))?;
                handles.push(handle);
            }

            // Only workers hold the job receiver and the result senders from here on.
            drop(job_rx);
            drop(result_tx);

            for job in jobs {
                if stop.load(Ordering::Acquire) {
                    warn!("result sink stopped; no further jobs queued");
                    break;
                }
                debug!(job = %job, "add job");
                if job_tx.send(job).is_err() {
                    warn!("every worker has stopped; no further jobs queued");
                    break;
                }
            }

            debug!("closing jobs: done");
            drop(job_tx);

            let mut totals = WorkerTotals::default();
            let mut panicked = None;
            for (idx, handle) in handles.into_iter().enumerate() {
                match handle.join() {
                    Ok(worker) => {
                        totals.completed += worker.completed;
                        totals.failed += worker.failed;
                        totals.units += worker.units;
                    }
                    Err(_) => {
                        error!(worker = idx + 1, "worker panicked");
                        panicked.get_or_insert(idx + 1);
                    }
                }
            }

            let sink = sink.join().map_err(|_| SearchError::SinkPanicked)??;

            if let Some(id) = panicked {
                return Err(SearchError::WorkerPanicked(id));
            }

            Ok(PoolReport {
                jobs_completed: totals.completed,
                jobs_failed: totals.failed,
                units: totals.units,
                sink,
            })
        })
    }
}

fn worker_loop<J, R, W>(
    id: usize,
    jobs: Receiver<J>,
    results: JobResults<'_, R>,
    work: &W,
    on_job_done: JobObserver<'_>,
) -> WorkerTotals
where
    J: Display,
    W: Fn(usize, &J, &JobResults<'_, R>) -> Result<u64, JobError>,
{
    let mut totals = WorkerTotals::default();
    let mut jid: u64 = 0;

    for job in jobs.iter() {
        if results.ensure_open().is_err() {
            debug!(worker = id, "result sink stopped, stopping");
            break;
        }

        jid += 1;
        debug!(worker = id, job = jid, range = %job, "starting job");

        let event = match work(id, &job, &results) {
            Ok(units) => {
                debug!(worker = id, job = jid, range = %job, "finished job");
                totals.completed += 1;
                totals.units += units;
                JobEvent::Finished { worker: id, units }
            }
            Err(JobError::ResultsClosed) => {
                debug!(worker = id, job = jid, "result channel closed, stopping");
                break;
            }
            Err(e) => {
                error!(worker = id, job = jid, range = %job, "job failed: {e}");
                totals.failed += 1;
                JobEvent::Failed { worker: id }
            }
        };

        if let Some(notify) = on_job_done {
            notify(event);
        }
    }

    totals
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
