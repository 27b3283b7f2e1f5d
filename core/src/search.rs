//! # Search Orchestration
//!
//! Wires the target set, partitioner, worker pool and sink into one run.
//! [`Search::run`] is the engine; [`execute`] adds the file handling around
//! it for a [`Config`].

use std::fs::File;
use std::io::BufReader;
use std::time::{Duration, Instant};

use ipmd5_common::config::Config;
use ipmd5_common::error::SearchError;
use ipmd5_common::models::MatchResult;
use ipmd5_common::network::range::Ipv4Range;
use ipmd5_common::sink::ResultSink;
use tracing::{debug, info, warn};

use crate::matcher;
use crate::partition::Partitioner;
use crate::pool::{JobError, JobObserver, JobResults, WorkerPool};
use crate::sink::{LineSink, drain};
use crate::targets::TargetSet;

/// What a finished run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub jobs_completed: u64,
    pub jobs_failed: u64,
    pub addresses_scanned: u64,
    pub matches_written: u64,
    pub elapsed: Duration,
}

pub struct Search<'t> {
    targets: &'t TargetSet,
    pool: WorkerPool,
}

impl<'t> Search<'t> {
    pub fn new(targets: &'t TargetSet, pool: WorkerPool) -> Self {
        Self { targets, pool }
    }

    /// Scans every job range and writes each match to `sink`.
    ///
    /// Returns once all workers have exited and the sink has finished.
    pub fn run<I, S>(
        &self,
        jobs: I,
        sink: &mut S,
        on_job_done: JobObserver<'_>,
    ) -> Result<SearchReport, SearchError>
    where
        I: IntoIterator<Item = Ipv4Range>,
        S: ResultSink + ?Sized,
    {
        let targets = self.targets;
        self.execute_jobs(
            jobs,
            move |range: &Ipv4Range, results: &JobResults<'_, MatchResult>| {
                scan_job(*range, targets, results)
            },
            sink,
            on_job_done,
        )
    }

    /// Like [`Search::run`], but each job is CIDR text.
    ///
    /// A job that does not parse is logged and counted in
    /// [`SearchReport::jobs_failed`]; the remaining jobs still run.
    pub fn run_cidrs<I, S>(
        &self,
        jobs: I,
        sink: &mut S,
        on_job_done: JobObserver<'_>,
    ) -> Result<SearchReport, SearchError>
    where
        I: IntoIterator<Item = String>,
        S: ResultSink + ?Sized,
    {
        let targets = self.targets;
        self.execute_jobs(
            jobs,
            move |cidr: &String, results: &JobResults<'_, MatchResult>| {
                scan_job(cidr.parse()?, targets, results)
            },
            sink,
            on_job_done,
        )
    }

    fn execute_jobs<I, J, W, S>(
        &self,
        jobs: I,
        work: W,
        sink: &mut S,
        on_job_done: JobObserver<'_>,
    ) -> Result<SearchReport, SearchError>
    where
        I: IntoIterator<Item = J>,
        J: std::fmt::Display + Send,
        W: Fn(&J, &JobResults<'_, MatchResult>) -> Result<u64, JobError> + Sync,
        S: ResultSink + ?Sized,
    {
        if self.targets.is_empty() {
            warn!("no target digests loaded; nothing can match");
        }
        info!(workers = self.pool.workers(), "starting search");

        let started = Instant::now();
        let report = self.pool.run(
            jobs,
            |_worker, job, results| work(job, results),
            move |results| drain(sink, results),
            on_job_done,
        )?;

        Ok(SearchReport {
            jobs_completed: report.jobs_completed,
            jobs_failed: report.jobs_failed,
            addresses_scanned: report.units,
            matches_written: report.sink,
            elapsed: started.elapsed(),
        })
    }
}

fn scan_job(
    range: Ipv4Range,
    targets: &TargetSet,
    results: &JobResults<'_, MatchResult>,
) -> Result<u64, JobError> {
    let stats = matcher::scan_range_checked(
        range,
        targets,
        |found| results.send(found),
        || results.ensure_open(),
    )?;
    Ok(stats.addresses)
}

/// Picks the pool size for `cfg`.
pub fn pool_for(cfg: &Config) -> WorkerPool {
    cfg.workers
        .map(WorkerPool::new)
        .unwrap_or_else(WorkerPool::from_available_parallelism)
}

/// Runs a whole search described by `cfg`.
///
/// Loads the source file into a [`TargetSet`], truncates the destination,
/// and searches either `cfg.ranges` or every top-level block. The
/// destination is flushed and closed before this returns `Ok`.
pub fn execute(cfg: &Config, on_job_done: JobObserver<'_>) -> Result<SearchReport, SearchError> {
    cfg.validate()?;

    if let Some(dsn) = &cfg.dsn {
        warn!(dsn = %dsn, "dsn persistence is reserved and not implemented; ignoring");
    }

    info!(path = %cfg.source.display(), "reading hashes from file");
    let source = File::open(&cfg.source).map_err(SearchError::source_io)?;
    let targets = TargetSet::from_reader(BufReader::new(source)).map_err(SearchError::source_io)?;
    debug!(path = %cfg.source.display(), "closing hashes from file");

    info!(path = %cfg.destination.display(), "writing results to file");
    let destination = File::create(&cfg.destination).map_err(SearchError::destination_io)?;
    let mut sink = LineSink::new(destination);

    let partitioner = Partitioner::new(cfg.job_prefix);
    let report = Search::new(&targets, pool_for(cfg)).run(
        partitioner.jobs(&cfg.ranges),
        &mut sink,
        on_job_done,
    )?;

    drop(sink);
    debug!(path = %cfg.destination.display(), "closing results to file");

    Ok(report)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
