use anyhow::Context;
use ipmd5_core::partition::Partitioner;
use ipmd5_core::pool::JobEvent;
use ipmd5_core::search;
use tracing::{error, info};

use crate::commands::CommandLine;
use crate::terminal::{print, progress};

pub fn search(commands: &CommandLine) -> anyhow::Result<()> {
    let cfg = commands.to_config();

    let total_jobs = Partitioner::new(cfg.job_prefix).job_count(&cfg.ranges);
    let bar = progress::start(total_jobs, commands.no_progress);
    let on_job_done = |event: JobEvent| progress::job_done(bar, event);

    let result = search::execute(&cfg, Some(&on_job_done));
    bar.finish_and_clear();

    let report = result
        .inspect_err(|e| error!("search aborted: {e}"))
        .context("search did not complete")?;

    if report.jobs_failed > 0 {
        error!(failed = report.jobs_failed, "some jobs failed; their ranges were not searched");
    }
    print::summary(&report);
    info!(path = %cfg.destination.display(), "results complete");

    Ok(())
}
