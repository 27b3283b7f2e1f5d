use std::io::{self, Write};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use ipmd5_core::pool::JobEvent;

static PROGRESS: OnceLock<ProgressBar> = OnceLock::new();
static ADDRESSES: AtomicU64 = AtomicU64::new(0);
static FAILED: AtomicU64 = AtomicU64::new(0);

/// Creates the job progress bar on first call and returns it afterwards.
pub fn start(total_jobs: u64, hidden: bool) -> &'static ProgressBar {
    PROGRESS.get_or_init(|| {
        let target = if hidden {
            ProgressDrawTarget::hidden()
        } else {
            ProgressDrawTarget::stderr()
        };

        let style = ProgressStyle::with_template(
            "{spinner:.blue} [{elapsed_precise}] {bar:40.green/white} {pos}/{len} jobs {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ]);

        let pb = ProgressBar::with_draw_target(Some(total_jobs), target);
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    })
}

pub fn job_done(bar: &ProgressBar, event: JobEvent) {
    match event {
        JobEvent::Finished { units, .. } => {
            ADDRESSES.fetch_add(units, Ordering::Relaxed);
        }
        JobEvent::Failed { .. } => {
            FAILED.fetch_add(1, Ordering::Relaxed);
        }
    }

    let scanned = ADDRESSES.load(Ordering::Relaxed).to_string().green().bold();
    let message = match FAILED.load(Ordering::Relaxed) {
        0 => format!("{scanned} addresses hashed"),
        failed => format!("{scanned} addresses hashed, {} failed", failed.to_string().red()),
    };

    bar.set_message(message);
    bar.inc(1);
}

/// Log sink that keeps the progress bar intact.
pub struct ProgressWriter;

impl Write for ProgressWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match PROGRESS.get() {
            Some(pb) => pb.suspend(|| io::stderr().write_all(buf))?,
            None => io::stderr().write_all(buf)?,
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}
