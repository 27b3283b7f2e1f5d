use colored::*;
use ipmd5_core::search::SearchReport;
use tracing::info;

pub const TOTAL_WIDTH: usize = 64;

pub fn header(msg: &str) {
    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    info!("{line}");
}

pub fn summary(report: &SearchReport) {
    let matches: ColoredString = format!("{} matches", report.matches_written).bold().green();
    let addresses: ColoredString = format!("{} addresses", report.addresses_scanned).bold();
    let total_time: ColoredString = format!("{:.2}s", report.elapsed.as_secs_f64()).bold().yellow();

    info!("{}", "═".repeat(TOTAL_WIDTH).bright_black());
    info!("Search complete: {matches} written after hashing {addresses} in {total_time}");
    info!(
        jobs = report.jobs_completed,
        failed = report.jobs_failed,
        "jobs finished"
    );
}
