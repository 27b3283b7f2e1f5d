pub mod search;

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use ipmd5_common::config::{Config, DEFAULT_JOB_PREFIX};
use ipmd5_common::network::range::Ipv4Range;

/// Commit the binary was built from, injected through `IPMD5_COMMIT`.
const COMMIT: &str = match option_env!("IPMD5_COMMIT") {
    Some(commit) => commit,
    None => "unknown",
};

/// `<version>-<commit>`, printed by `--version`.
pub fn build_id() -> String {
    format!("{}-{}", env!("CARGO_PKG_VERSION"), COMMIT)
}

#[derive(Parser, Debug)]
#[command(name = "ipmd5")]
#[command(about = "Reverse MD5 digests of IPv4 addresses by exhaustive search.")]
#[command(disable_version_flag = true)]
pub struct CommandLine {
    /// Source file path of the file target, one digest per line
    #[arg(long = "srcfile", env = "KX_IPMD5_SRCFILE", value_name = "PATH")]
    pub srcfile: Option<PathBuf>,

    /// File path of the file destination
    #[arg(long = "destfile", env = "KX_IPMD5_DESTFILE", value_name = "PATH")]
    pub destfile: Option<PathBuf>,

    /// Data source name of the MySQL target (reserved, not implemented)
    #[arg(long, env = "KX_IPMD5_DSN")]
    pub dsn: Option<String>,

    /// Number of search workers [default: logical CPUs - 1]
    #[arg(short, long, env = "KX_IPMD5_WORKERS")]
    pub workers: Option<usize>,

    /// Restrict the search to these CIDR ranges instead of 1.0.0.0 - 254.255.255.255
    #[arg(short, long = "range", value_name = "CIDR", value_delimiter = ',')]
    pub ranges: Vec<Ipv4Range>,

    /// Largest job handed to one worker, as a prefix length
    #[arg(
        long,
        value_name = "PREFIX",
        default_value_t = DEFAULT_JOB_PREFIX,
        value_parser = clap::value_parser!(u8).range(0..=32)
    )]
    pub job_prefix: u8,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Less log output (-q warnings, -qq errors only)
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,

    /// Do not draw the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Output the version
    #[arg(long)]
    pub version: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Missing paths become empty ones so [`Config::validate`] reports them.
    pub fn to_config(&self) -> Config {
        let mut cfg = Config::new(
            self.srcfile.clone().unwrap_or_default(),
            self.destfile.clone().unwrap_or_default(),
        );
        cfg.dsn = self.dsn.clone();
        cfg.workers = self.workers;
        cfg.ranges = self.ranges.clone();
        cfg.job_prefix = self.job_prefix;
        cfg
    }
}
