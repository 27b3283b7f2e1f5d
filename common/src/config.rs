use std::path::PathBuf;

use crate::error::ConfigError;
use crate::network::range::Ipv4Range;

/// Jobs derived from user ranges are no larger than a /8 unless asked otherwise.
pub const DEFAULT_JOB_PREFIX: u8 = 8;

/// The already-parsed settings of one search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// File holding one target digest per line.
    pub source: PathBuf,
    /// File receiving one `digest=address` line per match.
    pub destination: PathBuf,
    /// Data source name of an alternate persistence target.
    ///
    /// Reserved. Accepted so existing invocations keep working, but no
    /// backend reads it.
    pub dsn: Option<String>,
    /// Explicit worker count. `None` means logical CPUs minus one.
    pub workers: Option<usize>,
    /// Ranges to search. Empty means every top-level block, 254 down to 1.
    pub ranges: Vec<Ipv4Range>,
    /// Largest job handed to a worker when splitting `ranges`.
    pub job_prefix: u8,
}

impl Config {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            dsn: None,
            workers: None,
            ranges: Vec::new(),
            job_prefix: DEFAULT_JOB_PREFIX,
        }
    }

    /// Checks the preconditions a search needs before any file is touched.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.as_os_str().is_empty() {
            return Err(ConfigError::MissingSource);
        }
        if self.destination.as_os_str().is_empty() {
            return Err(ConfigError::MissingDestination);
        }
        if self.workers == Some(0) {
            return Err(ConfigError::InvalidWorkers);
        }
        if self.job_prefix > 32 {
            return Err(ConfigError::InvalidJobPrefix(self.job_prefix));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_minimal_config() {
        assert_eq!(Config::new("hashes.txt", "found.txt").validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_missing_paths() {
        assert_eq!(
            Config::new("", "found.txt").validate(),
            Err(ConfigError::MissingSource)
        );
        assert_eq!(
            Config::new("hashes.txt", "").validate(),
            Err(ConfigError::MissingDestination)
        );
    }

    #[test]
    fn validate_rejects_bad_numbers() {
        let mut cfg = Config::new("hashes.txt", "found.txt");
        cfg.workers = Some(0);
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidWorkers));

        cfg.workers = Some(4);
        cfg.job_prefix = 40;
        assert_eq!(cfg.validate(), Err(ConfigError::InvalidJobPrefix(40)));
    }
}
