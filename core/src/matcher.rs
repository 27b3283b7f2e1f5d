//! Membership tests of computed digests, and the per-range
//! enumerate → hash → match pipeline built on them.

use std::net::Ipv4Addr;

use ipmd5_common::error::RangeParseError;
use ipmd5_common::models::MatchResult;
use ipmd5_common::network::range::Ipv4Range;
use thiserror::Error;
use tracing::info;

use crate::enumerate::AddressesExt;
use crate::hasher::Hasher;
use crate::targets::TargetSet;

pub struct Matcher<'t> {
    targets: &'t TargetSet,
    hasher: Hasher,
}

impl<'t> Matcher<'t> {
    pub fn new(targets: &'t TargetSet) -> Self {
        Self {
            targets,
            hasher: Hasher::new(),
        }
    }

    pub fn is_match(&self, digest: &str) -> bool {
        self.targets.contains(digest)
    }

    /// Hashes `addr` and returns a result if its digest is a target.
    pub fn check(&mut self, addr: Ipv4Addr) -> Option<MatchResult> {
        let digest = self.hasher.hash(addr);
        self.targets
            .contains(digest)
            .then(|| MatchResult::new(digest, addr))
    }
}

/// Counters for one scanned range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeStats {
    pub addresses: u64,
    pub matches: u64,
}

#[derive(Debug, Error)]
pub enum ScanError<E> {
    #[error(transparent)]
    Range(#[from] RangeParseError),
    #[error("match could not be delivered: {0}")]
    Emit(E),
}

/// Addresses hashed between two `keep_going` calls in [`scan_range_checked`].
pub const CHECK_INTERVAL: u64 = 4096;

/// Scans every address of `range`, handing each match to `emit`.
///
/// Addresses are visited in ascending order. The first `emit` error stops
/// the scan and is returned as is.
pub fn scan_range<E, F>(range: Ipv4Range, targets: &TargetSet, emit: F) -> Result<RangeStats, E>
where
    F: FnMut(MatchResult) -> Result<(), E>,
{
    scan_range_checked(range, targets, emit, || Ok(()))
}

/// [`scan_range`] that also asks `keep_going` every [`CHECK_INTERVAL`]
/// addresses, starting with the first, and stops on its error.
pub fn scan_range_checked<E, F, K>(
    range: Ipv4Range,
    targets: &TargetSet,
    mut emit: F,
    keep_going: K,
) -> Result<RangeStats, E>
where
    F: FnMut(MatchResult) -> Result<(), E>,
    K: Fn() -> Result<(), E>,
{
    let mut matcher = Matcher::new(targets);
    let mut stats = RangeStats::default();

    for addr in range.addresses() {
        if stats.addresses % CHECK_INTERVAL == 0 {
            keep_going()?;
        }
        stats.addresses += 1;

        if let Some(found) = matcher.check(addr) {
            info!(digest = %found.digest, %addr, "match found");
            stats.matches += 1;
            emit(found)?;
        }
    }

    Ok(stats)
}

/// [`scan_range`] for CIDR text such as `"10.0.0.0/8"`.
///
/// Malformed text is returned as [`ScanError::Range`] before any address is
/// visited.
pub fn scan_cidr<E, F>(cidr: &str, targets: &TargetSet, emit: F) -> Result<RangeStats, ScanError<E>>
where
    F: FnMut(MatchResult) -> Result<(), E>,
{
    let range: Ipv4Range = cidr.parse()?;
    scan_range(range, targets, emit).map_err(ScanError::Emit)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
