//! Splits the searchable address space into jobs.

use std::net::Ipv4Addr;

use ipmd5_common::network::range::Ipv4Range;

/// Highest first octet searched. 255 is the broadcast convention.
pub const FIRST_TOP_LEVEL: u8 = 254;
/// Lowest first octet searched. 0 is reserved.
pub const LAST_TOP_LEVEL: u8 = 1;

/// The /8 blocks from `254.0.0.0/8` down to `1.0.0.0/8`.
pub fn top_level_blocks() -> impl Iterator<Item = Ipv4Range> + Clone {
    (LAST_TOP_LEVEL..=FIRST_TOP_LEVEL)
        .rev()
        .map(Ipv4Range::top_level)
}

/// Cuts ranges into jobs no larger than `/job_prefix`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partitioner {
    job_prefix: u8,
}

impl Partitioner {
    pub fn new(job_prefix: u8) -> Self {
        Self {
            job_prefix: job_prefix.min(32),
        }
    }

    pub fn job_prefix(&self) -> u8 {
        self.job_prefix
    }

    /// Ascending, disjoint subranges covering `range` exactly.
    ///
    /// A range already smaller than a job comes back unchanged.
    pub fn split(&self, range: Ipv4Range) -> impl Iterator<Item = Ipv4Range> + use<> {
        let prefix = self.job_prefix.max(range.prefix());
        let step: u64 = 1 << (32 - u32::from(prefix));
        let count: u64 = range.len() / step;
        let base = u64::from(u32::from(range.base()));

        (0..count).filter_map(move |i| {
            let addr = u32::try_from(base + i * step).ok()?;
            Ipv4Range::new(Ipv4Addr::from(addr), prefix).ok()
        })
    }

    /// Jobs for `ranges`, or for every top-level block when `ranges` is empty.
    pub fn jobs<'a>(&self, ranges: &'a [Ipv4Range]) -> Box<dyn Iterator<Item = Ipv4Range> + 'a> {
        let this = *self;
        if ranges.is_empty() {
            Box::new(top_level_blocks().flat_map(move |block| this.split(block)))
        } else {
            Box::new(ranges.iter().flat_map(move |range| this.split(*range)))
        }
    }

    /// Number of jobs [`Partitioner::jobs`] yields for `ranges`.
    pub fn job_count(&self, ranges: &[Ipv4Range]) -> u64 {
        let count = |range: Ipv4Range| 1u64 << (self.job_prefix.max(range.prefix()) - range.prefix());
        if ranges.is_empty() {
            top_level_blocks().map(count).sum()
        } else {
            ranges.iter().copied().map(count).sum()
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
