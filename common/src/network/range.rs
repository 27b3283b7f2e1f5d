//! # IPv4 Range Model
//!
//! A range is a base address plus a prefix length. It covers the inclusive
//! block `[base, broadcast]`, where the broadcast address is the base with
//! every host bit set.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use pnet::ipnetwork::Ipv4Network;

use crate::error::RangeParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    base_addr: Ipv4Addr,
    prefix: u8,
}

impl Ipv4Range {
    /// Builds the range containing `addr` with the given prefix length.
    ///
    /// Host bits of `addr` are cleared, so `10.1.2.3/8` becomes `10.0.0.0/8`.
    pub fn new(addr: Ipv4Addr, prefix: u8) -> Result<Self, RangeParseError> {
        let network = Ipv4Network::new(addr, prefix)
            .map_err(|_| RangeParseError::PrefixTooLong(prefix))?;

        Ok(Self {
            base_addr: network.network(),
            prefix,
        })
    }

    /// The byte-aligned /8 block `{first_octet}.0.0.0/8`.
    pub const fn top_level(first_octet: u8) -> Self {
        Self {
            base_addr: Ipv4Addr::new(first_octet, 0, 0, 0),
            prefix: 8,
        }
    }

    pub fn base(&self) -> Ipv4Addr {
        self.base_addr
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    pub fn mask(&self) -> Ipv4Addr {
        Ipv4Addr::from(mask_bits(self.prefix))
    }

    pub fn broadcast(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.base_addr) | !mask_bits(self.prefix))
    }

    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        u32::from(addr) & mask_bits(self.prefix) == u32::from(self.base_addr)
    }

    /// Number of addresses in the range. A /0 holds 2^32 of them, hence `u64`.
    pub fn len(&self) -> u64 {
        1u64 << (32 - u32::from(self.prefix))
    }

    /// Always false; every range holds at least its base address.
    pub fn is_empty(&self) -> bool {
        false
    }
}

fn mask_bits(prefix: u8) -> u32 {
    match prefix {
        0 => 0,
        p => u32::MAX << (32 - u32::from(p)),
    }
}

impl fmt::Display for Ipv4Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base_addr, self.prefix)
    }
}

impl FromStr for Ipv4Range {
    type Err = RangeParseError;

    /// Parses CIDR notation like "192.168.1.0/24".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let Some((ip_str, prefix_str)) = s.split_once('/') else {
            return Err(RangeParseError::MissingPrefix(s.to_string()));
        };

        let addr = ip_str
            .parse::<Ipv4Addr>()
            .map_err(|_| RangeParseError::InvalidAddress(ip_str.to_string()))?;

        let prefix = prefix_str
            .parse::<u8>()
            .map_err(|_| RangeParseError::InvalidPrefix(prefix_str.to_string()))?;

        Self::new(addr, prefix)
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
