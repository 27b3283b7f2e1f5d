//! Lazy, ascending walk over every address of an [`Ipv4Range`].

use std::iter::FusedIterator;
use std::net::Ipv4Addr;

use ipmd5_common::network::range::Ipv4Range;

/// Returns the address one above `addr`, or `None` past `255.255.255.255`.
///
/// The four octets are treated as a big-endian integer: the last octet is
/// incremented and a wrap to 0 carries into the octet on its left.
pub fn increment(addr: Ipv4Addr) -> Option<Ipv4Addr> {
    let mut octets = addr.octets();

    for octet in octets.iter_mut().rev() {
        let (next, carried) = octet.overflowing_add(1);
        *octet = next;
        if !carried {
            return Some(Ipv4Addr::from(octets));
        }
    }

    None
}

/// Every address in `[base, broadcast]`, strictly ascending, each once.
///
/// The walk ends on the broadcast address itself and never steps past it,
/// so a range ending at `255.255.255.255` terminates like any other.
#[derive(Debug, Clone)]
pub struct Addresses {
    range: Ipv4Range,
    next: Option<Ipv4Addr>,
    remaining: u64,
}

impl Addresses {
    pub fn new(range: Ipv4Range) -> Self {
        Self {
            range,
            next: Some(range.base()),
            remaining: range.len(),
        }
    }
}

impl Iterator for Addresses {
    type Item = Ipv4Addr;

    fn next(&mut self) -> Option<Ipv4Addr> {
        let current = self.next.take()?;
        if !self.range.contains(current) {
            self.remaining = 0;
            return None;
        }

        if current != self.range.broadcast() {
            self.next = increment(current);
        }
        self.remaining = self.remaining.saturating_sub(1);

        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl FusedIterator for Addresses {}

pub trait AddressesExt {
    fn addresses(&self) -> Addresses;
}

impl AddressesExt for Ipv4Range {
    fn addresses(&self) -> Addresses {
        Addresses::new(*self)
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
