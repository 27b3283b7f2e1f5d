//! MD5 digests of addresses in their canonical dotted-decimal form.

use std::fmt::Write;
use std::net::Ipv4Addr;

use md5::{Digest, Md5};

/// Length of a lowercase hex MD5 digest.
pub const DIGEST_HEX_LEN: usize = 32;

/// Hex-encoded MD5 of `addr.to_string()`.
pub fn digest(addr: Ipv4Addr) -> String {
    hex::encode(Md5::digest(addr.to_string().as_bytes()))
}

/// Allocation-free variant of [`digest`] for hot loops.
///
/// Each worker owns one; the returned `&str` is only valid until the next
/// call to [`Hasher::hash`].
#[derive(Debug, Clone)]
pub struct Hasher {
    text: String,
    hex: [u8; DIGEST_HEX_LEN],
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher {
    pub fn new() -> Self {
        Self {
            // "255.255.255.255"
            text: String::with_capacity(15),
            hex: [b'0'; DIGEST_HEX_LEN],
        }
    }

    pub fn hash(&mut self, addr: Ipv4Addr) -> &str {
        self.text.clear();
        let _ = write!(self.text, "{addr}");

        let sum = Md5::digest(self.text.as_bytes());
        let _ = hex::encode_to_slice(sum, &mut self.hex);

        std::str::from_utf8(&self.hex).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Computed independently with coreutils `md5sum`.
    const KNOWN: &[(Ipv4Addr, &str)] = &[
        (Ipv4Addr::new(0, 0, 0, 0), "f1f17934834ae2613699701054ef9684"),
        (Ipv4Addr::new(255, 255, 255, 255), "eea88cd0d9a7ba26282fc786713bbbb6"),
        (Ipv4Addr::new(10, 0, 0, 5), "0669df0f031fb83e345267a9679bbc6a"),
        (Ipv4Addr::new(1, 2, 3, 4), "6465ec74397c9126916786bbcd6d7601"),
    ];

    #[test]
    fn digest_matches_reference_values() {
        for (addr, expected) in KNOWN {
            assert_eq!(digest(*addr), *expected, "digest of {addr}");
        }
    }

    #[test]
    fn hasher_agrees_with_digest() {
        let mut hasher = Hasher::new();
        for (addr, expected) in KNOWN {
            assert_eq!(hasher.hash(*addr), *expected, "hash of {addr}");
        }
        assert_eq!(hasher.hash(Ipv4Addr::new(10, 0, 0, 5)).len(), DIGEST_HEX_LEN);
    }
}
