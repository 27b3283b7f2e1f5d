use std::fmt;
use std::net::Ipv4Addr;

/// A target digest paired with the address that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchResult {
    pub digest: String,
    pub addr: Ipv4Addr,
}

impl MatchResult {
    pub fn new(digest: impl Into<String>, addr: Ipv4Addr) -> Self {
        Self {
            digest: digest.into(),
            addr,
        }
    }
}

/// Renders the persisted line form, `digest=address`.
impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.digest, self.addr)
    }
}
