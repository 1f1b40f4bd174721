//! Anonymous voter identity.

use std::fmt;
use std::net::IpAddr;

/// Voter key used when the peer address of a request is not observable.
pub const UNKNOWN_VOTER: &str = "unknown";

/// Identity of an anonymous voter: the textual peer IP address, or
/// [`UNKNOWN_VOTER`].
///
/// `"unknown"` is an ordinary key: every request without an observable
/// address counts as the same voter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VoterIp(String);

impl VoterIp {
    pub fn from_addr(addr: Option<IpAddr>) -> Self {
        match addr {
            Some(ip) => VoterIp(ip.to_string()),
            None => VoterIp(UNKNOWN_VOTER.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_VOTER
    }
}

impl fmt::Display for VoterIp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
