//! IPv4 subnet arithmetic.
//!
//! Subnets are inclusive `[start, end]` ranges over 32-bit unsigned
//! address space; the generator records these bounds on every address and
//! the analyzer compares them, so both sides share this one definition.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;

/// An IPv4 network: a masked base address and a prefix length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subnet {
    network: u32,
    prefix: u8,
}

impl Subnet {
    /// Build a subnet, masking any host bits off the given address.
    pub fn new(address: u32, prefix: u8) -> Self {
        let prefix = prefix.min(32);
        Self {
            network: address & mask(prefix),
            prefix,
        }
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// First address of the range.
    pub fn start(&self) -> u32 {
        self.network
    }

    /// Last address of the range, inclusive.
    pub fn end(&self) -> u32 {
        self.network | !mask(self.prefix)
    }

    /// Number of addresses covered.
    pub fn size(&self) -> u64 {
        u64::from(self.end() - self.start()) + 1
    }

    pub fn contains(&self, other: &Subnet) -> bool {
        self.start() <= other.start() && other.end() <= self.end()
    }

    /// Inclusive-range intersection.
    pub fn overlaps(&self, other: &Subnet) -> bool {
        self.start() <= other.end() && other.start() <= self.end()
    }

    /// The `network/prefix` form, e.g. `10.1.2.0/24`.
    pub fn cidr(&self) -> String {
        format!("{}/{}", Ipv4Addr::from(self.network), self.prefix)
    }
}

impl fmt::Display for Subnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cidr())
    }
}

/// Netmask for a prefix length; prefix 0 masks nothing.
fn mask(prefix: u8) -> u32 {
    if prefix == 0 {
        0
    } else {
        u32::MAX << (32 - u32::from(prefix))
    }
}

/// Render a host address in dotted-quad form.
pub fn format_address(address: u32) -> String {
    Ipv4Addr::from(address).to_string()
}
