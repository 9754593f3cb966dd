// Copyright (c) 2025 - Cowboy AI, Inc.
//! Network Value Objects for Address Classification

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use thiserror::Error;

/// Network validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("Invalid IP address format: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid CIDR notation: {0}")]
    InvalidCidr(String),

    #[error("Invalid prefix length: {0} (must be 0-32 for IPv4, 0-128 for IPv6)")]
    InvalidPrefixLength(u8),
}

/// CIDR block value object
///
/// Represents an IPv4 or IPv6 network with a prefix length.
/// Invariants:
/// - Valid IP address format
/// - Prefix length within valid range for the address family
///
/// # Examples
///
/// ```rust
/// use instance_resolver::domain::Cidr;
///
/// let block = Cidr::new("172.16.0.0/12").unwrap();
/// assert!(block.contains("172.31.255.1".parse().unwrap()));
/// assert!(!block.contains("172.32.0.1".parse().unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cidr {
    address: IpAddr,
    prefix_length: u8,
}

impl Cidr {
    /// Parse CIDR notation (e.g., "10.0.0.0/8")
    pub fn new(cidr: impl AsRef<str>) -> Result<Self, NetworkError> {
        let cidr = cidr.as_ref();

        let (addr_str, prefix_str) = cidr
            .split_once('/')
            .ok_or_else(|| NetworkError::InvalidCidr(cidr.to_string()))?;

        let address = IpAddr::from_str(addr_str)
            .map_err(|_| NetworkError::InvalidIpAddress(addr_str.to_string()))?;

        let prefix_length = prefix_str
            .parse::<u8>()
            .map_err(|_| NetworkError::InvalidCidr(cidr.to_string()))?;

        Self::from_parts(address, prefix_length)
    }

    /// Create from separate address and prefix
    pub fn from_parts(address: IpAddr, prefix_length: u8) -> Result<Self, NetworkError> {
        if prefix_length > max_prefix(&address) {
            return Err(NetworkError::InvalidPrefixLength(prefix_length));
        }

        Ok(Self {
            address,
            prefix_length,
        })
    }

    /// Const constructor for well-known IPv4 blocks
    const fn v4(a: u8, b: u8, c: u8, d: u8, prefix_length: u8) -> Self {
        Self {
            address: IpAddr::V4(Ipv4Addr::new(a, b, c, d)),
            prefix_length,
        }
    }

    /// Get the network address
    pub fn address(&self) -> IpAddr {
        self.address
    }

    /// Get the prefix length
    pub fn prefix_length(&self) -> u8 {
        self.prefix_length
    }

    /// Check whether an address falls inside this block
    ///
    /// An IPv4-mapped IPv6 address (`::ffff:a.b.c.d`) is compared as its
    /// IPv4 form. Otherwise addresses of a different family never match.
    pub fn contains(&self, ip: IpAddr) -> bool {
        match (self.address, normalize(ip)) {
            (IpAddr::V4(net), IpAddr::V4(ip)) => {
                masked(u32::from(net).into(), self.prefix_length, 32)
                    == masked(u32::from(ip).into(), self.prefix_length, 32)
            }
            (IpAddr::V6(net), IpAddr::V6(ip)) => {
                masked(u128::from(net), self.prefix_length, 128)
                    == masked(u128::from(ip), self.prefix_length, 128)
            }
            _ => false,
        }
    }
}

impl fmt::Display for Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix_length)
    }
}

impl FromStr for Cidr {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// RFC 1918 private-use IPv4 blocks
pub const PRIVATE_IPV4_BLOCKS: [Cidr; 3] = [
    Cidr::v4(10, 0, 0, 0, 8),
    Cidr::v4(172, 16, 0, 0, 12),
    Cidr::v4(192, 168, 0, 0, 16),
];

/// Check whether an address lies in one of the RFC 1918 blocks
///
/// Unlike [`Ipv4Addr::is_private`] this deliberately ignores IPv6 unique
/// local addresses: only the three IPv4 blocks count.
pub fn is_private(ip: IpAddr) -> bool {
    PRIVATE_IPV4_BLOCKS.iter().any(|block| block.contains(ip))
}

fn max_prefix(address: &IpAddr) -> u8 {
    match address {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    }
}

fn normalize(ip: IpAddr) -> IpAddr {
    match ip {
        IpAddr::V6(v6) => match to_mapped_ipv4(&v6) {
            Some(v4) => IpAddr::V4(v4),
            None => IpAddr::V6(v6),
        },
        v4 => v4,
    }
}

// Only ::ffff:0:0/96; IPv4-compatible addresses stay IPv6.
fn to_mapped_ipv4(v6: &Ipv6Addr) -> Option<Ipv4Addr> {
    match v6.segments() {
        [0, 0, 0, 0, 0, 0xffff, hi, lo] => {
            let [a, b] = hi.to_be_bytes();
            let [c, d] = lo.to_be_bytes();
            Some(Ipv4Addr::new(a, b, c, d))
        }
        _ => None,
    }
}

fn masked(value: u128, prefix_length: u8, width: u8) -> u128 {
    if prefix_length == 0 {
        return 0;
    }
    let host_bits = u32::from(width - prefix_length);
    let all = if width == 128 { u128::MAX } else { (1u128 << width) - 1 };
    value & (all << host_bits) & all
}
