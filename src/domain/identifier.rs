// Copyright (c) 2025 - Cowboy AI, Inc.
//! Identifier Classification
//!
//! Turns a free-form string typed by a user into the single VM inventory
//! attribute it most likely names. Classification is total: anything that
//! matches no other rule is treated as a Name tag.
//!
//! # Rule Order
//!
//! ```text
//! "i-…" | "mi-…"                 → ByInstanceId
//! IP in 10/8, 172.16/12, 192.168/16 → ByPrivateIp
//! any other IP                    → ByPublicIp
//! "…compute.amazonaws.com"        → ByPublicDns
//! "…compute.internal"             → ByPrivateDns
//! anything else                   → ByNameTag
//! ```
//!
//! First match wins, so `i-0abc.compute.amazonaws.com` is an instance ID.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;

use super::network;
use crate::inventory::{attributes, Filter};

const INSTANCE_ID_PREFIXES: [&str; 2] = ["i-", "mi-"];
const PUBLIC_DNS_SUFFIX: &str = "compute.amazonaws.com";
const PRIVATE_DNS_SUFFIX: &str = "compute.internal";

/// Which instance attribute an identifier refers to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentifierFilter {
    ByInstanceId(String),
    ByPrivateIp(String),
    ByPublicIp(String),
    ByPublicDns(String),
    ByPrivateDns(String),
    ByNameTag(String),
}

impl IdentifierFilter {
    /// VM inventory attribute this filter queries
    pub fn attribute(&self) -> &'static str {
        match self {
            IdentifierFilter::ByInstanceId(_) => attributes::INSTANCE_ID,
            IdentifierFilter::ByPrivateIp(_) => attributes::PRIVATE_IP_ADDRESS,
            IdentifierFilter::ByPublicIp(_) => attributes::IP_ADDRESS,
            IdentifierFilter::ByPublicDns(_) => attributes::DNS_NAME,
            IdentifierFilter::ByPrivateDns(_) => attributes::PRIVATE_DNS_NAME,
            IdentifierFilter::ByNameTag(_) => attributes::TAG_NAME,
        }
    }

    /// The identifier exactly as supplied
    pub fn value(&self) -> &str {
        match self {
            IdentifierFilter::ByInstanceId(v)
            | IdentifierFilter::ByPrivateIp(v)
            | IdentifierFilter::ByPublicIp(v)
            | IdentifierFilter::ByPublicDns(v)
            | IdentifierFilter::ByPrivateDns(v)
            | IdentifierFilter::ByNameTag(v) => v,
        }
    }

    /// Backend filter with the identifier as its sole value
    pub fn into_filter(self) -> Filter {
        let value = self.value().to_string();
        Filter::new(self.attribute(), vec![value])
    }
}

impl fmt::Display for IdentifierFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.attribute(), self.value())
    }
}

impl From<&str> for IdentifierFilter {
    fn from(identifier: &str) -> Self {
        classify(identifier)
    }
}

/// Classify an identifier by its shape
pub fn classify(identifier: &str) -> IdentifierFilter {
    let owned = identifier.to_string();

    if INSTANCE_ID_PREFIXES
        .iter()
        .any(|prefix| identifier.starts_with(prefix))
    {
        return IdentifierFilter::ByInstanceId(owned);
    }

    if let Ok(ip) = identifier.parse::<IpAddr>() {
        return if network::is_private(ip) {
            IdentifierFilter::ByPrivateIp(owned)
        } else {
            IdentifierFilter::ByPublicIp(owned)
        };
    }

    if identifier.ends_with(PUBLIC_DNS_SUFFIX) {
        return IdentifierFilter::ByPublicDns(owned);
    }

    if identifier.ends_with(PRIVATE_DNS_SUFFIX) {
        return IdentifierFilter::ByPrivateDns(owned);
    }

    IdentifierFilter::ByNameTag(owned)
}
