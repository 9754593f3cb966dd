// Copyright (c) 2025 - Cowboy AI, Inc.

//! Inventory Services - the two narrow query contracts the resolver depends on
//!
//! The resolver never talks to a cloud SDK directly. It sees only:
//!
//! - [`AgentInventory`]: machines with a management agent checking in
//! - [`VmInventory`]: provider-issued virtual machines, queryable by attribute
//!
//! # Filter Semantics
//!
//! ```text
//! describe([Filter(a, [x, y]), Filter(b, [z])])
//!     = records where (a ∈ {x, y}) AND (b = z)
//! ```
//!
//! Implementations live in [`memory`] (fixed record sets, used by tests) and
//! behind the `aws` feature in `crate::adapters`.
//!
//! # Example Implementation
//!
//! ```rust
//! use async_trait::async_trait;
//! use instance_resolver::domain::VmRecord;
//! use instance_resolver::inventory::{Filter, VmInventory};
//! use instance_resolver::ResolverResult;
//!
//! struct NoVms;
//!
//! #[async_trait]
//! impl VmInventory for NoVms {
//!     async fn describe(&self, _filters: &[Filter]) -> ResolverResult<Vec<VmRecord>> {
//!         Ok(Vec::new())
//!     }
//! }
//! ```

pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::domain::{AgentRecord, PingStatus, VmRecord, VmState};
use crate::errors::ResolverResult;

/// VM inventory attribute names understood by [`VmInventory::describe`]
pub mod attributes {
    pub const INSTANCE_ID: &str = "instance-id";
    pub const INSTANCE_STATE_NAME: &str = "instance-state-name";
    pub const PRIVATE_IP_ADDRESS: &str = "private-ip-address";
    pub const IP_ADDRESS: &str = "ip-address";
    pub const DNS_NAME: &str = "dns-name";
    pub const PRIVATE_DNS_NAME: &str = "private-dns-name";
    pub const TAG_NAME: &str = "tag:Name";

    /// Prefix for tag filters (`tag:<key>`)
    pub const TAG_PREFIX: &str = "tag:";
}

/// A VM inventory predicate: attribute equals any of `values`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Filter {
    pub name: String,
    pub values: Vec<String>,
}

impl Filter {
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// `instance-id ∈ ids`
    pub fn instance_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            attributes::INSTANCE_ID,
            ids.into_iter().map(Into::into).collect(),
        )
    }

    /// `instance-state-name = running`
    pub fn running() -> Self {
        Self::new(
            attributes::INSTANCE_STATE_NAME,
            vec![VmState::Running.as_str().to_string()],
        )
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=[{}]", self.name, self.values.join(","))
    }
}

/// Agent inventory predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentFilter {
    pub ping_status: PingStatus,
}

impl AgentFilter {
    /// Agents currently checking in
    pub fn online() -> Self {
        Self {
            ping_status: PingStatus::Online,
        }
    }
}

/// Agent-based managed-instance inventory
#[async_trait]
pub trait AgentInventory: Send + Sync {
    /// List agent records matching the filter
    async fn list(&self, filter: &AgentFilter) -> ResolverResult<Vec<AgentRecord>>;
}

/// Virtual-machine inventory
#[async_trait]
pub trait VmInventory: Send + Sync {
    /// Describe VM records matching every filter
    ///
    /// Filters are ANDed and the values inside one filter are ORed. An
    /// attribute the backend does not understand is an error.
    async fn describe(&self, filters: &[Filter]) -> ResolverResult<Vec<VmRecord>>;
}

#[async_trait]
impl<T: AgentInventory + ?Sized> AgentInventory for Arc<T> {
    async fn list(&self, filter: &AgentFilter) -> ResolverResult<Vec<AgentRecord>> {
        (**self).list(filter).await
    }
}

#[async_trait]
impl<T: VmInventory + ?Sized> VmInventory for Arc<T> {
    async fn describe(&self, filters: &[Filter]) -> ResolverResult<Vec<VmRecord>> {
        (**self).describe(filters).await
    }
}
