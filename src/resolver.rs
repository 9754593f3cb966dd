// Copyright (c) 2025 - Cowboy AI, Inc.
//! Instance Resolver
//!
//! Composes the agent inventory and the VM inventory into a list of
//! instances an operator can connect to.
//!
//! # Data Flow
//!
//! ```text
//! find_all()
//!     ├─► AgentInventory.list(ping status = Online)
//!     │      → { VM-backed records } ∪ { agent-only records }
//!     └─► VmInventory.describe(instance-id ∈ VM-backed, state = running)
//!            → VM records (named by their Name tag) ++ agent-only records
//!
//! find_by_identifier(id)
//!     └─► classify(id) → VmInventory.describe(classified filter)
//! ```
//!
//! Each public operation runs under a single deadline that every outbound
//! call it makes shares. Failures are returned as they arrive, without retries.

use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

use crate::domain::{classify, AgentRecord, Instance};
use crate::errors::{ResolverError, ResolverResult};
use crate::inventory::{AgentFilter, AgentInventory, Filter, VmInventory};

/// Operations offered to callers that need instances to act on
#[async_trait]
pub trait InstanceFinder: Send + Sync {
    /// Every online agent-reachable instance
    ///
    /// VM-backed agents are kept only while their VM is running. Fails with
    /// [`ResolverError::NoManagedInstances`] when no agent is online.
    async fn find_all(&self) -> ResolverResult<Vec<Instance>>;

    /// Instances matching a free-form identifier
    ///
    /// Never returns an empty list; fails with [`ResolverError::NotFound`]
    /// instead.
    async fn find_by_identifier(&self, identifier: &str) -> ResolverResult<Vec<Instance>>;
}

/// Resolver over one agent inventory and one VM inventory
///
/// Holds no state besides its configuration, so a single value can be
/// shared by reference for the life of the process.
#[derive(Debug, Clone)]
pub struct InstanceResolver<A, V> {
    timeout: Duration,
    agents: A,
    vms: V,
}

impl<A, V> InstanceResolver<A, V>
where
    A: AgentInventory,
    V: VmInventory,
{
    pub fn new(timeout: Duration, agents: A, vms: V) -> Self {
        Self {
            timeout,
            agents,
            vms,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn agents(&self) -> &A {
        &self.agents
    }

    pub fn vms(&self) -> &V {
        &self.vms
    }

    fn deadline(&self) -> Instant {
        let now = Instant::now();
        // Overflow only happens for absurd timeouts; treat those as unbounded.
        now.checked_add(self.timeout)
            .unwrap_or_else(|| now + Duration::from_secs(86400 * 365 * 30))
    }

    async fn within<T, F>(&self, deadline: Instant, call: F) -> ResolverResult<T>
    where
        F: Future<Output = ResolverResult<T>>,
    {
        tokio::time::timeout_at(deadline, call)
            .await
            .map_err(|_| ResolverError::Timeout(self.timeout))?
    }

    /// Online agent records split into (VM-backed, agent-only)
    async fn online_agents(
        &self,
        deadline: Instant,
    ) -> ResolverResult<(Vec<AgentRecord>, Vec<AgentRecord>)> {
        let records = self
            .within(deadline, self.agents.list(&AgentFilter::online()))
            .await?;
        if records.is_empty() {
            return Err(ResolverError::NoManagedInstances);
        }

        let (vm_backed, managed): (Vec<_>, Vec<_>) = records
            .into_iter()
            .partition(|record| record.resource_type.is_vm_backed());
        debug!(
            "agent inventory reported {} vm-backed and {} managed instances online",
            vm_backed.len(),
            managed.len()
        );
        Ok((vm_backed, managed))
    }

    async fn describe(
        &self,
        deadline: Instant,
        filters: &[Filter],
    ) -> ResolverResult<Vec<Instance>> {
        let records = self.within(deadline, self.vms.describe(filters)).await?;
        Ok(records.iter().map(|record| record.to_instance()).collect())
    }
}

#[async_trait]
impl<A, V> InstanceFinder for InstanceResolver<A, V>
where
    A: AgentInventory,
    V: VmInventory,
{
    async fn find_all(&self) -> ResolverResult<Vec<Instance>> {
        let deadline = self.deadline();
        let (vm_backed, managed) = self.online_agents(deadline).await?;

        let mut instances = Vec::with_capacity(vm_backed.len() + managed.len());
        if !vm_backed.is_empty() {
            let filters = [
                Filter::running(),
                Filter::instance_ids(vm_backed.into_iter().map(|record| record.id)),
            ];
            let running = self.describe(deadline, &filters).await?;
            debug!("vm inventory confirmed {} running instances", running.len());
            instances.extend(running);
        }
        instances.extend(managed.iter().map(AgentRecord::to_instance));

        Ok(instances)
    }

    async fn find_by_identifier(&self, identifier: &str) -> ResolverResult<Vec<Instance>> {
        let deadline = self.deadline();
        let filter = classify(identifier);
        debug!("resolving {:?} as {}", identifier, filter);

        let instances = self.describe(deadline, &[filter.into_filter()]).await?;
        if instances.is_empty() {
            return Err(ResolverError::NotFound {
                identifier: identifier.to_string(),
            });
        }
        Ok(instances)
    }
}
