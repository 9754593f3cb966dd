// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-memory inventories over fixed record sets
//!
//! Both types evaluate filters the way the real services do, remember every
//! query they receive, and can be told to fail or to stall so that error and
//! deadline paths can be exercised without a network.

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

use super::{attributes, AgentFilter, AgentInventory, Filter, VmInventory};
use crate::domain::{AgentRecord, VmRecord};
use crate::errors::{ResolverError, ResolverResult};

#[derive(Debug, Default)]
struct Behavior {
    failure: Option<String>,
    latency: Option<Duration>,
}

impl Behavior {
    async fn apply(&self) -> ResolverResult<()> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        match &self.failure {
            Some(message) => Err(ResolverError::Backend(message.clone())),
            None => Ok(()),
        }
    }
}

/// Agent inventory backed by a fixed list of records
#[derive(Debug, Default)]
pub struct InMemoryAgentInventory {
    records: Vec<AgentRecord>,
    behavior: Behavior,
    queries: Mutex<Vec<AgentFilter>>,
}

impl InMemoryAgentInventory {
    pub fn new(records: Vec<AgentRecord>) -> Self {
        Self {
            records,
            ..Default::default()
        }
    }

    /// Every call fails with a backend error carrying `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            behavior: Behavior {
                failure: Some(message.into()),
                latency: None,
            },
            ..Default::default()
        }
    }

    /// Delay every call by `latency` before answering
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.behavior.latency = Some(latency);
        self
    }

    /// Filters received so far, oldest first
    pub fn queries(&self) -> Vec<AgentFilter> {
        self.queries
            .lock()
            .map(|queries| queries.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.queries().len()
    }
}

#[async_trait]
impl AgentInventory for InMemoryAgentInventory {
    async fn list(&self, filter: &AgentFilter) -> ResolverResult<Vec<AgentRecord>> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(*filter);
        }
        self.behavior.apply().await?;

        let matched: Vec<AgentRecord> = self
            .records
            .iter()
            .filter(|record| record.ping_status == filter.ping_status)
            .cloned()
            .collect();
        debug!(
            "in-memory agent inventory matched {} of {} records",
            matched.len(),
            self.records.len()
        );
        Ok(matched)
    }
}

/// VM inventory backed by a fixed list of records
#[derive(Debug, Default)]
pub struct InMemoryVmInventory {
    records: Vec<VmRecord>,
    behavior: Behavior,
    queries: Mutex<Vec<Vec<Filter>>>,
}

impl InMemoryVmInventory {
    pub fn new(records: Vec<VmRecord>) -> Self {
        Self {
            records,
            ..Default::default()
        }
    }

    /// Every call fails with a backend error carrying `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            behavior: Behavior {
                failure: Some(message.into()),
                latency: None,
            },
            ..Default::default()
        }
    }

    /// Delay every call by `latency` before answering
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.behavior.latency = Some(latency);
        self
    }

    /// Filter sets received so far, oldest first
    pub fn queries(&self) -> Vec<Vec<Filter>> {
        self.queries
            .lock()
            .map(|queries| queries.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.queries().len()
    }
}

#[async_trait]
impl VmInventory for InMemoryVmInventory {
    async fn describe(&self, filters: &[Filter]) -> ResolverResult<Vec<VmRecord>> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(filters.to_vec());
        }
        self.behavior.apply().await?;

        let mut matched = Vec::new();
        for record in &self.records {
            if matches_all(record, filters)? {
                matched.push(record.clone());
            }
        }
        debug!(
            "in-memory vm inventory matched {} of {} records",
            matched.len(),
            self.records.len()
        );
        Ok(matched)
    }
}

fn matches_all(record: &VmRecord, filters: &[Filter]) -> ResolverResult<bool> {
    for filter in filters {
        if !matches(record, filter)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn matches(record: &VmRecord, filter: &Filter) -> ResolverResult<bool> {
    let accepts = |actual: Option<&str>| {
        actual.is_some_and(|actual| filter.values.iter().any(|value| value == actual))
    };

    let matched = match filter.name.as_str() {
        attributes::INSTANCE_ID => accepts(Some(record.instance_id.as_str())),
        attributes::INSTANCE_STATE_NAME => accepts(Some(record.state.as_str())),
        attributes::PRIVATE_IP_ADDRESS => accepts(record.private_ip.as_deref()),
        attributes::IP_ADDRESS => accepts(record.public_ip.as_deref()),
        attributes::DNS_NAME => accepts(record.public_dns.as_deref()),
        attributes::PRIVATE_DNS_NAME => accepts(record.private_dns.as_deref()),
        name => match name.strip_prefix(attributes::TAG_PREFIX) {
            // Any tag with the key may satisfy the filter, not just the first
            Some(key) => record
                .tags
                .iter()
                .any(|tag| tag.key == key && accepts(Some(tag.value.as_str()))),
            None => {
                return Err(ResolverError::Backend(format!(
                    "The filter '{}' is invalid",
                    name
                )))
            }
        },
    };
    Ok(matched)
}
