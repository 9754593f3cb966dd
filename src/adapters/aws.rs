// Copyright (c) 2025 - Cowboy AI, Inc.

//! AWS Inventory Adapters
//!
//! Backs the two inventory contracts with the AWS SDK:
//!
//! ```text
//! AgentInventory.list      = SSM DescribeInstanceInformation(PingStatus filter)
//! VmInventory.describe     = EC2 DescribeInstances(filters), reservations flattened
//! ```
//!
//! Only the first page of each response is read. SDK errors are rendered
//! with their full context and surfaced as [`ResolverError::Backend`].
//!
//! # Example
//!
//! ```rust,no_run
//! use instance_resolver::{InstanceFinder, InstanceResolver, ResolverConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ResolverConfig::from_env()?;
//!     let resolver = InstanceResolver::from_config(&config).await;
//!
//!     for instance in resolver.find_by_identifier("web01").await? {
//!         println!("{}", instance);
//!     }
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_ec2::config::Region;
use aws_sdk_ec2::error::DisplayErrorContext;
use aws_sdk_ec2::types::{Filter as Ec2Filter, Reservation};
use aws_sdk_ssm::types::{
    InstanceInformation, InstanceInformationStringFilter, PingStatus as SsmPingStatus,
    ResourceType,
};
use tracing::debug;

use crate::config::ResolverConfig;
use crate::domain::{AgentRecord, AgentResourceType, PingStatus, Tag, VmRecord, VmState};
use crate::errors::{ResolverError, ResolverResult};
use crate::inventory::{AgentFilter, AgentInventory, Filter, VmInventory};
use crate::resolver::InstanceResolver;

const PING_STATUS_KEY: &str = "PingStatus";

/// Resolve region, profile and credentials the way the AWS CLI does
pub async fn load_sdk_config(config: &ResolverConfig) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = &config.region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some(profile) = &config.profile {
        loader = loader.profile_name(profile);
    }
    loader.load().await
}

/// VM inventory over EC2 `DescribeInstances`
#[derive(Debug, Clone)]
pub struct Ec2Inventory {
    client: aws_sdk_ec2::Client,
}

impl Ec2Inventory {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self::from_client(aws_sdk_ec2::Client::new(sdk_config))
    }

    pub fn from_client(client: aws_sdk_ec2::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VmInventory for Ec2Inventory {
    async fn describe(&self, filters: &[Filter]) -> ResolverResult<Vec<VmRecord>> {
        let filters: Vec<Ec2Filter> = filters
            .iter()
            .map(|filter| {
                Ec2Filter::builder()
                    .name(filter.name.as_str())
                    .set_values(Some(filter.values.clone()))
                    .build()
            })
            .collect();

        let output = self
            .client
            .describe_instances()
            .set_filters(Some(filters))
            .send()
            .await
            .map_err(|e| ResolverError::backend(DisplayErrorContext(e)))?;

        let records = vm_records(output.reservations());
        debug!("DescribeInstances returned {} instances", records.len());
        Ok(records)
    }
}

/// Every instance of every reservation, in response order
fn vm_records(reservations: &[Reservation]) -> Vec<VmRecord> {
    reservations
        .iter()
        .flat_map(|reservation| reservation.instances())
        .filter_map(to_vm_record)
        .collect()
}

fn to_vm_record(instance: &aws_sdk_ec2::types::Instance) -> Option<VmRecord> {
    let instance_id = instance.instance_id()?;
    let state = instance
        .state()
        .and_then(|state| state.name())
        .map(|name| VmState::from(name.as_str()))
        .unwrap_or_else(|| VmState::Unknown(String::new()));
    let tags = instance
        .tags()
        .iter()
        .filter_map(|tag| Some(Tag::new(tag.key()?, tag.value().unwrap_or_default())))
        .collect();

    Some(VmRecord {
        instance_id: instance_id.to_string(),
        state,
        private_ip: instance.private_ip_address().map(str::to_string),
        public_ip: instance.public_ip_address().map(str::to_string),
        public_dns: instance.public_dns_name().map(str::to_string),
        private_dns: instance.private_dns_name().map(str::to_string),
        tags,
    })
}

/// Agent inventory over SSM `DescribeInstanceInformation`
#[derive(Debug, Clone)]
pub struct SsmInventory {
    client: aws_sdk_ssm::Client,
}

impl SsmInventory {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self::from_client(aws_sdk_ssm::Client::new(sdk_config))
    }

    pub fn from_client(client: aws_sdk_ssm::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AgentInventory for SsmInventory {
    async fn list(&self, filter: &AgentFilter) -> ResolverResult<Vec<AgentRecord>> {
        let ping_filter = InstanceInformationStringFilter::builder()
            .key(PING_STATUS_KEY)
            .values(filter.ping_status.as_str())
            .build()
            .map_err(ResolverError::backend)?;

        let output = self
            .client
            .describe_instance_information()
            .filters(ping_filter)
            .send()
            .await
            .map_err(|e| ResolverError::backend(aws_sdk_ssm::error::DisplayErrorContext(e)))?;

        let records: Vec<AgentRecord> = output
            .instance_information_list()
            .iter()
            .filter_map(|info| to_agent_record(info, filter.ping_status))
            .collect();
        debug!("DescribeInstanceInformation returned {} instances", records.len());
        Ok(records)
    }
}

fn to_agent_record(info: &InstanceInformation, requested: PingStatus) -> Option<AgentRecord> {
    let resource_type = match info.resource_type() {
        Some(ResourceType::Ec2Instance) => AgentResourceType::VmInstance,
        Some(ResourceType::ManagedInstance) => AgentResourceType::ManagedInstance,
        Some(other) => AgentResourceType::Other(other.as_str().to_string()),
        None => AgentResourceType::Other(String::new()),
    };
    let ping_status = match info.ping_status() {
        Some(SsmPingStatus::Online) => PingStatus::Online,
        Some(SsmPingStatus::ConnectionLost) => PingStatus::ConnectionLost,
        Some(SsmPingStatus::Inactive) => PingStatus::Inactive,
        // The service already filtered on this status
        _ => requested,
    };

    Some(AgentRecord {
        id: info.instance_id()?.to_string(),
        name: info.name().map(str::to_string),
        ping_status,
        resource_type,
    })
}

impl InstanceResolver<SsmInventory, Ec2Inventory> {
    /// Resolver over SSM and EC2 in the configured region
    pub async fn from_config(config: &ResolverConfig) -> Self {
        let sdk_config = load_sdk_config(config).await;
        Self::new(
            config.timeout(),
            SsmInventory::new(&sdk_config),
            Ec2Inventory::new(&sdk_config),
        )
    }
}
