// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for instance-resolver
//!
//! A small, fixed fleet shared by the integration tests:
//!
//! | id        | agent          | vm state | Name tag |
//! |-----------|----------------|----------|----------|
//! | i-web01   | online, vm     | running  | web01    |
//! | i-web02   | online, vm     | running  | web02    |
//! | i-batch   | online, vm     | stopped  | batch    |
//! | i-legacy  | lost, vm       | running  | legacy   |
//! | i-noagent | -              | running  | bastion  |
//! | mi-nas01  | online, hybrid | -        | -        |
//! | mi-rack7  | inactive       | -        | -        |

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use instance_resolver::domain::{AgentRecord, PingStatus, VmRecord, VmState};
use instance_resolver::inventory::memory::{InMemoryAgentInventory, InMemoryVmInventory};
use instance_resolver::InstanceResolver;

pub type FleetResolver = InstanceResolver<Arc<InMemoryAgentInventory>, Arc<InMemoryVmInventory>>;

pub const TIMEOUT: Duration = Duration::from_secs(10);

pub fn agent_records() -> Vec<AgentRecord> {
    vec![
        AgentRecord::vm("i-web01"),
        AgentRecord::vm("i-web02"),
        AgentRecord::vm("i-batch"),
        AgentRecord::vm("i-legacy").with_ping_status(PingStatus::ConnectionLost),
        AgentRecord::managed("mi-nas01", "nas01"),
        AgentRecord::managed("mi-rack7", "rack7").with_ping_status(PingStatus::Inactive),
    ]
}

pub fn vm_records() -> Vec<VmRecord> {
    vec![
        VmRecord::new("i-web01")
            .with_tag("Name", "web01")
            .with_tag("team", "frontend")
            .with_private_ip("10.0.1.10")
            .with_public_ip("54.200.1.10")
            .with_public_dns("ec2-54-200-1-10.us-west-2.compute.amazonaws.com")
            .with_private_dns("ip-10-0-1-10.us-west-2.compute.internal"),
        VmRecord::new("i-web02")
            .with_tag("Name", "web02")
            .with_private_ip("172.20.4.2"),
        VmRecord::new("i-batch")
            .with_tag("Name", "batch")
            .with_state(VmState::Stopped)
            .with_private_ip("192.168.7.7"),
        VmRecord::new("i-legacy").with_tag("Name", "legacy"),
        VmRecord::new("i-noagent")
            .with_tag("Name", "bastion")
            .with_public_ip("3.3.3.3"),
    ]
}

pub fn fleet_resolver() -> FleetResolver {
    resolver(
        InMemoryAgentInventory::new(agent_records()),
        InMemoryVmInventory::new(vm_records()),
    )
}

pub fn resolver(agents: InMemoryAgentInventory, vms: InMemoryVmInventory) -> FleetResolver {
    InstanceResolver::new(TIMEOUT, Arc::new(agents), Arc::new(vms))
}
