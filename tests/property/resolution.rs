// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Instance Resolution
//!
//! Random fleets are generated from a pool of IDs so that agent records and
//! VM records overlap, then the resolver's guarantees are checked against a
//! model computed directly from the generated records.

use instance_resolver::domain::{AgentRecord, AgentResourceType, PingStatus, VmRecord, VmState};
use instance_resolver::inventory::memory::{InMemoryAgentInventory, InMemoryVmInventory};
use instance_resolver::{Instance, InstanceFinder, InstanceResolver, ResolverError};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

// ============================================================================
// Generators
// ============================================================================

fn ping_status() -> impl Strategy<Value = PingStatus> {
    prop_oneof![
        3 => Just(PingStatus::Online),
        1 => Just(PingStatus::ConnectionLost),
        1 => Just(PingStatus::Inactive),
    ]
}

fn vm_state() -> impl Strategy<Value = VmState> {
    prop_oneof![
        3 => Just(VmState::Running),
        1 => Just(VmState::Stopped),
        1 => Just(VmState::Pending),
        1 => Just(VmState::Terminated),
    ]
}

/// Agent records keyed by ID so that IDs are unique
fn agent_records() -> impl Strategy<Value = Vec<AgentRecord>> {
    prop::collection::btree_map(0u8..16, (any::<bool>(), ping_status()), 0..12).prop_map(
        |entries: BTreeMap<u8, (bool, PingStatus)>| {
            entries
                .into_iter()
                .map(|(n, (vm_backed, status))| {
                    let record = if vm_backed {
                        AgentRecord::vm(format!("i-{:04}", n))
                    } else {
                        AgentRecord::managed(format!("mi-{:04}", n), format!("host{}", n))
                    };
                    record.with_ping_status(status)
                })
                .collect()
        },
    )
}

/// VM records keyed by ID, with a Name tag drawn from a small pool
fn vm_records() -> impl Strategy<Value = Vec<VmRecord>> {
    prop::collection::btree_map(0u8..16, (vm_state(), prop::option::of(0u8..4)), 0..12).prop_map(
        |entries: BTreeMap<u8, (VmState, Option<u8>)>| {
            entries
                .into_iter()
                .map(|(n, (state, name))| {
                    let record = VmRecord::new(format!("i-{:04}", n)).with_state(state);
                    match name {
                        Some(name) => record.with_tag("Name", format!("name{}", name)),
                        None => record,
                    }
                })
                .collect()
        },
    )
}

fn resolver(
    agents: Vec<AgentRecord>,
    vms: Vec<VmRecord>,
) -> InstanceResolver<InMemoryAgentInventory, InMemoryVmInventory> {
    InstanceResolver::new(
        Duration::from_secs(5),
        InMemoryAgentInventory::new(agents),
        InMemoryVmInventory::new(vms),
    )
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Property: find_all returns exactly the running VM-backed agents plus
    /// the online agent-only hosts, and fails when no agent is online
    #[test]
    fn prop_find_all_matches_model(agents in agent_records(), vms in vm_records()) {
        let online: Vec<&AgentRecord> = agents
            .iter()
            .filter(|a| a.ping_status == PingStatus::Online)
            .collect();
        let running: BTreeSet<&str> = vms
            .iter()
            .filter(|vm| vm.state == VmState::Running)
            .map(|vm| vm.instance_id.as_str())
            .collect();

        let mut expected: Vec<Instance> = online
            .iter()
            .filter_map(|agent| match agent.resource_type {
                AgentResourceType::VmInstance => running.contains(agent.id.as_str()).then(|| {
                    let vm = vms.iter().find(|vm| vm.instance_id == agent.id).unwrap();
                    vm.to_instance()
                }),
                _ => Some(agent.to_instance()),
            })
            .collect();
        expected.sort();

        let result = tokio_test::block_on(resolver(agents.clone(), vms.clone()).find_all());

        if online.is_empty() {
            prop_assert_eq!(result, Err(ResolverError::NoManagedInstances));
        } else {
            let mut instances = result.unwrap();
            instances.sort();
            prop_assert_eq!(instances, expected);
        }
    }

    /// Property: every instance find_all returns was reported by a backend
    #[test]
    fn prop_find_all_never_invents(agents in agent_records(), vms in vm_records()) {
        let known: BTreeSet<&str> = agents.iter().map(|a| a.id.as_str()).collect();

        if let Ok(instances) = tokio_test::block_on(resolver(agents.clone(), vms.clone()).find_all()) {
            for instance in &instances {
                prop_assert!(known.contains(instance.id.as_str()));
            }
            let unique: BTreeSet<&str> = instances.iter().map(|i| i.id.as_str()).collect();
            prop_assert_eq!(unique.len(), instances.len());
        }
    }

    /// Property: a Name tag lookup returns every VM carrying that name, in
    /// any state, or NotFound
    #[test]
    fn prop_find_by_name(vms in vm_records(), name in 0u8..5) {
        let name = format!("name{}", name);
        let mut expected: Vec<Instance> = vms
            .iter()
            .filter(|vm| vm.name_tag() == name)
            .map(VmRecord::to_instance)
            .collect();
        expected.sort();

        let resolver = resolver(Vec::new(), vms);
        let first = tokio_test::block_on(resolver.find_by_identifier(&name));
        let second = tokio_test::block_on(resolver.find_by_identifier(&name));
        prop_assert_eq!(&first, &second);

        match first {
            Ok(mut instances) => {
                instances.sort();
                prop_assert!(!instances.is_empty());
                prop_assert_eq!(instances, expected);
            }
            Err(err) => {
                prop_assert!(expected.is_empty());
                prop_assert_eq!(err, ResolverError::NotFound { identifier: name.clone() });
            }
        }
    }
}
