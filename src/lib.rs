// Copyright (c) 2025 - Cowboy AI, Inc.
//! Instance resolution for agent-managed compute fleets
//!
//! Resolves a human-supplied identifier (instance ID, IP address, DNS name
//! or Name tag) into the compute instances an operator can reach through
//! the fleet-management agent, by composing a VM inventory with an agent
//! inventory.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod inventory;
pub mod resolver;

// Re-export commonly used types
pub use config::ResolverConfig;
pub use domain::{classify, IdentifierFilter, Instance};
pub use errors::{ResolverError, ResolverResult};
pub use inventory::{AgentInventory, VmInventory};
pub use resolver::{InstanceFinder, InstanceResolver};
