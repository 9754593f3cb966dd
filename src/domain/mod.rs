// Copyright (c) 2025 - Cowboy AI, Inc.
//! Instance Resolution Domain Models
//!
//! Core concepts for turning a user-supplied identifier into compute
//! instances: the resolved [`Instance`] value, the records reported by the
//! two inventory services, and the pure identifier classifier.
//!
//! # Value Objects
//!
//! - [`Instance`] - Resolved `(name, id)` pair handed to callers
//! - [`IdentifierFilter`] - Which attribute an identifier names
//! - [`Cidr`] - IPv4/IPv6 network block with containment checks
//!
//! # Inventory Records
//!
//! - [`VmRecord`] - Virtual machine from the VM inventory
//! - [`AgentRecord`] - Machine with a management agent checking in

pub mod identifier;
pub mod instance;
pub mod network;

pub use identifier::{classify, IdentifierFilter};
pub use instance::{
    AgentRecord, AgentResourceType, Instance, PingStatus, Tag, VmRecord, VmState, NAME_TAG,
};
pub use network::{is_private, Cidr, NetworkError, PRIVATE_IPV4_BLOCKS};
