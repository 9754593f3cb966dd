// Copyright (c) 2025 - Cowboy AI, Inc.
//! Instance and Inventory Record Models
//!
//! [`Instance`] is the only value the resolver hands back to callers. The
//! record types mirror what the two inventory services report and are used
//! only while a single resolution call is in flight.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag key holding an instance's human-readable name
pub const NAME_TAG: &str = "Name";

/// A resolved compute instance
///
/// `name` is empty when the instance carries no Name tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Instance {
    pub name: String,
    pub id: String,
}

impl Instance {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.name, self.id)
    }
}

/// Key/value tag attached to a virtual machine
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Virtual machine lifecycle state as reported by the VM inventory
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VmState {
    Pending,
    Running,
    ShuttingDown,
    Terminated,
    Stopping,
    Stopped,
    Unknown(String),
}

impl VmState {
    /// Wire name used by the `instance-state-name` filter
    pub fn as_str(&self) -> &str {
        match self {
            VmState::Pending => "pending",
            VmState::Running => "running",
            VmState::ShuttingDown => "shutting-down",
            VmState::Terminated => "terminated",
            VmState::Stopping => "stopping",
            VmState::Stopped => "stopped",
            VmState::Unknown(other) => other,
        }
    }
}

impl From<&str> for VmState {
    fn from(state: &str) -> Self {
        match state {
            "pending" => VmState::Pending,
            "running" => VmState::Running,
            "shutting-down" => VmState::ShuttingDown,
            "terminated" => VmState::Terminated,
            "stopping" => VmState::Stopping,
            "stopped" => VmState::Stopped,
            other => VmState::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for VmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A virtual machine record from the VM inventory
///
/// Reservations are flattened away; each record is one instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmRecord {
    pub instance_id: String,
    pub state: VmState,
    pub private_ip: Option<String>,
    pub public_ip: Option<String>,
    pub public_dns: Option<String>,
    pub private_dns: Option<String>,
    pub tags: Vec<Tag>,
}

impl VmRecord {
    /// Running record with no addresses and no tags
    pub fn new(instance_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            state: VmState::Running,
            private_ip: None,
            public_ip: None,
            public_dns: None,
            private_dns: None,
            tags: Vec::new(),
        }
    }

    pub fn with_state(mut self, state: VmState) -> Self {
        self.state = state;
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push(Tag::new(key, value));
        self
    }

    pub fn with_private_ip(mut self, ip: impl Into<String>) -> Self {
        self.private_ip = Some(ip.into());
        self
    }

    pub fn with_public_ip(mut self, ip: impl Into<String>) -> Self {
        self.public_ip = Some(ip.into());
        self
    }

    pub fn with_public_dns(mut self, dns: impl Into<String>) -> Self {
        self.public_dns = Some(dns.into());
        self
    }

    pub fn with_private_dns(mut self, dns: impl Into<String>) -> Self {
        self.private_dns = Some(dns.into());
        self
    }

    /// Value of the first tag with the given key
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|tag| tag.key == key)
            .map(|tag| tag.value.as_str())
    }

    /// Value of the first Name tag, or an empty string when untagged
    pub fn name_tag(&self) -> &str {
        self.tag(NAME_TAG).unwrap_or_default()
    }

    pub fn to_instance(&self) -> Instance {
        Instance::new(self.name_tag(), self.instance_id.as_str())
    }
}

/// Agent connectivity state reported by the agent inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PingStatus {
    Online,
    ConnectionLost,
    Inactive,
}

impl PingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PingStatus::Online => "Online",
            PingStatus::ConnectionLost => "ConnectionLost",
            PingStatus::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for PingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of machine an agent record describes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentResourceType {
    /// Backed by a provider-issued virtual machine
    VmInstance,
    /// Registered hybrid host (on-premises or another cloud)
    ManagedInstance,
    Other(String),
}

impl AgentResourceType {
    pub fn is_vm_backed(&self) -> bool {
        matches!(self, AgentResourceType::VmInstance)
    }
}

/// A machine known to the agent inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRecord {
    pub id: String,
    pub name: Option<String>,
    pub ping_status: PingStatus,
    pub resource_type: AgentResourceType,
}

impl AgentRecord {
    /// Online record for a VM-backed agent
    pub fn vm(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            ping_status: PingStatus::Online,
            resource_type: AgentResourceType::VmInstance,
        }
    }

    /// Online record for an agent-only managed instance
    pub fn managed(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            ping_status: PingStatus::Online,
            resource_type: AgentResourceType::ManagedInstance,
        }
    }

    pub fn with_ping_status(mut self, ping_status: PingStatus) -> Self {
        self.ping_status = ping_status;
        self
    }

    pub fn to_instance(&self) -> Instance {
        Instance::new(self.name.clone().unwrap_or_default(), self.id.as_str())
    }
}
