// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resolver configuration
//!
//! Only the operation timeout is interpreted here. Region and profile are
//! handed to the cloud SDK untouched; credentials are resolved entirely by
//! the SDK's own provider chain.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::{ResolverError, ResolverResult};

/// Environment variable holding the timeout in whole seconds
pub const TIMEOUT_ENV: &str = "INSTANCE_RESOLVER_TIMEOUT_SECS";
/// Environment variable naming the cloud region
pub const REGION_ENV: &str = "AWS_REGION";
/// Environment variable naming the shared-config profile
pub const PROFILE_ENV: &str = "AWS_PROFILE";

/// Configuration for an [`InstanceResolver`](crate::InstanceResolver)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Deadline for each resolver operation, in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Region override; the SDK default chain applies when absent
    #[serde(default)]
    pub region: Option<String>,

    /// Shared-config profile override
    #[serde(default)]
    pub profile: Option<String>,
}

fn default_timeout() -> u64 {
    30
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            region: None,
            profile: None,
        }
    }
}

impl ResolverConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> ResolverResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> ResolverResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs = match lookup(TIMEOUT_ENV) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                ResolverError::Configuration(format!("{} is not a number: {:?}", TIMEOUT_ENV, raw))
            })?,
            None => default_timeout(),
        };

        let config = Self {
            timeout_secs,
            region: lookup(REGION_ENV).filter(|s| !s.is_empty()),
            profile: lookup(PROFILE_ENV).filter(|s| !s.is_empty()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make every operation fail
    pub fn validate(&self) -> ResolverResult<()> {
        if self.timeout_secs == 0 {
            return Err(ResolverError::Configuration(
                "timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
