// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for instance resolution

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while resolving instances
///
/// Backend failures carry only the message reported by the inventory
/// service. `NoManagedInstances` and `NotFound` render the same text; callers
/// that need to tell them apart should match on the variant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolverError {
    /// Transport, auth or throttling failure from either inventory service
    #[error("{0}")]
    Backend(String),

    /// The agent inventory reported no online instances
    #[error("no ssm managed instances found")]
    NoManagedInstances,

    /// No virtual machine matched the identifier
    #[error("no ssm managed instances found")]
    NotFound { identifier: String },

    /// The operation deadline expired before the backend answered
    #[error("operation timed out after {0:?}")]
    Timeout(Duration),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ResolverError {
    /// Wrap any displayable backend failure
    pub fn backend(err: impl std::fmt::Display) -> Self {
        ResolverError::Backend(err.to_string())
    }

    /// True for errors raised by the backends or the deadline, as opposed to
    /// an empty result
    pub fn is_backend_failure(&self) -> bool {
        matches!(self, ResolverError::Backend(_) | ResolverError::Timeout(_))
    }
}

/// Result type for resolver operations
pub type ResolverResult<T> = Result<T, ResolverError>;
