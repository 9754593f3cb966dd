// Copyright (c) 2025 - Cowboy AI, Inc.

//! Inventory adapter implementations
//!
//! This module contains concrete implementations of the inventory traits
//! for real cloud backends.

#[cfg(feature = "aws")]
pub mod aws;

#[cfg(feature = "aws")]
pub use aws::{load_sdk_config, Ec2Inventory, SsmInventory};
