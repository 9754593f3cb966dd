// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! - `classification`: identifier classification rules
//! - `resolution`: merge and lookup guarantees of the resolver

mod classification;
mod resolution;
