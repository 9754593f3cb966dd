// Copyright (c) 2025 - Cowboy AI, Inc.
//! Instance Resolver CLI
//!
//! Lists agent-reachable instances, or resolves one identifier to the
//! instances it names.
//!
//! Run with: cargo run --bin instance-resolver --features aws -- [IDENTIFIER]
//!
//! At most one identifier is accepted; anything more is a usage error.
//!
//! Environment:
//! 1. INSTANCE_RESOLVER_TIMEOUT_SECS - deadline per lookup (default: 30)
//! 2. AWS_REGION / AWS_PROFILE - passed to the AWS SDK
//! 3. INSTANCE_RESOLVER_OUTPUT - `json` for JSON output, tab-separated otherwise

use anyhow::{bail, Context, Result};
use instance_resolver::{InstanceFinder, InstanceResolver, ResolverConfig};
use tracing::info;

/// How resolved instances are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Tsv,
    Json,
}

impl OutputFormat {
    fn from_env() -> Self {
        match std::env::var("INSTANCE_RESOLVER_OUTPUT").as_deref() {
            Ok("json") => OutputFormat::Json,
            _ => OutputFormat::Tsv,
        }
    }
}

const USAGE: &str = "usage: instance-resolver [IDENTIFIER]";

/// The optional identifier from the arguments after the program name
fn identifier_from_args(mut args: impl Iterator<Item = String>) -> Result<Option<String>> {
    let identifier = args.next();
    if args.next().is_some() {
        bail!(USAGE);
    }
    Ok(identifier)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = ResolverConfig::from_env().context("Failed to load configuration")?;
    let format = OutputFormat::from_env();
    let identifier = identifier_from_args(std::env::args().skip(1))?;

    info!(
        "Resolving {} (region: {}, timeout: {}s)",
        identifier.as_deref().unwrap_or("all online instances"),
        config.region.as_deref().unwrap_or("default"),
        config.timeout_secs
    );

    let resolver = InstanceResolver::from_config(&config).await;
    let instances = match identifier.as_deref() {
        Some(identifier) => resolver.find_by_identifier(identifier).await?,
        None => resolver.find_all().await?,
    };
    info!("Resolved {} instances", instances.len());

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&instances)?);
        }
        OutputFormat::Tsv => {
            for instance in &instances {
                println!("{}", instance);
            }
        }
    }

    Ok(())
}
