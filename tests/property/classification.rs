// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Identifier Classification

use instance_resolver::{classify, IdentifierFilter};
use proptest::prelude::*;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

// ============================================================================
// Generators
// ============================================================================

fn private_ipv4() -> impl Strategy<Value = Ipv4Addr> {
    prop_oneof![
        any::<[u8; 3]>().prop_map(|[b, c, d]| Ipv4Addr::new(10, b, c, d)),
        (16u8..=31, any::<[u8; 2]>()).prop_map(|(b, [c, d])| Ipv4Addr::new(172, b, c, d)),
        any::<[u8; 2]>().prop_map(|[c, d]| Ipv4Addr::new(192, 168, c, d)),
    ]
}

fn public_ipv4() -> impl Strategy<Value = Ipv4Addr> {
    any::<u32>()
        .prop_map(Ipv4Addr::from)
        .prop_filter("outside RFC 1918", |ip| {
            let [a, b, _, _] = ip.octets();
            !(a == 10 || (a == 172 && (16..=31).contains(&b)) || (a == 192 && b == 168))
        })
}

/// Lowercase hostnames that never look like an ID, IP or AWS DNS name
fn plain_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,30}".prop_filter("no instance id prefix", |s| {
        !s.starts_with("i-") && !s.starts_with("mi-")
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Property: Instance ID prefixes win regardless of the rest of the string
    #[test]
    fn prop_prefix_means_instance_id(prefix in prop_oneof![Just("i-"), Just("mi-")], rest in ".*") {
        let identifier = format!("{}{}", prefix, rest);
        prop_assert_eq!(classify(&identifier), IdentifierFilter::ByInstanceId(identifier.clone()));
    }

    /// Property: Every RFC 1918 address is private
    #[test]
    fn prop_private_ipv4(ip in private_ipv4()) {
        let identifier = ip.to_string();
        prop_assert_eq!(classify(&identifier), IdentifierFilter::ByPrivateIp(identifier.clone()));
    }

    /// Property: Every other IPv4 address is public
    #[test]
    fn prop_public_ipv4(ip in public_ipv4()) {
        let identifier = ip.to_string();
        prop_assert_eq!(classify(&identifier), IdentifierFilter::ByPublicIp(identifier.clone()));
    }

    /// Property: Native IPv6 addresses are always public
    #[test]
    fn prop_ipv6_is_public(segments in any::<[u16; 8]>()) {
        let ip = Ipv6Addr::from(segments);
        prop_assume!(ip.to_ipv4_mapped().is_none());
        let identifier = IpAddr::V6(ip).to_string();
        prop_assert_eq!(classify(&identifier), IdentifierFilter::ByPublicIp(identifier.clone()));
    }

    /// Property: AWS DNS suffixes select the matching DNS attribute
    #[test]
    fn prop_dns_suffixes(host in plain_name()) {
        let public = format!("{}.compute.amazonaws.com", host);
        let private = format!("{}.compute.internal", host);
        prop_assert_eq!(classify(&public), IdentifierFilter::ByPublicDns(public.clone()));
        prop_assert_eq!(classify(&private), IdentifierFilter::ByPrivateDns(private.clone()));
    }

    /// Property: Anything unrecognised is looked up by Name tag
    #[test]
    fn prop_plain_names_are_name_tags(name in plain_name()) {
        prop_assert_eq!(classify(&name), IdentifierFilter::ByNameTag(name.clone()));
    }

    /// Property: Classification is total and keeps the identifier intact
    #[test]
    fn prop_value_is_preserved(identifier in ".*") {
        let filter = classify(&identifier);
        prop_assert_eq!(filter.value(), identifier.as_str());

        let backend = filter.into_filter();
        prop_assert_eq!(backend.values, vec![identifier.clone()]);
    }
}
