//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Short-circuit on a broken hub connection
//! - Determinism of evaluation
//! - Monotonicity when a single violating fact is added
//! - Case-insensitive hub peering lookup

use crate::engine::evaluate;
use crate::model::{
    PeeringRecord, PeeringState, SecurityGroupSummary, SubnetAssociation, SyncLevel,
    TopologySnapshot,
};
use crate::summary::{summarize, NO_ISSUES_NARRATIVE};
use crate::test_support::{DEFAULT_RT, HUB};
use proptest::prelude::*;
use spokecheck_types::{ids, Severity};

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

fn arb_name() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9-]{0,15}").unwrap()
}

fn arb_ip() -> impl Strategy<Value = String> {
    (1u8..=254, 0u8..=255, 0u8..=255, 1u8..=254)
        .prop_map(|(a, b, c, d)| format!("{a}.{b}.{c}.{d}"))
}

fn arb_state() -> impl Strategy<Value = PeeringState> {
    prop_oneof![
        Just(PeeringState::Connected),
        Just(PeeringState::Disconnected),
        Just(PeeringState::Initiated),
    ]
}

fn arb_sync() -> impl Strategy<Value = SyncLevel> {
    prop_oneof![Just(SyncLevel::FullyInSync), Just(SyncLevel::OutOfSync)]
}

/// Flip the case of some ASCII letters, driven by a bit mask.
fn mixed_case(s: &str, mask: u64) -> String {
    s.chars()
        .enumerate()
        .map(|(i, c)| {
            if mask & (1 << (i % 64)) != 0 {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

fn arb_peering() -> impl Strategy<Value = PeeringRecord> {
    (
        arb_name(),
        prop_oneof![Just(HUB.to_string()), arb_name()],
        arb_state(),
        arb_sync(),
    )
        .prop_map(|(name, remote, state, sync)| PeeringRecord {
            name,
            remote_network_id: remote,
            peering_state: state,
            sync_level: sync,
        })
}

fn arb_snapshot() -> impl Strategy<Value = TopologySnapshot> {
    (
        prop::collection::vec(arb_peering(), 0..4),
        prop::collection::vec((arb_name(), 0u32..5), 0..4),
        prop::collection::vec(
            (arb_name(), prop_oneof![
                Just(None),
                Just(Some(DEFAULT_RT.to_string())),
                arb_name().prop_map(Some),
            ]),
            0..5,
        ),
        prop::collection::vec(arb_ip(), 0..3),
        prop::collection::vec(arb_ip(), 0..3),
    )
        .prop_map(|(peerings, nsgs, subnets, dns, allowed)| TopologySnapshot {
            hub_network_id: HUB.to_string(),
            peerings,
            security_groups: nsgs
                .into_iter()
                .map(|(name, rule_count)| SecurityGroupSummary {
                    id: format!("/nsg/{name}"),
                    name,
                    rule_count,
                })
                .collect(),
            subnets: subnets
                .into_iter()
                .map(|(name, rt)| SubnetAssociation {
                    name,
                    security_group_ref: None,
                    route_table_ref: rt,
                })
                .collect(),
            default_route_table_ref: DEFAULT_RT.to_string(),
            dns_servers: dns,
            allowed_dns_servers: allowed,
            address_spaces: Vec::new(),
        })
}

/// Snapshots where every rule stays silent.
fn arb_passing_snapshot() -> impl Strategy<Value = TopologySnapshot> {
    (
        prop::collection::vec(arb_name(), 0..4),
        prop::collection::vec(arb_name(), 0..5),
        prop::collection::vec(arb_ip(), 0..3),
        any::<bool>(),
    )
        .prop_map(|(nsgs, subnets, allowed, use_allowed)| TopologySnapshot {
            hub_network_id: HUB.to_string(),
            peerings: vec![PeeringRecord {
                name: "spoke-to-hub".to_string(),
                remote_network_id: HUB.to_string(),
                peering_state: PeeringState::Connected,
                sync_level: SyncLevel::FullyInSync,
            }],
            security_groups: nsgs
                .into_iter()
                .map(|name| SecurityGroupSummary {
                    id: format!("/nsg/{name}"),
                    name,
                    rule_count: 0,
                })
                .collect(),
            subnets: subnets
                .into_iter()
                .map(|name| SubnetAssociation {
                    name,
                    security_group_ref: None,
                    route_table_ref: Some(DEFAULT_RT.to_string()),
                })
                .collect(),
            default_route_table_ref: DEFAULT_RT.to_string(),
            // Either inherit with an empty allow-list, or use exactly the allow-list.
            dns_servers: if use_allowed { allowed.clone() } else { Vec::new() },
            allowed_dns_servers: if use_allowed { allowed } else { Vec::new() },
            address_spaces: Vec::new(),
        })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn broken_hub_connection_yields_single_critical(snapshot in arb_snapshot()) {
        let connected = snapshot
            .hub_peering()
            .is_some_and(|p| p.peering_state == PeeringState::Connected);
        prop_assume!(!connected);

        let report = evaluate(&snapshot);
        prop_assert!(!report.fundamental_connectivity_ok);
        prop_assert_eq!(report.findings.len(), 1);
        prop_assert_eq!(report.findings[0].rule_id.as_str(), ids::RULE_PEERING_CONNECTED);
        prop_assert_eq!(report.findings[0].severity, Severity::Critical);
    }

    #[test]
    fn evaluation_is_deterministic(snapshot in arb_snapshot()) {
        let first = evaluate(&snapshot);
        let second = evaluate(&snapshot);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(summarize(&first), summarize(&second));
    }

    #[test]
    fn passing_snapshots_report_no_issues(snapshot in arb_passing_snapshot()) {
        let report = evaluate(&snapshot);
        prop_assert!(report.fundamental_connectivity_ok);
        prop_assert!(report.findings.iter().all(|f| f.severity == Severity::Ok));

        let summary = summarize(&report);
        prop_assert_eq!(summary.overall_severity, Severity::Ok);
        prop_assert_eq!(summary.narrative.as_str(), NO_ISSUES_NARRATIVE);
    }

    #[test]
    fn custom_route_table_adds_exactly_udr_custom(
        snapshot in arb_passing_snapshot(),
        subnet in arb_name(),
    ) {
        let before = evaluate(&snapshot);

        let mut violating = snapshot.clone();
        violating.subnets.push(SubnetAssociation {
            name: subnet,
            security_group_ref: None,
            route_table_ref: Some("/routeTables/rt-custom".to_string()),
        });
        let after = evaluate(&violating);

        prop_assert_eq!(before.findings.len(), after.findings.len());
        for (b, a) in before.findings.iter().zip(&after.findings) {
            prop_assert_eq!(&b.rule_id, &a.rule_id);
            if a.rule_id == ids::RULE_UDR_CUSTOM {
                prop_assert_eq!(a.severity, Severity::Warning);
            } else {
                prop_assert_eq!(a.severity, b.severity);
            }
        }
    }

    #[test]
    fn non_empty_security_group_adds_exactly_nsg_custom_rules(
        snapshot in arb_passing_snapshot(),
        name in arb_name(),
        rule_count in 1u32..50,
    ) {
        let mut violating = snapshot.clone();
        violating.security_groups.push(SecurityGroupSummary {
            id: format!("/nsg/{name}"),
            name,
            rule_count,
        });
        let after = evaluate(&violating);

        let issues: Vec<&str> = after
            .findings
            .iter()
            .filter(|f| f.severity.is_issue())
            .map(|f| f.rule_id.as_str())
            .collect();
        prop_assert_eq!(issues, vec![ids::RULE_NSG_CUSTOM_RULES]);
    }

    #[test]
    fn hub_lookup_ignores_case(snapshot in arb_passing_snapshot(), mask in any::<u64>()) {
        let mut shuffled = snapshot.clone();
        shuffled.peerings[0].remote_network_id = mixed_case(HUB, mask);

        let report = evaluate(&shuffled);
        prop_assert!(report.fundamental_connectivity_ok);
        prop_assert_eq!(report, evaluate(&snapshot));
    }

    #[test]
    fn overall_severity_is_max_of_findings(snapshot in arb_snapshot()) {
        let report = evaluate(&snapshot);
        let max = report.findings.iter().map(|f| f.severity).max().unwrap_or(Severity::Ok);
        prop_assert_eq!(summarize(&report).overall_severity, max);
    }
}
