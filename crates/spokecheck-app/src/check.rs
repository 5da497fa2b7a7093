//! The `check` use case: gather facts, evaluate the rules, produce a report.

use crate::error::CheckError;
use spokecheck_domain::fingerprint::fingerprint_for_rule;
use spokecheck_domain::{evaluate_with, summarize};
use spokecheck_facts::FactProvider;
use spokecheck_settings::ResolvedConfig;
use spokecheck_types::{
    CheckTarget, ResourceId, RunMeta, SpokecheckData, SpokecheckReport, ToolMeta, Verdict,
    VerdictCounts, SCHEMA_REPORT_V1,
};
use time::OffsetDateTime;
use tracing::info;

/// Exit code for a check that produced no report.
pub const EXIT_ERROR: i32 = 1;

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Spoke virtual network id, validated before any provider call.
    pub spoke_network_id: &'a str,
    /// Configuration resolved once at startup.
    pub config: &'a ResolvedConfig,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub report: SpokecheckReport,
}

/// Run the check use case against one spoke.
pub fn run_check(
    input: CheckInput<'_>,
    provider: &dyn FactProvider,
) -> Result<CheckOutput, CheckError> {
    let started_at = OffsetDateTime::now_utc();

    let spoke =
        ResourceId::parse(input.spoke_network_id).map_err(CheckError::InvalidIdentifier)?;
    let target = CheckTarget {
        spoke_network_id: spoke.to_string(),
        hub_network_id: input.config.hub.to_string(),
    };

    info!(
        spoke = %target.spoke_network_id,
        hub = %target.hub_network_id,
        source = provider.source_name(),
        "checking spoke connectivity to hub"
    );

    let snapshot = provider.gather(&target)?;

    let policy = &input.config.policy;
    let outcome = evaluate_with(&snapshot, policy);
    let summary = summarize(&outcome);

    let mut findings = outcome.findings;
    for f in findings.iter_mut().filter(|f| f.severity.is_issue()) {
        f.fingerprint = Some(fingerprint_for_rule(&f.rule_id, &target.spoke_network_id));
    }

    let verdict = Verdict::from_severity(summary.overall_severity);
    let ended_at = OffsetDateTime::now_utc();
    let duration_ms = (ended_at - started_at).whole_milliseconds().max(0) as u64;

    info!(
        verdict = ?verdict,
        overall = summary.overall_severity.as_str(),
        findings = findings.len(),
        duration_ms,
        "check finished"
    );

    let report = SpokecheckReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "spokecheck".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        run: RunMeta {
            started_at,
            ended_at,
            duration_ms,
            fact_source: provider.source_name().to_string(),
        },
        target,
        verdict,
        counts: VerdictCounts::from(&outcome.counts),
        findings,
        summary,
        data: SpokecheckData {
            profile: policy.profile.clone(),
            short_circuit: policy.short_circuit.as_str().to_string(),
            fundamental_connectivity_ok: outcome.fundamental_connectivity_ok,
            peerings_scanned: count(snapshot.peerings.len()),
            security_groups_scanned: count(snapshot.security_groups.len()),
            subnets_scanned: count(snapshot.subnets.len()),
            address_spaces: snapshot.address_spaces,
        },
    };

    Ok(CheckOutput { report })
}

/// Map verdict to exit code: 0 = pass/warn, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Warn => 0,
        Verdict::Fail => 2,
    }
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spokecheck_domain::model::{
        PeeringRecord, PeeringState, SecurityGroupSummary, SubnetAssociation, SyncLevel,
        TopologySnapshot,
    };
    use spokecheck_domain::policy::{EvaluationPolicy, ShortCircuit};
    use spokecheck_facts::{FactsError, SnapshotError};
    use spokecheck_settings::TerraformSettings;
    use spokecheck_types::{ids, Severity};
    use std::cell::Cell;

    const HUB: &str = "/subscriptions/0b1c2d3e-4f50-6172-8394-a5b6c7d8e9f0/resourceGroups/rg-hub/providers/Microsoft.Network/virtualNetworks/vnet-hub";
    const SPOKE: &str = "/subscriptions/4a5b6c7d-8e9f-4a0b-9c1d-2e3f4a5b6c7d/resourceGroups/rg-spoke/providers/Microsoft.Network/virtualNetworks/vnet-spoke";
    const RT: &str = "/routeTables/rt-default";

    enum Outcome {
        Snapshot(TopologySnapshot),
        Busy,
        Malformed,
    }

    struct FakeProvider {
        outcome: Outcome,
        calls: Cell<u32>,
    }

    impl FakeProvider {
        fn new(outcome: Outcome) -> Self {
            Self {
                outcome,
                calls: Cell::new(0),
            }
        }
    }

    impl FactProvider for FakeProvider {
        fn source_name(&self) -> &'static str {
            "fake"
        }

        fn gather(&self, target: &CheckTarget) -> Result<TopologySnapshot, FactsError> {
            self.calls.set(self.calls.get() + 1);
            match &self.outcome {
                Outcome::Snapshot(s) => Ok(TopologySnapshot {
                    hub_network_id: target.hub_network_id.clone(),
                    ..s.clone()
                }),
                Outcome::Busy => Err(FactsError::Busy {
                    lock: "/tmp/pair.lock".into(),
                }),
                Outcome::Malformed => Err(FactsError::Malformed(SnapshotError::MissingGroup(
                    "vnet_info",
                ))),
            }
        }
    }

    fn config(short_circuit: ShortCircuit) -> ResolvedConfig {
        ResolvedConfig {
            hub: ResourceId::parse(HUB).unwrap(),
            policy: EvaluationPolicy {
                profile: "strict".to_string(),
                short_circuit,
            },
            allowed_dns_servers: Vec::new(),
            terraform: TerraformSettings::default(),
        }
    }

    fn snapshot(state: PeeringState, sync: SyncLevel, nsg_rules: u32) -> TopologySnapshot {
        TopologySnapshot {
            hub_network_id: String::new(),
            peerings: vec![PeeringRecord {
                name: "spoke-to-hub".to_string(),
                remote_network_id: HUB.to_ascii_lowercase(),
                peering_state: state,
                sync_level: sync,
            }],
            security_groups: vec![SecurityGroupSummary {
                id: "/nsg/nsg-app".to_string(),
                name: "nsg-app".to_string(),
                rule_count: nsg_rules,
            }],
            subnets: vec![SubnetAssociation {
                name: "snet-app".to_string(),
                security_group_ref: None,
                route_table_ref: Some(RT.to_string()),
            }],
            default_route_table_ref: RT.to_string(),
            dns_servers: Vec::new(),
            allowed_dns_servers: Vec::new(),
            address_spaces: vec!["10.1.0.0/16".to_string()],
        }
    }

    fn run(provider: &FakeProvider, short_circuit: ShortCircuit) -> Result<CheckOutput, CheckError> {
        let cfg = config(short_circuit);
        run_check(
            CheckInput {
                spoke_network_id: SPOKE,
                config: &cfg,
            },
            provider,
        )
    }

    #[test]
    fn clean_spoke_passes() {
        let provider = FakeProvider::new(Outcome::Snapshot(snapshot(
            PeeringState::Connected,
            SyncLevel::FullyInSync,
            0,
        )));
        let report = run(&provider, ShortCircuit::OnDisconnected).unwrap().report;

        assert_eq!(report.schema, SCHEMA_REPORT_V1);
        assert_eq!(report.verdict, Verdict::Pass);
        assert_eq!(report.counts.ok, 6);
        assert_eq!(report.findings.len(), 6);
        assert!(report.findings.iter().all(|f| f.fingerprint.is_none()));
        assert_eq!(report.summary.narrative, spokecheck_domain::NO_ISSUES_NARRATIVE);
        assert_eq!(report.run.fact_source, "fake");
        assert_eq!(report.target.hub_network_id, HUB);
        assert_eq!(report.data.address_spaces, vec!["10.1.0.0/16"]);
        assert!(report.data.fundamental_connectivity_ok);
    }

    #[test]
    fn disconnected_spoke_fails_with_single_fingerprinted_finding() {
        let provider = FakeProvider::new(Outcome::Snapshot(snapshot(
            PeeringState::Disconnected,
            SyncLevel::OutOfSync,
            4,
        )));
        let report = run(&provider, ShortCircuit::OnDisconnected).unwrap().report;

        assert_eq!(report.verdict, Verdict::Fail);
        assert_eq!(verdict_exit_code(report.verdict), 2);
        assert_eq!(report.findings.len(), 1);
        let finding = &report.findings[0];
        assert_eq!(finding.rule_id, ids::RULE_PEERING_CONNECTED);
        assert_eq!(
            finding.fingerprint.as_deref(),
            Some(fingerprint_for_rule(ids::RULE_PEERING_CONNECTED, SPOKE).as_str())
        );
        assert!(!report.data.fundamental_connectivity_ok);
        assert_eq!(report.data.short_circuit, "on_disconnected");
    }

    #[test]
    fn never_short_circuit_reports_everything() {
        let provider = FakeProvider::new(Outcome::Snapshot(snapshot(
            PeeringState::Disconnected,
            SyncLevel::OutOfSync,
            4,
        )));
        let report = run(&provider, ShortCircuit::Never).unwrap().report;

        assert_eq!(report.findings.len(), ids::ALL_RULES.len());
        assert_eq!(report.counts.critical, 1);
        assert_eq!(report.counts.warning, 2);
        assert_eq!(report.summary.overall_severity, Severity::Critical);
        assert_eq!(report.data.short_circuit, "never");
    }

    #[test]
    fn warnings_only_warn() {
        let provider = FakeProvider::new(Outcome::Snapshot(snapshot(
            PeeringState::Connected,
            SyncLevel::OutOfSync,
            3,
        )));
        let report = run(&provider, ShortCircuit::OnDisconnected).unwrap().report;
        assert_eq!(report.verdict, Verdict::Warn);
        assert_eq!(verdict_exit_code(report.verdict), 0);
        assert_eq!(
            report.findings.iter().filter(|f| f.fingerprint.is_some()).count(),
            2
        );
    }

    #[test]
    fn invalid_spoke_never_reaches_the_provider() {
        let provider = FakeProvider::new(Outcome::Busy);
        let cfg = config(ShortCircuit::OnDisconnected);
        let err = run_check(
            CheckInput {
                spoke_network_id: "vnet-spoke; rm -rf /",
                config: &cfg,
            },
            &provider,
        )
        .unwrap_err();

        assert!(matches!(err, CheckError::InvalidIdentifier(_)));
        assert_eq!(provider.calls.get(), 0);
    }

    #[test]
    fn provider_errors_are_not_findings() {
        let busy = FakeProvider::new(Outcome::Busy);
        assert!(matches!(
            run(&busy, ShortCircuit::OnDisconnected),
            Err(CheckError::FactsUnavailable(FactsError::Busy { .. }))
        ));

        let malformed = FakeProvider::new(Outcome::Malformed);
        assert!(matches!(
            run(&malformed, ShortCircuit::OnDisconnected),
            Err(CheckError::MalformedSnapshot(_))
        ));
    }

    #[test]
    fn verdict_exit_codes() {
        assert_eq!(verdict_exit_code(Verdict::Pass), 0);
        assert_eq!(verdict_exit_code(Verdict::Warn), 0);
        assert_eq!(verdict_exit_code(Verdict::Fail), 2);
    }
}
