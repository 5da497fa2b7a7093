use crate::checks;
use crate::model::TopologySnapshot;
use crate::policy::{EvaluationPolicy, ShortCircuit};
use crate::report::{SeverityCounts, TopologyReport};

/// Evaluate the snapshot with the default policy (short-circuit on a broken hub connection).
pub fn evaluate(snapshot: &TopologySnapshot) -> TopologyReport {
    evaluate_with(snapshot, &EvaluationPolicy::default())
}

/// Evaluate the snapshot against the rule catalog, strictly in catalog order.
pub fn evaluate_with(snapshot: &TopologySnapshot, policy: &EvaluationPolicy) -> TopologyReport {
    let mut findings = Vec::with_capacity(checks::CATALOG.len());
    let mut fundamental_connectivity_ok = true;

    for rule in checks::CATALOG {
        let finding = rule.evaluate(snapshot);
        let fired = finding.severity.is_issue();
        findings.push(finding);

        if rule.fundamental && fired {
            fundamental_connectivity_ok = false;
            if policy.short_circuit == ShortCircuit::OnDisconnected {
                break;
            }
        }
    }

    let counts = SeverityCounts::from_findings(&findings);

    TopologyReport {
        findings,
        fundamental_connectivity_ok,
        counts,
    }
}
