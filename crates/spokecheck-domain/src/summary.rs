//! Summary composition: narrative + overall severity, ready for a renderer.

use crate::checks::RESTORE_CONNECTIVITY;
use crate::report::TopologyReport;
use spokecheck_types::{Severity, Summary};

/// Narrative used when nothing worth reporting fired.
pub const NO_ISSUES_NARRATIVE: &str = "No significant issues were observed.";

pub fn summarize(report: &TopologyReport) -> Summary {
    let overall_severity = report.overall_severity();

    if !report.fundamental_connectivity_ok {
        return Summary {
            overall_severity,
            narrative: RESTORE_CONNECTIVITY.to_string(),
        };
    }

    let mut lines: Vec<&str> = Vec::new();
    for finding in &report.findings {
        if !matches!(finding.severity, Severity::Warning | Severity::Info) {
            continue;
        }
        let Some(help) = finding.help.as_deref() else {
            continue;
        };
        if !lines.contains(&help) {
            lines.push(help);
        }
    }

    let narrative = if lines.is_empty() {
        NO_ISSUES_NARRATIVE.to_string()
    } else {
        lines.join(" ")
    };

    Summary {
        overall_severity,
        narrative,
    }
}

/// Three-valued status shown next to each finding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplaySymbol {
    Success,
    Warning,
    Blocking,
}

impl From<Severity> for DisplaySymbol {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Ok => DisplaySymbol::Success,
            Severity::Info | Severity::Warning => DisplaySymbol::Warning,
            Severity::Critical => DisplaySymbol::Blocking,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate;
    use crate::model::{PeeringState, SyncLevel};
    use crate::test_support::{clean_snapshot, nsg, peering, HUB};
    use spokecheck_types::Finding;

    fn finding(rule_id: &str, severity: Severity, help: Option<&str>) -> Finding {
        Finding {
            rule_id: rule_id.to_string(),
            severity,
            message: String::new(),
            help: help.map(str::to_string),
            fingerprint: None,
            data: serde_json::Value::Null,
        }
    }

    #[test]
    fn broken_connectivity_yields_only_the_directive() {
        let mut snapshot = clean_snapshot();
        snapshot.peerings = vec![peering(HUB, PeeringState::Disconnected, SyncLevel::OutOfSync)];

        let summary = summarize(&evaluate(&snapshot));

        assert_eq!(summary.overall_severity, Severity::Critical);
        assert_eq!(summary.narrative, RESTORE_CONNECTIVITY);
    }

    #[test]
    fn clean_report_uses_fixed_text() {
        let summary = summarize(&evaluate(&clean_snapshot()));
        assert_eq!(summary.overall_severity, Severity::Ok);
        assert_eq!(summary.narrative, NO_ISSUES_NARRATIVE);
    }

    #[test]
    fn narrative_follows_rule_order() {
        let mut snapshot = clean_snapshot();
        snapshot.peerings = vec![peering(HUB, PeeringState::Connected, SyncLevel::OutOfSync)];
        snapshot.security_groups = vec![nsg("nsg-app", 2)];

        let report = evaluate(&snapshot);
        let summary = summarize(&report);

        let synced = report.finding("peering-synced").and_then(|f| f.help.clone());
        let nsg = report.finding("nsg-custom-rules").and_then(|f| f.help.clone());
        let (synced, nsg) = (synced.expect("synced help"), nsg.expect("nsg help"));
        assert_eq!(summary.narrative, format!("{synced} {nsg}"));
        assert_eq!(summary.overall_severity, Severity::Warning);
    }

    #[test]
    fn duplicate_remediation_lines_are_collapsed() {
        let report = TopologyReport {
            findings: vec![
                finding("a", Severity::Warning, Some("fix it")),
                finding("b", Severity::Info, Some("fix it")),
                finding("c", Severity::Ok, Some("ignored")),
            ],
            fundamental_connectivity_ok: true,
            counts: Default::default(),
        };
        assert_eq!(summarize(&report).narrative, "fix it");
    }

    #[test]
    fn display_symbol_is_a_function_of_severity() {
        assert_eq!(DisplaySymbol::from(Severity::Ok), DisplaySymbol::Success);
        assert_eq!(DisplaySymbol::from(Severity::Info), DisplaySymbol::Warning);
        assert_eq!(DisplaySymbol::from(Severity::Warning), DisplaySymbol::Warning);
        assert_eq!(DisplaySymbol::from(Severity::Critical), DisplaySymbol::Blocking);
    }
}
