use spokecheck_types::{Finding, Severity, VerdictCounts};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeverityCounts {
    pub ok: u32,
    pub info: u32,
    pub warning: u32,
    pub critical: u32,
}

impl SeverityCounts {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut counts = SeverityCounts::default();
        for f in findings {
            match f.severity {
                Severity::Ok => counts.ok += 1,
                Severity::Info => counts.info += 1,
                Severity::Warning => counts.warning += 1,
                Severity::Critical => counts.critical += 1,
            }
        }
        counts
    }
}

impl From<&SeverityCounts> for VerdictCounts {
    fn from(c: &SeverityCounts) -> Self {
        VerdictCounts {
            ok: c.ok,
            info: c.info,
            warning: c.warning,
            critical: c.critical,
        }
    }
}

/// Result of one evaluation run.
#[derive(Clone, Debug, PartialEq)]
pub struct TopologyReport {
    /// Findings in rule evaluation order (not severity order).
    pub findings: Vec<Finding>,
    /// False when the hub peering is absent or not connected.
    pub fundamental_connectivity_ok: bool,
    pub counts: SeverityCounts,
}

impl TopologyReport {
    /// Highest severity across all findings; `Ok` for an empty report.
    pub fn overall_severity(&self) -> Severity {
        self.findings
            .iter()
            .map(|f| f.severity)
            .max()
            .unwrap_or(Severity::Ok)
    }

    pub fn finding(&self, rule_id: &str) -> Option<&Finding> {
        self.findings.iter().find(|f| f.rule_id == rule_id)
    }
}
