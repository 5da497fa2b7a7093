#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableSeverity {
    Ok,
    Info,
    Warning,
    Critical,
}

impl RenderableSeverity {
    pub fn label(self) -> &'static str {
        match self {
            RenderableSeverity::Ok => "ok",
            RenderableSeverity::Info => "info",
            RenderableSeverity::Warning => "warning",
            RenderableSeverity::Critical => "critical",
        }
    }
}

/// Status glyph shown next to a finding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableSymbol {
    Success,
    Warning,
    Blocking,
}

impl RenderableSymbol {
    pub fn glyph(self) -> &'static str {
        match self {
            RenderableSymbol::Success => "✅",
            RenderableSymbol::Warning => "🔔",
            RenderableSymbol::Blocking => "⛔",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableVerdictStatus {
    Pass,
    Warn,
    Fail,
}

impl RenderableVerdictStatus {
    pub fn label(self) -> &'static str {
        match self {
            RenderableVerdictStatus::Pass => "PASS",
            RenderableVerdictStatus::Warn => "WARN",
            RenderableVerdictStatus::Fail => "FAIL",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableFinding {
    pub symbol: RenderableSymbol,
    pub severity: RenderableSeverity,
    pub rule_id: String,
    pub message: String,
    pub help: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableTarget {
    pub spoke_network_id: String,
    pub hub_network_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableSummary {
    pub overall_severity: RenderableSeverity,
    pub narrative: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub verdict: RenderableVerdictStatus,
    pub target: RenderableTarget,
    /// In rule evaluation order.
    pub findings: Vec<RenderableFinding>,
    pub summary: RenderableSummary,
}

#[cfg(test)]
pub(crate) fn sample_report() -> RenderableReport {
    RenderableReport {
        verdict: RenderableVerdictStatus::Warn,
        target: RenderableTarget {
            spoke_network_id: "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Network/virtualNetworks/spoke".to_string(),
            hub_network_id: "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Network/virtualNetworks/hub".to_string(),
        },
        findings: vec![
            RenderableFinding {
                symbol: RenderableSymbol::Success,
                severity: RenderableSeverity::Ok,
                rule_id: "peering-connected".to_string(),
                message: "VNet peering to the hub is connected.".to_string(),
                help: None,
            },
            RenderableFinding {
                symbol: RenderableSymbol::Warning,
                severity: RenderableSeverity::Warning,
                rule_id: "nsg-custom-rules".to_string(),
                message: "Some spoke subnets use non-empty security groups: nsg-a|b <x> (3 rules)."
                    .to_string(),
                help: Some("Review the rules.".to_string()),
            },
        ],
        summary: RenderableSummary {
            overall_severity: RenderableSeverity::Warning,
            narrative: "Review the rules.".to_string(),
        },
    }
}
