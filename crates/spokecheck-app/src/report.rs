use anyhow::Context;
use spokecheck_domain::DisplaySymbol;
use spokecheck_render::{
    RenderableFinding, RenderableReport, RenderableSeverity, RenderableSummary, RenderableSymbol,
    RenderableTarget, RenderableVerdictStatus,
};
use spokecheck_types::{Finding, Severity, SpokecheckReport, Verdict, SCHEMA_REPORT_V1};

pub fn parse_report_json(text: &str) -> anyhow::Result<SpokecheckReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema:?} (expected {SCHEMA_REPORT_V1})");
    }

    serde_json::from_value(value).context("parse spokecheck report")
}

pub fn serialize_report(report: &SpokecheckReport) -> anyhow::Result<Vec<u8>> {
    let mut data = serde_json::to_vec_pretty(report).context("serialize report")?;
    data.push(b'\n');
    Ok(data)
}

pub fn to_renderable(report: &SpokecheckReport) -> RenderableReport {
    RenderableReport {
        verdict: match report.verdict {
            Verdict::Pass => RenderableVerdictStatus::Pass,
            Verdict::Warn => RenderableVerdictStatus::Warn,
            Verdict::Fail => RenderableVerdictStatus::Fail,
        },
        target: RenderableTarget {
            spoke_network_id: report.target.spoke_network_id.clone(),
            hub_network_id: report.target.hub_network_id.clone(),
        },
        findings: report.findings.iter().map(renderable_finding).collect(),
        summary: RenderableSummary {
            overall_severity: renderable_severity(report.summary.overall_severity),
            narrative: report.summary.narrative.clone(),
        },
    }
}

fn renderable_finding(f: &Finding) -> RenderableFinding {
    RenderableFinding {
        symbol: match DisplaySymbol::from(f.severity) {
            DisplaySymbol::Success => RenderableSymbol::Success,
            DisplaySymbol::Warning => RenderableSymbol::Warning,
            DisplaySymbol::Blocking => RenderableSymbol::Blocking,
        },
        severity: renderable_severity(f.severity),
        rule_id: f.rule_id.clone(),
        message: f.message.clone(),
        help: f.help.clone(),
    }
}

fn renderable_severity(s: Severity) -> RenderableSeverity {
    match s {
        Severity::Ok => RenderableSeverity::Ok,
        Severity::Info => RenderableSeverity::Info,
        Severity::Warning => RenderableSeverity::Warning,
        Severity::Critical => RenderableSeverity::Critical,
    }
}
