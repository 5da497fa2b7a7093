use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use time::OffsetDateTime;

/// Stable schema identifier for spokecheck reports.
pub const SCHEMA_REPORT_V1: &str = "spokecheck.report.v1";

/// Severity of a single rule outcome.
///
/// Declaration order is significant: `Ok < Info < Warning < Critical`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Ok,
    Info,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Ok => "ok",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }

    /// True for any outcome other than `Ok`.
    pub fn is_issue(self) -> bool {
        self != Severity::Ok
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Finding {
    pub rule_id: String,
    pub severity: Severity,
    pub message: String,

    /// Remediation line used by the summary narrative.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    /// Stable identifier intended for dedup and trending: a hash of
    /// `rule_id + spoke network id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,

    /// Rule-specific structured payload (offending resources etc).
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: JsonValue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Warn,
    Fail,
}

impl Verdict {
    /// Critical findings fail the check; any other issue only warns.
    pub fn from_severity(overall: Severity) -> Self {
        match overall {
            Severity::Critical => Verdict::Fail,
            Severity::Warning | Severity::Info => Verdict::Warn,
            Severity::Ok => Verdict::Pass,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VerdictCounts {
    pub ok: u32,
    pub info: u32,
    pub warning: u32,
    pub critical: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RunMeta {
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub ended_at: OffsetDateTime,
    pub duration_ms: u64,
    /// Which fact provider produced the snapshot (`terraform`, `outputs-file`).
    pub fact_source: String,
}

/// The spoke/hub pair a report is about.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CheckTarget {
    pub spoke_network_id: String,
    pub hub_network_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Summary {
    pub overall_severity: Severity,
    pub narrative: String,
}

/// Spokecheck-specific payload for the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct SpokecheckData {
    pub profile: String,
    pub short_circuit: String,
    pub fundamental_connectivity_ok: bool,

    pub peerings_scanned: u32,
    pub security_groups_scanned: u32,
    pub subnets_scanned: u32,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub address_spaces: Vec<String>,
}

/// The emitted report envelope.
///
/// Keeping this generic allows embedding tool-specific data while still enforcing a stable outer shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportEnvelope<TData = SpokecheckData> {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    pub run: RunMeta,
    pub target: CheckTarget,
    pub verdict: Verdict,
    pub counts: VerdictCounts,
    /// Findings in rule evaluation order.
    pub findings: Vec<Finding>,
    pub summary: Summary,
    pub data: TData,
}

pub type SpokecheckReport = ReportEnvelope<SpokecheckData>;
