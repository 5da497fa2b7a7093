//! The rule catalog.
//!
//! Each rule is a pure function over the snapshot that either stays silent or reports a
//! [`Violation`]. The severity of a violation is fixed per rule; silence is recorded as an
//! `Ok` finding so the report always lists every rule that ran.

use crate::model::TopologySnapshot;
use serde_json::Value;
use spokecheck_types::{ids, Finding, Severity};

mod dns_mismatch;
mod nsg_custom_rules;
mod peering_connected;
mod peering_synced;
mod udr_custom;
mod udr_missing;


pub use peering_connected::RESTORE_CONNECTIVITY;

/// What a firing rule observed.
#[derive(Clone, Debug, PartialEq)]
pub struct Violation {
    pub message: String,
    pub data: Value,
}

#[derive(Clone, Copy, Debug)]
pub struct Rule {
    pub id: &'static str,
    /// Severity recorded when the rule fires.
    pub severity: Severity,
    /// A fundamental rule decides `fundamental_connectivity_ok` and may halt evaluation.
    pub fundamental: bool,
    pub pass_message: &'static str,
    /// Remediation line contributed to the summary narrative when the rule fires.
    pub remediation: &'static str,
    pub check: fn(&TopologySnapshot) -> Option<Violation>,
}

/// Every rule, in evaluation order.
pub const CATALOG: &[Rule] = &[
    Rule {
        id: ids::RULE_PEERING_CONNECTED,
        severity: Severity::Critical,
        fundamental: true,
        pass_message: "VNet peering to the hub is connected.",
        remediation: RESTORE_CONNECTIVITY,
        check: peering_connected::run,
    },
    Rule {
        id: ids::RULE_PEERING_SYNCED,
        severity: Severity::Warning,
        fundamental: false,
        pass_message: "VNet peering to the hub is fully synchronized.",
        remediation: "The spoke's address space was modified. Sync the virtual network peering with the hub VNet.",
        check: peering_synced::run,
    },
    Rule {
        id: ids::RULE_NSG_CUSTOM_RULES,
        severity: Severity::Warning,
        fundamental: false,
        pass_message: "No spoke security group carries custom rules.",
        remediation: "Some spoke subnets use security groups with custom rules; review them if traffic to or from the hub is dropped.",
        check: nsg_custom_rules::run,
    },
    Rule {
        id: ids::RULE_UDR_CUSTOM,
        severity: Severity::Warning,
        fundamental: false,
        pass_message: "Every routed spoke subnet uses the default route table.",
        remediation: "Some spoke subnets use a non-default route table; check that hub-bound traffic still reaches the hub.",
        check: udr_custom::run,
    },
    Rule {
        id: ids::RULE_UDR_MISSING,
        severity: Severity::Warning,
        fundamental: false,
        pass_message: "Every spoke subnet has a route table association.",
        remediation: "Some spoke subnets have no route table; associate the default route table with them.",
        check: udr_missing::run,
    },
    Rule {
        id: ids::RULE_DNS_MISMATCH,
        severity: Severity::Info,
        fundamental: false,
        pass_message: "Spoke DNS configuration matches the allowed DNS servers.",
        remediation: "The spoke uses DNS servers outside the allowed list; point it at the hub DNS servers.",
        check: dns_mismatch::run,
    },
];

impl Rule {
    /// Run the rule and record its outcome, firing or not.
    pub fn evaluate(&self, snapshot: &TopologySnapshot) -> Finding {
        match (self.check)(snapshot) {
            Some(violation) => Finding {
                rule_id: self.id.to_string(),
                severity: self.severity,
                message: violation.message,
                help: Some(self.remediation.to_string()),
                fingerprint: None,
                data: violation.data,
            },
            None => Finding {
                rule_id: self.id.to_string(),
                severity: Severity::Ok,
                message: self.pass_message.to_string(),
                help: None,
                fingerprint: None,
                data: Value::Null,
            },
        }
    }
}
