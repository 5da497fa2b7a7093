//! Explain registry for topology rules.
//!
//! Maps rule IDs to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a rule.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the rule.
    pub title: &'static str,
    /// What the rule checks and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
}

/// Look up an explanation by rule ID (case-insensitive).
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    let id = identifier.trim().to_ascii_lowercase();
    match id.as_str() {
        ids::RULE_PEERING_CONNECTED => Some(explain_peering_connected()),
        ids::RULE_PEERING_SYNCED => Some(explain_peering_synced()),
        ids::RULE_NSG_CUSTOM_RULES => Some(explain_nsg_custom_rules()),
        ids::RULE_UDR_CUSTOM => Some(explain_udr_custom()),
        ids::RULE_UDR_MISSING => Some(explain_udr_missing()),
        ids::RULE_DNS_MISMATCH => Some(explain_dns_mismatch()),
        _ => None,
    }
}

/// List all known rule IDs, in evaluation order.
pub fn all_rule_ids() -> &'static [&'static str] {
    ids::ALL_RULES
}

fn explain_peering_connected() -> Explanation {
    Explanation {
        title: "Peering To Hub Is Connected",
        description: "\
Looks up the spoke's peering whose remote network is the hub (first match, case-insensitive)
and requires its state to be `Connected`.

A missing peering counts as disconnected. Every other rule depends on the spoke being
reachable from the hub, so under the default `strict` profile a failure here stops
evaluation and the report carries this single critical finding.",
        remediation: "\
Create the peering from the spoke to the hub (and the reverse peering on the hub side),
or reconnect it if the remote side was deleted and recreated:

    az network vnet peering create --name spoke-to-hub \\
        --resource-group <spoke-rg> --vnet-name <spoke-vnet> \\
        --remote-vnet <hub-vnet-id> --allow-vnet-access",
    }
}

fn explain_peering_synced() -> Explanation {
    Explanation {
        title: "Peering To Hub Is Fully In Sync",
        description: "\
Requires the hub peering's sync level to be `FullyInSync`.

The peering goes out of sync when either side's address space changes after the peering
was created; traffic to the new prefixes is not routed until the peering is synced.",
        remediation: "\
Sync the peering from the spoke side:

    az network vnet peering sync --name spoke-to-hub \\
        --resource-group <spoke-rg> --vnet-name <spoke-vnet>",
    }
}

fn explain_nsg_custom_rules() -> Explanation {
    Explanation {
        title: "Security Groups Without Custom Rules",
        description: "\
Flags any network security group attached to the spoke that carries custom rules
(rule count greater than zero).

Custom NSG rules are legitimate, but they are the most common cause of traffic between the
hub and spoke being silently dropped.",
        remediation: "\
Review the custom rules on the listed security groups and make sure hub address ranges and
the hub's shared services (DNS, firewall, gateways) are allowed.",
    }
}

fn explain_udr_custom() -> Explanation {
    Explanation {
        title: "Subnets Use The Default Route Table",
        description: "\
Flags subnets whose associated route table differs from the route table declared as the
default for the spoke.

A non-default route table can send traffic around the hub firewall or to a next hop that no
longer exists.",
        remediation: "\
Associate the default route table with the listed subnets, or verify that the custom route
table forwards hub-bound traffic to the hub's next hop.",
    }
}

fn explain_udr_missing() -> Explanation {
    Explanation {
        title: "Subnets Have A Route Table",
        description: "\
Flags subnets that have no route table association at all.

Without a route table the subnet uses system routes only, so outbound traffic bypasses the
hub.",
        remediation: "\
Associate the default route table with the listed subnets:

    az network vnet subnet update --name <subnet> \\
        --resource-group <spoke-rg> --vnet-name <spoke-vnet> \\
        --route-table <default-route-table-id>",
    }
}

fn explain_dns_mismatch() -> Explanation {
    Explanation {
        title: "Spoke Uses Allowed DNS Servers",
        description: "\
Compares the spoke's custom DNS servers with the configured allow-list.

The rule fires when the spoke declares a DNS server outside the allow-list, or when the
spoke inherits the platform default although an allow-list is configured. With an empty
allow-list, only an empty DNS configuration passes.",
        remediation: "\
Set the spoke's DNS servers to the hub DNS servers from the allow-list
(`allowed_dns_servers` in spokecheck.toml or `DEFAULT_DNS`).",
    }
}
