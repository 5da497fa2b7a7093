//! Stable identifiers for topology rules.
//!
//! Rule IDs are kebab-case and appear verbatim in reports, fingerprints and `explain`.

// Peering
pub const RULE_PEERING_CONNECTED: &str = "peering-connected";
pub const RULE_PEERING_SYNCED: &str = "peering-synced";

// Security groups
pub const RULE_NSG_CUSTOM_RULES: &str = "nsg-custom-rules";

// Route tables
pub const RULE_UDR_CUSTOM: &str = "udr-custom";
pub const RULE_UDR_MISSING: &str = "udr-missing";

// DNS
pub const RULE_DNS_MISMATCH: &str = "dns-mismatch";

/// Every rule, in evaluation order.
pub const ALL_RULES: &[&str] = &[
    RULE_PEERING_CONNECTED,
    RULE_PEERING_SYNCED,
    RULE_NSG_CUSTOM_RULES,
    RULE_UDR_CUSTOM,
    RULE_UDR_MISSING,
    RULE_DNS_MISMATCH,
];
