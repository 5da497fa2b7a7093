use serde::Serialize;

/// Observed facts about one spoke network and its relation to the hub.
///
/// Built once per check by a fact provider; the evaluator only ever borrows it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TopologySnapshot {
    /// Hub network the peering lookup matches against.
    pub hub_network_id: String,

    pub peerings: Vec<PeeringRecord>,
    pub security_groups: Vec<SecurityGroupSummary>,
    pub subnets: Vec<SubnetAssociation>,

    /// Route table that means "no custom routing".
    pub default_route_table_ref: String,

    /// Custom DNS servers of the spoke. Empty means the platform default is inherited.
    pub dns_servers: Vec<String>,

    /// Externally supplied allow-list (may be empty).
    pub allowed_dns_servers: Vec<String>,

    /// Informational only; no rule reads it.
    pub address_spaces: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum PeeringState {
    Connected,
    Disconnected,
    Initiated,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SyncLevel {
    FullyInSync,
    OutOfSync,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PeeringRecord {
    pub name: String,
    pub remote_network_id: String,
    pub peering_state: PeeringState,
    pub sync_level: SyncLevel,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecurityGroupSummary {
    pub id: String,
    pub name: String,
    pub rule_count: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubnetAssociation {
    pub name: String,
    pub security_group_ref: Option<String>,
    pub route_table_ref: Option<String>,
}

impl TopologySnapshot {
    /// The peering towards the hub: first entry whose remote network matches the hub id,
    /// ignoring ASCII case. Later duplicates are never consulted.
    pub fn hub_peering(&self) -> Option<&PeeringRecord> {
        let hub = self.hub_network_id.trim();
        self.peerings
            .iter()
            .find(|p| p.remote_network_id.trim().eq_ignore_ascii_case(hub))
    }
}

impl SubnetAssociation {
    /// True when the subnet is associated with a route table other than `default_ref`.
    ///
    /// Route table ids are compared ignoring ASCII case. Subnets without any route table are
    /// not custom; they are reported separately.
    pub fn has_custom_route_table(&self, default_ref: &str) -> bool {
        self.route_table_ref
            .as_deref()
            .is_some_and(|rt| !rt.trim().eq_ignore_ascii_case(default_ref.trim()))
    }
}
