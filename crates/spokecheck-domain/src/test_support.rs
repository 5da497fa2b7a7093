use crate::model::{
    PeeringRecord, PeeringState, SecurityGroupSummary, SubnetAssociation, SyncLevel,
    TopologySnapshot,
};

pub const HUB: &str = "/subscriptions/0b1c2d3e-4f50-6172-8394-a5b6c7d8e9f0/resourceGroups/rg-hub/providers/Microsoft.Network/virtualNetworks/vnet-hub";
pub const DEFAULT_RT: &str = "/subscriptions/0b1c2d3e-4f50-6172-8394-a5b6c7d8e9f0/resourceGroups/rg-spoke/providers/Microsoft.Network/routeTables/rt-default";

pub fn peering(remote: &str, state: PeeringState, sync: SyncLevel) -> PeeringRecord {
    PeeringRecord {
        name: "spoke-to-hub".to_string(),
        remote_network_id: remote.to_string(),
        peering_state: state,
        sync_level: sync,
    }
}

pub fn nsg(name: &str, rule_count: u32) -> SecurityGroupSummary {
    SecurityGroupSummary {
        id: format!("/nsg/{name}"),
        name: name.to_string(),
        rule_count,
    }
}

pub fn subnet(name: &str, route_table: Option<&str>) -> SubnetAssociation {
    SubnetAssociation {
        name: name.to_string(),
        security_group_ref: None,
        route_table_ref: route_table.map(str::to_string),
    }
}

/// A snapshot every rule is silent on.
pub fn clean_snapshot() -> TopologySnapshot {
    TopologySnapshot {
        hub_network_id: HUB.to_string(),
        peerings: vec![peering(HUB, PeeringState::Connected, SyncLevel::FullyInSync)],
        security_groups: vec![nsg("nsg-default", 0)],
        subnets: vec![
            subnet("snet-app", Some(DEFAULT_RT)),
            subnet("snet-data", Some(DEFAULT_RT)),
        ],
        default_route_table_ref: DEFAULT_RT.to_string(),
        dns_servers: Vec::new(),
        allowed_dns_servers: Vec::new(),
        address_spaces: vec!["10.1.0.0/16".to_string()],
    }
}
