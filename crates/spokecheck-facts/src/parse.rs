use serde::Deserialize;
use serde_json::Value;
use spokecheck_domain::model::{
    PeeringRecord, PeeringState, SecurityGroupSummary, SubnetAssociation, SyncLevel,
    TopologySnapshot,
};
use thiserror::Error;
use tracing::debug;

pub const GROUP_NSG_INFO: &str = "nsg_info";
pub const GROUP_SUBNETS_INFO: &str = "subnets_info";
pub const GROUP_VNET_INFO: &str = "vnet_info";

/// Facts that come from configuration rather than from the outputs document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SnapshotContext {
    pub hub_network_id: String,
    pub allowed_dns_servers: Vec<String>,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("outputs are not valid JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("outputs must be a JSON object keyed by output name")]
    NotAnObject,

    #[error("outputs are missing the `{0}` group")]
    MissingGroup(&'static str),

    #[error("output group `{group}` is malformed: {source}")]
    InvalidGroup {
        group: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("peering `{peering}` has unknown peering state `{value}`")]
    UnknownPeeringState { peering: String, value: String },

    #[error("peering `{peering}` has unknown sync level `{value}`")]
    UnknownSyncLevel { peering: String, value: String },

    #[error("security group `{name}` reports a negative rule count ({count})")]
    NegativeRuleCount { name: String, count: i64 },

    #[error("security group `{name}` reports more rules than can be counted ({count})")]
    RuleCountOutOfRange { name: String, count: i64 },
}

#[derive(Debug, Deserialize)]
struct NsgInfo {
    #[serde(default)]
    nsg_id: String,
    nsg_name: String,
    total_rules: i64,
}

#[derive(Debug, Deserialize)]
struct SubnetInfo {
    name: String,
    #[serde(default)]
    nsg: Option<String>,
    #[serde(default)]
    udr: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VnetInfo {
    #[serde(default)]
    address_spaces: Vec<String>,
    default_udr: String,
    peerings: Vec<PeeringInfo>,
    #[serde(default)]
    dns: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PeeringInfo {
    #[serde(default)]
    name: String,
    properties: PeeringProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PeeringProperties {
    peering_state: String,
    peering_sync_level: String,
    remote_virtual_network: RemoteNetwork,
}

#[derive(Debug, Deserialize)]
struct RemoteNetwork {
    id: String,
}

/// Parse a `terraform output -json` document into a snapshot.
///
/// Each of the three groups may be wrapped the way terraform prints it (`{ "value": ... }`)
/// or given bare. Unknown extra outputs are ignored.
pub fn parse_outputs(text: &str, ctx: &SnapshotContext) -> Result<TopologySnapshot, SnapshotError> {
    let root: Value = serde_json::from_str(text).map_err(SnapshotError::Json)?;
    let Value::Object(mut outputs) = root else {
        return Err(SnapshotError::NotAnObject);
    };

    let nsgs: Vec<NsgInfo> = take_group(&mut outputs, GROUP_NSG_INFO)?;
    let subnets: Vec<SubnetInfo> = take_group(&mut outputs, GROUP_SUBNETS_INFO)?;
    let vnet: VnetInfo = take_group(&mut outputs, GROUP_VNET_INFO)?;

    let security_groups = nsgs
        .into_iter()
        .map(|n| {
            let rule_count = rule_count(&n.nsg_name, n.total_rules)?;
            if rule_count > 0 {
                debug!(nsg = %n.nsg_name, rules = rule_count, "security group carries rules");
            }
            Ok(SecurityGroupSummary {
                id: n.nsg_id,
                name: n.nsg_name,
                rule_count,
            })
        })
        .collect::<Result<Vec<_>, SnapshotError>>()?;

    let subnets = subnets
        .into_iter()
        .map(|s| {
            let route_table_ref = non_empty(s.udr);
            debug!(
                subnet = %s.name,
                route_table = route_table_ref.as_deref().unwrap_or("<none>"),
                "subnet route table"
            );
            SubnetAssociation {
                name: s.name,
                security_group_ref: non_empty(s.nsg),
                route_table_ref,
            }
        })
        .collect();

    let peerings = vnet
        .peerings
        .into_iter()
        .map(|p| {
            let peering_state = parse_peering_state(&p.name, &p.properties.peering_state)?;
            let sync_level = parse_sync_level(&p.name, &p.properties.peering_sync_level)?;
            Ok(PeeringRecord {
                name: p.name,
                remote_network_id: p.properties.remote_virtual_network.id,
                peering_state,
                sync_level,
            })
        })
        .collect::<Result<Vec<_>, SnapshotError>>()?;

    debug!(
        dns = ?vnet.dns,
        allowed = ?ctx.allowed_dns_servers,
        "spoke dns servers"
    );

    Ok(TopologySnapshot {
        hub_network_id: ctx.hub_network_id.clone(),
        peerings,
        security_groups,
        subnets,
        default_route_table_ref: vnet.default_udr,
        dns_servers: non_blank(vnet.dns),
        allowed_dns_servers: ctx.allowed_dns_servers.clone(),
        address_spaces: vnet.address_spaces,
    })
}

fn take_group<T: serde::de::DeserializeOwned>(
    outputs: &mut serde_json::Map<String, Value>,
    group: &'static str,
) -> Result<T, SnapshotError> {
    let raw = outputs
        .remove(group)
        .ok_or(SnapshotError::MissingGroup(group))?;
    let value = match raw {
        Value::Object(mut wrapped) if wrapped.contains_key("value") => {
            wrapped.remove("value").unwrap_or(Value::Null)
        }
        bare => bare,
    };
    serde_json::from_value(value).map_err(|source| SnapshotError::InvalidGroup { group, source })
}

fn rule_count(name: &str, count: i64) -> Result<u32, SnapshotError> {
    if count < 0 {
        return Err(SnapshotError::NegativeRuleCount {
            name: name.to_string(),
            count,
        });
    }
    u32::try_from(count).map_err(|_| SnapshotError::RuleCountOutOfRange {
        name: name.to_string(),
        count,
    })
}

/// Trimmed entries; blank ones are dropped.
fn non_blank(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn parse_peering_state(peering: &str, raw: &str) -> Result<PeeringState, SnapshotError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "connected" => Ok(PeeringState::Connected),
        "disconnected" => Ok(PeeringState::Disconnected),
        "initiated" => Ok(PeeringState::Initiated),
        _ => Err(SnapshotError::UnknownPeeringState {
            peering: peering.to_string(),
            value: raw.to_string(),
        }),
    }
}

fn parse_sync_level(peering: &str, raw: &str) -> Result<SyncLevel, SnapshotError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "fullyinsync" => Ok(SyncLevel::FullyInSync),
        "localnotinsync" | "remotenotinsync" | "localandremotenotinsync" | "outofsync" => {
            Ok(SyncLevel::OutOfSync)
        }
        _ => Err(SnapshotError::UnknownSyncLevel {
            peering: peering.to_string(),
            value: raw.to_string(),
        }),
    }
}
