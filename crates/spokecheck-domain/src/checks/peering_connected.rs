use crate::checks::Violation;
use crate::model::{PeeringState, TopologySnapshot};
use serde_json::json;

/// The only advice given while the spoke is unreachable from the hub.
pub const RESTORE_CONNECTIVITY: &str =
    "No active connection between the hub and the spoke was found. Connect the spoke VNet to the hub.";

pub fn run(snapshot: &TopologySnapshot) -> Option<Violation> {
    let Some(peering) = snapshot.hub_peering() else {
        return Some(Violation {
            message: "Connectivity to the hub is broken: the spoke has no peering to the hub network."
                .to_string(),
            data: json!({
                "hub_network_id": snapshot.hub_network_id,
                "peering": null,
                "peerings_seen": snapshot.peerings.len(),
            }),
        });
    };

    if peering.peering_state == PeeringState::Connected {
        return None;
    }

    Some(Violation {
        message: format!(
            "Connectivity to the hub is broken: peering '{}' is {:?}.",
            peering.name, peering.peering_state
        ),
        data: json!({
            "hub_network_id": snapshot.hub_network_id,
            "peering": peering.name,
            "peering_state": peering.peering_state,
        }),
    })
}
