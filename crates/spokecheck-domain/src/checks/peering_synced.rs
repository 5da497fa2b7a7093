use crate::checks::Violation;
use crate::model::{SyncLevel, TopologySnapshot};
use serde_json::json;

pub fn run(snapshot: &TopologySnapshot) -> Option<Violation> {
    // Only reachable without a hub peering when short-circuiting is off.
    let Some(peering) = snapshot.hub_peering() else {
        return Some(Violation {
            message: "The spoke has no peering to the hub that could be synchronized.".to_string(),
            data: json!({ "peering": null }),
        });
    };

    if peering.sync_level == SyncLevel::FullyInSync {
        return None;
    }

    Some(Violation {
        message: format!(
            "Spoke is not fully synchronized with the hub: peering '{}' is {:?}.",
            peering.name, peering.sync_level
        ),
        data: json!({
            "peering": peering.name,
            "sync_level": peering.sync_level,
        }),
    })
}
