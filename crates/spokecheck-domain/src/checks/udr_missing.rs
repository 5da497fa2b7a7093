use crate::checks::Violation;
use crate::model::TopologySnapshot;
use serde_json::json;

pub fn run(snapshot: &TopologySnapshot) -> Option<Violation> {
    let names: Vec<&str> = snapshot
        .subnets
        .iter()
        .filter(|s| s.route_table_ref.is_none())
        .map(|s| s.name.as_str())
        .collect();

    if names.is_empty() {
        return None;
    }

    Some(Violation {
        message: format!(
            "Some spoke subnets don't have a route table association: {}.",
            names.join(", ")
        ),
        data: json!({ "subnets": names }),
    })
}
