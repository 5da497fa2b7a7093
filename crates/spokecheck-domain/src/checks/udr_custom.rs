use crate::checks::Violation;
use crate::model::TopologySnapshot;
use serde_json::json;

pub fn run(snapshot: &TopologySnapshot) -> Option<Violation> {
    let offenders: Vec<_> = snapshot
        .subnets
        .iter()
        .filter(|s| s.has_custom_route_table(&snapshot.default_route_table_ref))
        .collect();

    if offenders.is_empty() {
        return None;
    }

    let names = offenders
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    Some(Violation {
        message: format!("Some spoke subnets use a non-default route table: {names}."),
        data: json!({
            "default_route_table": snapshot.default_route_table_ref,
            "subnets": offenders
                .iter()
                .map(|s| json!({ "name": s.name, "route_table": s.route_table_ref }))
                .collect::<Vec<_>>(),
        }),
    })
}
