use crate::checks::Violation;
use crate::model::TopologySnapshot;
use serde_json::json;

pub fn run(snapshot: &TopologySnapshot) -> Option<Violation> {
    let offenders: Vec<_> = snapshot
        .security_groups
        .iter()
        .filter(|nsg| nsg.rule_count > 0)
        .collect();

    if offenders.is_empty() {
        return None;
    }

    let listed = offenders
        .iter()
        .map(|nsg| format!("{} ({} rules)", nsg.name, nsg.rule_count))
        .collect::<Vec<_>>()
        .join(", ");

    Some(Violation {
        message: format!("Some spoke subnets use non-empty security groups: {listed}."),
        data: json!({
            "security_groups": offenders
                .iter()
                .map(|nsg| json!({
                    "id": nsg.id,
                    "name": nsg.name,
                    "rule_count": nsg.rule_count,
                }))
                .collect::<Vec<_>>(),
        }),
    })
}
