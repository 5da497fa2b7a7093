use crate::checks::Violation;
use crate::model::TopologySnapshot;
use serde_json::json;

pub fn run(snapshot: &TopologySnapshot) -> Option<Violation> {
    let dns = &snapshot.dns_servers;
    let allowed = &snapshot.allowed_dns_servers;

    if dns.is_empty() {
        if allowed.is_empty() {
            return None;
        }
        return Some(Violation {
            message: "Spoke VNet inherits the platform default DNS instead of the allowed DNS servers."
                .to_string(),
            data: json!({
                "dns_servers": dns,
                "allowed_dns_servers": allowed,
            }),
        });
    }

    let unexpected: Vec<&str> = dns
        .iter()
        .map(|ip| ip.trim())
        .filter(|ip| !allowed.iter().any(|a| a.trim() == *ip))
        .collect();

    if unexpected.is_empty() {
        return None;
    }

    Some(Violation {
        message: format!(
            "Spoke VNet uses non-default DNS servers: {}.",
            unexpected.join(", ")
        ),
        data: json!({
            "dns_servers": dns,
            "allowed_dns_servers": allowed,
            "unexpected": unexpected,
        }),
    })
}
