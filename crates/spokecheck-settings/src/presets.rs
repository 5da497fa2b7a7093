use spokecheck_domain::policy::{EvaluationPolicy, ShortCircuit};

/// Preset profiles select how much of the rule catalog runs once the hub connection is broken.
pub fn preset(profile: &str) -> EvaluationPolicy {
    match profile {
        "exhaustive" => exhaustive_profile(),
        // default
        _ => strict_profile(),
    }
}

pub fn is_known(profile: &str) -> bool {
    matches!(profile, "strict" | "exhaustive")
}

fn strict_profile() -> EvaluationPolicy {
    EvaluationPolicy {
        profile: "strict".to_string(),
        short_circuit: ShortCircuit::OnDisconnected,
    }
}

fn exhaustive_profile() -> EvaluationPolicy {
    // Every rule runs even without a connected peering, for diagnosing a spoke before peering it.
    EvaluationPolicy {
        profile: "exhaustive".to_string(),
        short_circuit: ShortCircuit::Never,
    }
}
