/// Whether a broken hub connection stops evaluation of the remaining rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShortCircuit {
    /// A firing `peering-connected` ends evaluation; the report holds that single finding.
    #[default]
    OnDisconnected,
    /// Every rule is evaluated regardless of connectivity.
    Never,
}

impl ShortCircuit {
    pub fn as_str(self) -> &'static str {
        match self {
            ShortCircuit::OnDisconnected => "on_disconnected",
            ShortCircuit::Never => "never",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvaluationPolicy {
    pub profile: String,
    pub short_circuit: ShortCircuit,
}

impl Default for EvaluationPolicy {
    fn default() -> Self {
        Self {
            profile: "strict".to_string(),
            short_circuit: ShortCircuit::OnDisconnected,
        }
    }
}
