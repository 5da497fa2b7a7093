use crate::model::{SpokecheckConfigV1, SCHEMA_CONFIG_V1};
use crate::presets;
use anyhow::Context;
use camino::Utf8PathBuf;
use spokecheck_domain::policy::{EvaluationPolicy, ShortCircuit};
use spokecheck_types::ResourceId;

/// Values that win over the config file.
///
/// The CLI fills these from its flags first and the environment second.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub hub_network_id: Option<String>,
    pub allowed_dns_servers: Option<Vec<String>>,
    pub short_circuit: Option<String>,
    pub terraform_config_dir: Option<String>,
    pub terraform_binary: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerraformSettings {
    pub config_dir: Utf8PathBuf,
    pub binary: String,
    pub lock_dir: Option<Utf8PathBuf>,
    pub upgrade: bool,
}

impl Default for TerraformSettings {
    fn default() -> Self {
        Self {
            config_dir: Utf8PathBuf::from("."),
            binary: "terraform".to_string(),
            lock_dir: None,
            upgrade: true,
        }
    }
}

/// Configuration built once at startup and passed by reference from there on.
#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub hub: ResourceId,
    pub policy: EvaluationPolicy,
    pub allowed_dns_servers: Vec<String>,
    pub terraform: TerraformSettings,
}

pub fn resolve_config(
    cfg: SpokecheckConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != SCHEMA_CONFIG_V1
    {
        anyhow::bail!("unsupported config schema: {schema} (expected {SCHEMA_CONFIG_V1})");
    }

    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "strict".to_string());
    if !presets::is_known(&profile) {
        anyhow::bail!("unknown profile: {profile} (expected 'strict' or 'exhaustive')");
    }

    let mut policy = presets::preset(&profile);

    if let Some(sc) = overrides.short_circuit.clone().or(cfg.short_circuit.clone()) {
        policy.short_circuit = parse_short_circuit(&sc)?;
    }

    let hub_raw = overrides
        .hub_network_id
        .clone()
        .or(cfg.hub_network_id.clone())
        .context("hub network id is not configured (set hub_network_id, HUB_VNET_ID or --hub)")?;
    let hub = ResourceId::parse(&hub_raw).context("invalid hub network id")?;

    let allowed_dns_servers = normalize_dns(
        overrides
            .allowed_dns_servers
            .clone()
            .or(cfg.allowed_dns_servers.clone())
            .unwrap_or_default(),
    );

    let defaults = TerraformSettings::default();
    let tf = cfg.terraform;
    let terraform = TerraformSettings {
        config_dir: overrides
            .terraform_config_dir
            .or(tf.config_dir)
            .map(Utf8PathBuf::from)
            .unwrap_or(defaults.config_dir),
        binary: overrides
            .terraform_binary
            .or(tf.binary)
            .unwrap_or(defaults.binary),
        lock_dir: tf.lock_dir.map(Utf8PathBuf::from),
        upgrade: tf.upgrade.unwrap_or(defaults.upgrade),
    };

    Ok(ResolvedConfig {
        hub,
        policy,
        allowed_dns_servers,
        terraform,
    })
}

/// Split a comma-separated server list the way `DEFAULT_DNS` is written.
pub fn split_dns_list(raw: &str) -> Vec<String> {
    normalize_dns(raw.split(',').map(str::to_string).collect())
}

fn normalize_dns(servers: Vec<String>) -> Vec<String> {
    servers
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_short_circuit(v: &str) -> anyhow::Result<ShortCircuit> {
    match v {
        "on_disconnected" => Ok(ShortCircuit::OnDisconnected),
        "never" => Ok(ShortCircuit::Never),
        other => anyhow::bail!("unknown short_circuit: {other} (expected on_disconnected|never)"),
    }
}
