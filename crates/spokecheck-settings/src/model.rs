use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Schema identifier accepted in the optional `schema` key.
pub const SCHEMA_CONFIG_V1: &str = "spokecheck.config.v1";

/// `spokecheck.toml` schema v1.
///
/// Every key is optional; unset keys fall back to the environment or the profile preset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpokecheckConfigV1 {
    /// Optional schema string for tooling (`spokecheck.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// `strict` (default) or `exhaustive`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Resource id of the hub virtual network.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hub_network_id: Option<String>,

    /// DNS servers a spoke is allowed to use. Unset means empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_dns_servers: Option<Vec<String>>,

    /// `on_disconnected` or `never`; overrides the profile's choice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_circuit: Option<String>,

    #[serde(default)]
    pub terraform: TerraformConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TerraformConfig {
    /// Directory holding the fact-gathering terraform configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_dir: Option<String>,

    /// Terraform executable (name on PATH or absolute path).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary: Option<String>,

    /// Where per-pair lock files live; defaults to the OS temp dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_dir: Option<String>,

    /// Pass `-upgrade` to `terraform init`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upgrade: Option<bool>,
}
