//! Config parsing and profile/preset resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.
//! Reading `spokecheck.toml` and the process environment is the CLI's job.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;

pub use model::{SpokecheckConfigV1, TerraformConfig, SCHEMA_CONFIG_V1};
pub use resolve::{split_dns_list, Overrides, ResolvedConfig, TerraformSettings};

/// Parse `spokecheck.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<SpokecheckConfigV1> {
    let cfg: SpokecheckConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config used for a check (profile + file + overrides).
pub fn resolve_config(
    cfg: SpokecheckConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
