use crate::parse::{parse_outputs, SnapshotContext};
use crate::{FactProvider, FactsError};
use camino::Utf8PathBuf;
use spokecheck_domain::model::TopologySnapshot;
use spokecheck_types::CheckTarget;
use tracing::info;

/// Reads a saved `terraform output -json` document instead of running terraform.
#[derive(Clone, Debug)]
pub struct OutputsFileProvider {
    path: Utf8PathBuf,
    allowed_dns_servers: Vec<String>,
}

impl OutputsFileProvider {
    pub fn new(path: impl Into<Utf8PathBuf>, allowed_dns_servers: Vec<String>) -> Self {
        Self {
            path: path.into(),
            allowed_dns_servers,
        }
    }
}

impl FactProvider for OutputsFileProvider {
    fn source_name(&self) -> &'static str {
        "outputs-file"
    }

    fn gather(&self, target: &CheckTarget) -> Result<TopologySnapshot, FactsError> {
        info!(path = %self.path, "reading terraform outputs");
        let text = std::fs::read_to_string(&self.path).map_err(|source| FactsError::Io {
            context: format!("read {}", self.path),
            source,
        })?;
        let ctx = SnapshotContext {
            hub_network_id: target.hub_network_id.clone(),
            allowed_dns_servers: self.allowed_dns_servers.clone(),
        };
        Ok(parse_outputs(&text, &ctx)?)
    }
}
