use crate::cancel::Cancellation;
use crate::lock::PairLock;
use crate::parse::{parse_outputs, SnapshotContext};
use crate::workspace::ScratchWorkspace;
use crate::{FactProvider, FactsError};
use camino::{Utf8Path, Utf8PathBuf};
use spokecheck_domain::model::TopologySnapshot;
use spokecheck_settings::TerraformSettings;
use spokecheck_types::CheckTarget;
use std::io::ErrorKind;
use std::process::Command;
use tracing::{debug, info, warn};

/// Gathers facts by running the terraform configuration against one spoke/hub pair.
///
/// Each run holds the pair lock, works in a scratch copy of the configuration and destroys
/// whatever `apply` created once `init` succeeded, on every exit path.
/// Cancellation is checked between steps: no new step starts, and teardown still runs.
#[derive(Clone, Debug)]
pub struct TerraformProvider {
    settings: TerraformSettings,
    allowed_dns_servers: Vec<String>,
    cancellation: Cancellation,
}

impl TerraformProvider {
    pub fn new(settings: TerraformSettings, allowed_dns_servers: Vec<String>) -> Self {
        Self {
            settings,
            allowed_dns_servers,
            cancellation: Cancellation::default(),
        }
    }

    pub fn with_cancellation(mut self, cancellation: Cancellation) -> Self {
        self.cancellation = cancellation;
        self
    }

    fn ensure_not_cancelled(&self, step: &'static str) -> Result<(), FactsError> {
        if self.cancellation.is_cancelled() {
            info!(step, "fact gathering cancelled");
            return Err(FactsError::Cancelled { step });
        }
        Ok(())
    }

    fn lock_dir(&self) -> Utf8PathBuf {
        self.settings.lock_dir.clone().unwrap_or_else(|| {
            Utf8PathBuf::from_path_buf(std::env::temp_dir())
                .unwrap_or_else(|_| Utf8PathBuf::from("."))
        })
    }
}

impl FactProvider for TerraformProvider {
    fn source_name(&self) -> &'static str {
        "terraform"
    }

    fn gather(&self, target: &CheckTarget) -> Result<TopologySnapshot, FactsError> {
        // Drop order matters: teardown runs first, then the workspace goes, then the lock.
        let _lock = PairLock::acquire(
            &self.lock_dir(),
            &target.spoke_network_id,
            &target.hub_network_id,
        )?;
        let workspace = ScratchWorkspace::copy_from(&self.settings.config_dir)?;
        let tf = TerraformRun::new(&self.settings.binary, workspace.path(), target);

        // An interrupt also reaches the terraform child, so a step that fails after
        // cancellation is reported as the cancellation.
        self.ensure_not_cancelled("init")?;
        let init = tf.init(self.settings.upgrade);
        self.ensure_not_cancelled("apply")?;
        init?;
        let teardown = Teardown { tf: &tf };

        let applied = tf.apply();
        self.ensure_not_cancelled("output")?;
        applied?;
        let text = tf.output_json()?;

        let ctx = SnapshotContext {
            hub_network_id: target.hub_network_id.clone(),
            allowed_dns_servers: self.allowed_dns_servers.clone(),
        };
        let snapshot = parse_outputs(&text, &ctx);

        drop(teardown);
        if let Err(err) = workspace.close() {
            warn!(error = %err, "could not remove scratch workspace");
        }
        Ok(snapshot?)
    }
}

/// One terraform invocation context: binary, working dir and the pair variables.
struct TerraformRun<'a> {
    binary: &'a str,
    dir: &'a Utf8Path,
    vars: [String; 2],
}

impl<'a> TerraformRun<'a> {
    fn new(binary: &'a str, dir: &'a Utf8Path, target: &CheckTarget) -> Self {
        Self {
            binary,
            dir,
            vars: [
                format!("spoke_vnet_id={}", target.spoke_network_id),
                format!("hub_vnet_id={}", target.hub_network_id),
            ],
        }
    }

    fn init(&self, upgrade: bool) -> Result<String, FactsError> {
        let mut args = vec!["init", "-input=false", "-no-color"];
        if upgrade {
            args.push("-upgrade");
        }
        self.run("init", &args, false)
    }

    fn apply(&self) -> Result<String, FactsError> {
        self.run("apply", &["apply", "-auto-approve", "-input=false", "-no-color"], true)
    }

    fn output_json(&self) -> Result<String, FactsError> {
        self.run("output", &["output", "-json", "-no-color"], false)
    }

    fn destroy(&self) -> Result<String, FactsError> {
        self.run("destroy", &["destroy", "-auto-approve", "-input=false", "-no-color"], true)
    }

    fn run(&self, step: &'static str, args: &[&str], with_vars: bool) -> Result<String, FactsError> {
        let mut cmd = Command::new(self.binary);
        cmd.args(args).current_dir(self.dir).env("TF_IN_AUTOMATION", "1");
        if with_vars {
            for var in &self.vars {
                cmd.arg("-var").arg(var);
            }
        }

        info!(step, dir = %self.dir, "running terraform");
        let output = cmd.output().map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                FactsError::ToolUnavailable {
                    binary: self.binary.to_string(),
                    source,
                }
            } else {
                FactsError::Io {
                    context: format!("spawn {} {step}", self.binary),
                    source,
                }
            }
        })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !output.status.success() {
            return Err(FactsError::CommandFailed {
                step,
                status: output.status.to_string(),
                stderr,
            });
        }
        if !stderr.is_empty() {
            debug!(step, %stderr, "terraform stderr");
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Runs `terraform destroy` when dropped.
struct Teardown<'a, 'b> {
    tf: &'a TerraformRun<'b>,
}

impl Drop for Teardown<'_, '_> {
    fn drop(&mut self) {
        match self.tf.destroy() {
            Ok(_) => info!("terraform teardown finished"),
            Err(err) => warn!(error = %err, "terraform teardown failed"),
        }
    }
}
