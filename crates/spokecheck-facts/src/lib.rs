//! Fact provider adapters: turn infrastructure-as-code outputs into a topology snapshot.
//!
//! This crate is allowed to do filesystem IO and to spawn the terraform binary.
//! Nothing here evaluates rules; that is the domain's job.

#![forbid(unsafe_code)]

mod cancel;
mod lock;
mod outputs_file;
mod parse;
mod terraform;
mod workspace;

use camino::Utf8PathBuf;
use spokecheck_domain::model::TopologySnapshot;
use spokecheck_types::CheckTarget;
use thiserror::Error;

pub use cancel::Cancellation;
pub use lock::{lock_file_name, PairLock};
pub use outputs_file::OutputsFileProvider;
pub use parse::{
    parse_outputs, SnapshotContext, SnapshotError, GROUP_NSG_INFO, GROUP_SUBNETS_INFO,
    GROUP_VNET_INFO,
};
pub use terraform::TerraformProvider;
pub use workspace::ScratchWorkspace;

/// Source of observed facts for one spoke/hub pair.
pub trait FactProvider {
    /// Short label recorded in the report (`terraform`, `outputs-file`).
    fn source_name(&self) -> &'static str;

    fn gather(&self, target: &CheckTarget) -> Result<TopologySnapshot, FactsError>;
}

#[derive(Debug, Error)]
pub enum FactsError {
    #[error("cannot run `{binary}`: {source}")]
    ToolUnavailable {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("terraform {step} failed ({status}): {stderr}")]
    CommandFailed {
        step: &'static str,
        status: String,
        stderr: String,
    },

    #[error("another check for this spoke/hub pair is running (lock file {lock})")]
    Busy { lock: Utf8PathBuf },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("fact gathering was cancelled before `{step}`")]
    Cancelled { step: &'static str },

    #[error(transparent)]
    Malformed(#[from] SnapshotError),
}
