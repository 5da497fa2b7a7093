use spokecheck_facts::{FactsError, SnapshotError};
use spokecheck_types::ResourceIdError;
use thiserror::Error;

/// Why a check produced no report.
///
/// A disconnected spoke is not an error; it is a critical finding in a report.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("invalid spoke network id")]
    InvalidIdentifier(#[source] ResourceIdError),

    #[error("could not gather facts")]
    FactsUnavailable(#[source] FactsError),

    #[error("gathered facts are malformed")]
    MalformedSnapshot(#[source] SnapshotError),
}

impl From<FactsError> for CheckError {
    fn from(err: FactsError) -> Self {
        match err {
            FactsError::Malformed(inner) => CheckError::MalformedSnapshot(inner),
            other => CheckError::FactsUnavailable(other),
        }
    }
}

impl CheckError {
    /// Short explanation suitable for the person who asked for the check.
    ///
    /// Internal details (stderr, paths) stay in the logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            CheckError::InvalidIdentifier(_) => "Invalid VNet ID has been provided.",
            CheckError::FactsUnavailable(FactsError::Busy { .. }) => {
                "A check for this spoke and hub is already running. Please try again later."
            }
            CheckError::FactsUnavailable(FactsError::Cancelled { .. }) => {
                "The check was cancelled."
            }
            CheckError::FactsUnavailable(FactsError::CommandFailed { step: "apply", .. }) => {
                "Couldn't obtain the information about the spoke VNet. Please check the resource ID and try again."
            }
            CheckError::FactsUnavailable(_) => "Something went wrong. Please try again later.",
            CheckError::MalformedSnapshot(_) => {
                "The gathered network facts could not be understood. Please try again later."
            }
        }
    }
}
