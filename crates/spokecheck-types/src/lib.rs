//! Stable DTOs and IDs used across the spokecheck workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted report
//! - stable rule IDs
//! - cloud resource identifier grammar
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod receipt;
pub mod resource_id;

pub use explain::{lookup_explanation, Explanation};
pub use receipt::{
    CheckTarget, Finding, ReportEnvelope, RunMeta, Severity, SpokecheckData, SpokecheckReport,
    Summary, ToolMeta, Verdict, VerdictCounts, SCHEMA_REPORT_V1,
};
pub use resource_id::{ResourceId, ResourceIdError};
