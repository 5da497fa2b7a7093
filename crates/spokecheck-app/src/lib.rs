//! Use case orchestration for spokecheck.
//!
//! This crate provides the application layer: use cases that coordinate the facts, domain, and
//! render layers. It is intentionally thin and delegates heavy lifting to the appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod check;
mod error;
mod explain;
mod render;
mod report;

pub use check::{run_check, verdict_exit_code, CheckInput, CheckOutput, EXIT_ERROR};
pub use error::CheckError;
pub use explain::{format_explanation, format_not_found, run_explain, ExplainOutput};
pub use render::{render_html, render_markdown};
pub use report::{parse_report_json, serialize_report, to_renderable};
